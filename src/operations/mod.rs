pub mod mock;
pub mod run;
pub mod s3;
pub mod store;
pub mod transfer;
pub mod upload;

pub use run::run_app;
pub use upload::{UploadController, UploadRequest, UploadState, UploadTask};
