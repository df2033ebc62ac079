use crate::operations::upload::FilePayload;

/// State for the delete confirmation dialog
#[derive(Debug, Clone, Default)]
pub struct ConfirmState {
    pub bucket: String,
    pub key: String,
    pub button: usize,
}

/// What the input dialog is collecting
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    #[default]
    None,
    Filter,
    UploadKey {
        file: FilePayload,
        bucket: String,
        prefix: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mode: InputMode,
    pub prompt: String,
    pub buffer: String,
    pub cursor: usize,
}
