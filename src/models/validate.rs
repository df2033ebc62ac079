//! Caller-side checks for upload requests.
//!
//! The upload controller does not re-validate request shape; the dashboard
//! runs these predicates before handing a request over.

use anyhow::{bail, Result};

use crate::operations::upload::UploadRequest;

/// A destination bucket is a non-empty name without whitespace.
pub fn is_valid_bucket_id(bucket_id: &str) -> bool {
    !bucket_id.is_empty() && !bucket_id.chars().any(char::is_whitespace)
}

/// Keys are non-empty, relative, and free of empty path segments.
pub fn is_valid_object_key(key: &str) -> bool {
    !key.is_empty() && !key.starts_with('/') && !key.ends_with('/') && !key.contains("//")
}

pub fn validate_upload_request(request: &UploadRequest) -> Result<()> {
    if request.file.name.is_empty() {
        bail!("Upload source has no file name");
    }
    if !is_valid_bucket_id(&request.bucket_id) {
        bail!(
            "Destination bucket '{}' is not a valid bucket id",
            request.bucket_id
        );
    }
    if let Some(key) = request.key.as_deref() {
        if !is_valid_object_key(key) {
            bail!("Destination key '{key}' is not a valid object key");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::upload::FilePayload;
    use std::path::PathBuf;

    fn request(name: &str, bucket: &str, key: Option<&str>) -> UploadRequest {
        UploadRequest {
            file: FilePayload {
                name: name.to_string(),
                len: 1,
                path: PathBuf::from(name),
            },
            bucket_id: bucket.to_string(),
            key: key.map(str::to_string),
        }
    }

    #[test]
    fn bucket_ids_must_be_non_empty_and_whitespace_free() {
        assert!(is_valid_bucket_id("media-assets"));
        assert!(!is_valid_bucket_id(""));
        assert!(!is_valid_bucket_id("media assets"));
        assert!(!is_valid_bucket_id("media\tassets"));
    }

    #[test]
    fn object_keys_must_be_relative_and_well_formed() {
        assert!(is_valid_object_key("photo.png"));
        assert!(is_valid_object_key("images/photo.png"));
        assert!(!is_valid_object_key(""));
        assert!(!is_valid_object_key("/photo.png"));
        assert!(!is_valid_object_key("images/"));
        assert!(!is_valid_object_key("images//photo.png"));
    }

    #[test]
    fn valid_requests_pass() {
        assert!(validate_upload_request(&request("photo.png", "b1", None)).is_ok());
        assert!(
            validate_upload_request(&request("photo.png", "b1", Some("images/photo.png"))).is_ok()
        );
    }

    #[test]
    fn invalid_requests_carry_a_readable_message() {
        let err = validate_upload_request(&request("photo.png", "", None)).unwrap_err();
        assert!(err.to_string().contains("bucket"));

        let err =
            validate_upload_request(&request("photo.png", "b1", Some("/abs.png"))).unwrap_err();
        assert!(err.to_string().contains("key"));

        let err = validate_upload_request(&request("", "b1", None)).unwrap_err();
        assert!(err.to_string().contains("file name"));
    }
}
