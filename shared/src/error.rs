use thiserror::Error;

/// Everything that can end an upload attempt.
///
/// The `Display` text is what the result card shows after the `Error: ` prefix,
/// except for `InvalidExtension` which is raised as a browser alert before any
/// request is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("Please upload a valid .txt file from OpenBCI/STEW.")]
    InvalidExtension { name: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("API ERROR ({status})")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl UploadError {
    /// Input rejections never reach the server.
    pub fn is_rejection(&self) -> bool {
        matches!(self, UploadError::InvalidExtension { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_hides_body() {
        let err = UploadError::Status {
            status: 500,
            body: "{\"detail\":\"boom\"}".into(),
        };
        assert_eq!(err.to_string(), "API ERROR (500)");
        assert!(!err.is_rejection());
    }

    #[test]
    fn extension_rejection_is_user_facing() {
        let err = UploadError::InvalidExtension {
            name: "scan.edf".into(),
        };
        assert!(err.is_rejection());
        assert!(err.to_string().contains(".txt"));
    }
}
