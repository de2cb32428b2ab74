use thiserror::Error;

use crate::upload::FileSlot;

/// Reasons a submission is rejected before anything is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required file: {0}")]
    MissingFile(FileSlot),
    #[error("Only one file may be uploaded for '{0}'")]
    TooManyFiles(FileSlot),
    #[error("File '{slot}' exceeds the {limit_mb} MB size limit")]
    FileTooLarge { slot: FileSlot, limit_mb: u64 },
    #[error("Unsupported file type '{content_type}' for '{slot}'. Allowed types: {allowed}")]
    UnsupportedFileType {
        slot: FileSlot,
        content_type: String,
        allowed: String,
    },
    #[error("Unexpected file field: '{0}'")]
    UnexpectedFile(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for '{field}': {value}")]
    InvalidField { field: &'static str, value: String },
    #[error("Malformed form submission: {0}")]
    Malformed(String),
}

/// Failures while composing or sending the notification email.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
    #[error("Failed to compose email: {0}")]
    Compose(String),
    #[error("Mail transport error: {0}")]
    Transport(String),
    #[error("Mail transport timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

/// Terminal outcome of a failed `POST /send`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    #[error(transparent)]
    Failed(#[from] DeliveryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingFile(FileSlot::Document).to_string(),
            "Missing required file: document"
        );
        assert_eq!(
            ValidationError::FileTooLarge {
                slot: FileSlot::Document,
                limit_mb: 10
            }
            .to_string(),
            "File 'document' exceeds the 10 MB size limit"
        );
        assert_eq!(
            ValidationError::MissingField("fullname").to_string(),
            "Missing required field: fullname"
        );
    }

    #[test]
    fn test_delivery_error_display() {
        assert_eq!(
            DeliveryError::Transport("535 authentication failed".to_string()).to_string(),
            "Mail transport error: 535 authentication failed"
        );
        assert_eq!(
            DeliveryError::Timeout { seconds: 30 }.to_string(),
            "Mail transport timed out after 30s"
        );
    }

    #[test]
    fn test_submission_error_is_transparent() {
        let error = SubmissionError::from(ValidationError::MissingFile(FileSlot::Payment));
        assert_eq!(error.to_string(), "Missing required file: payment");

        let error = SubmissionError::from(DeliveryError::Transport("refused".to_string()));
        assert_eq!(error.to_string(), "Mail transport error: refused");
    }
}
