//! Error types module
//!
//! `ValidationError` covers everything rejected locally (file checks and submit preconditions).
//! `SubmitError` is the full taxonomy of a submission attempt. Every variant is recoverable: the
//! form stays usable and the user may submit again.

use crate::constants::{
    invalid_file_alert, MSG_INVALID_EMAIL, MSG_NO_FILE, MSG_NO_RESPONSE, MSG_NO_VEHICLE_TYPE,
    MSG_SERVER_FALLBACK, MSG_UNDECODABLE,
};
use crate::models::ContactField;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for failures reported by the server
    Warn,
    /// Error level - for transport and unexpected failures
    Error,
}

/// Local validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Content does not match declared type: declared {declared}, detected {detected}")]
    ContentMismatch { declared: String, detected: String },

    #[error("Image could not be decoded: {0}")]
    Undecodable(String),

    #[error("No file selected")]
    NoFileSelected,

    #[error("No vehicle type selected")]
    NoVehicleType,

    #[error("Missing required field: {}", .0.as_str())]
    MissingField(ContactField),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

impl ValidationError {
    /// Text shown to the user.
    pub fn user_message(&self, max_size_mb: usize) -> String {
        match self {
            ValidationError::InvalidContentType { .. }
            | ValidationError::FileTooLarge { .. }
            | ValidationError::ContentMismatch { .. } => invalid_file_alert(max_size_mb),
            ValidationError::Undecodable(_) => MSG_UNDECODABLE.to_string(),
            ValidationError::NoFileSelected => MSG_NO_FILE.to_string(),
            ValidationError::NoVehicleType => MSG_NO_VEHICLE_TYPE.to_string(),
            ValidationError::MissingField(field) => {
                format!("Please fill in the {} field.", field.as_str())
            }
            ValidationError::InvalidEmail(_) => MSG_INVALID_EMAIL.to_string(),
        }
    }
}

/// Everything that can end a submission attempt without a quote.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The request went out but no response came back.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("Server error {status}: {message:?}")]
    Server {
        status: u16,
        reason: Option<String>,
        message: Option<String>,
    },

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl SubmitError {
    /// The single message rendered for this failure.
    pub fn user_message(&self, max_size_mb: usize) -> String {
        match self {
            SubmitError::Validation(e) => e.user_message(max_size_mb),
            SubmitError::Network(_) => format!("Error: {}", MSG_NO_RESPONSE),
            SubmitError::Server {
                reason, message, ..
            } => {
                let text = message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .or(reason.as_deref().filter(|r| !r.is_empty()))
                    .unwrap_or(MSG_SERVER_FALLBACK);
                format!("Error: {}", text)
            }
            SubmitError::Unknown(description) => format!("Error: {}", description),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            SubmitError::Validation(_) => LogLevel::Debug,
            SubmitError::Server { .. } => LogLevel::Warn,
            SubmitError::Network(_) | SubmitError::Unknown(_) => LogLevel::Error,
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            SubmitError::Validation(_) => "VALIDATION_ERROR",
            SubmitError::Network(_) => "NETWORK_ERROR",
            SubmitError::Server { .. } => "SERVER_ERROR",
            SubmitError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}
