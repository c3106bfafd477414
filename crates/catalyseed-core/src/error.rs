//! Error types module
//!
//! All errors surfaced by the Catalyseed core are unified under the
//! `AppError` enum: validation failures resolved locally, identity-provider
//! failures, and persistence failures. No variant is process-fatal; every
//! error is recoverable by retrying the user action.

use std::fmt;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like rejected credentials
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// A validation failure attached to a specific form field.
///
/// Missing required fields block submission with one of these per field,
/// not a generic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    FieldValidation(Vec<FieldError>),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Store write failed: {0}")]
    StoreWrite(String),

    #[error("Asset upload failed: {0}")]
    AssetUpload(String),

    #[error("Image rendering failed: {0}")]
    ImageRender(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Whether retrying the triggering user action can succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Internal(_) | AppError::InternalWithSource { .. })
    }

    /// Log level appropriate for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_)
            | AppError::FieldValidation(_)
            | AppError::DuplicateAccount(_)
            | AppError::InvalidCredentials
            | AppError::NotAuthenticated
            | AppError::NotFound(_) => LogLevel::Debug,
            AppError::StoreWrite(_) | AppError::AssetUpload(_) => LogLevel::Warn,
            AppError::ImageRender(_)
            | AppError::Config(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }

    /// Field-level messages for form display, if this is a field validation error.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            AppError::FieldValidation(errors) => Some(errors),
            _ => None,
        }
    }
}
