use std::num::ParseFloatError;
use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the Pocketfolio domain core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Portfolio store operation failed: {0}")]
    Portfolio(String),

    #[error("Settings operation failed: {0}")]
    Settings(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Notification operation failed: {0}")]
    Notification(#[from] NotificationError),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseFloatError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] chrono::ParseError),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification permission not granted")]
    PermissionDenied,

    #[error("Failed to query scheduled notifications: {0}")]
    QueryFailed(String),

    #[error("Failed to schedule notification: {0}")]
    ScheduleFailed(String),

    #[error("Failed to cancel notification: {0}")]
    CancelFailed(String),
}

// Add From implementation for chrono::ParseError
impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

// Add From implementation for rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

// Add From implementation for serde_json::Error
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
