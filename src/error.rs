//! Stable error codes for the presentation layer.

use rusqlite::ErrorCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Storage unreachable or refused at connection-open time.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Foreign-key, uniqueness or NOT NULL constraint rejected the statement.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Any other statement failure.
    #[error("{0}")]
    Db(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading requests or writing replies failed; storage is not involved.
    #[error("I/O failed: {0}")]
    Io(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Constraint(_) => "CONSTRAINT_VIOLATION",
            Self::Db(_) => "DB_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    pub fn to_serde(&self) -> AppErrorDto {
        AppErrorDto {
            code: self.code().to_string(),
            message: self.to_string(),
            details: None,
        }
    }

    /// Wrap an error raised while opening a connection.
    pub(crate) fn connection(e: rusqlite::Error) -> Self {
        AppError::Connection(e.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => AppError::Constraint(e.to_string()),
            Some(ErrorCode::CannotOpen) | Some(ErrorCode::NotADatabase) => {
                AppError::Connection(e.to_string())
            }
            _ => AppError::Db(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_serde().serialize(serializer)
    }
}

#[derive(Debug, Serialize)]
pub struct AppErrorDto {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
