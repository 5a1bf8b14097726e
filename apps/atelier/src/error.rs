//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Atelier                                │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, ApiError>                             │
//! │         │                                                               │
//! │         ├── Storage?    DbError::QueryFailed  ──┐                      │
//! │         ├── Bad file?   CoreError::InvalidFormat ├──► ApiError ──► shell│
//! │         ├── Clipboard?  ClipboardError ─────────┘         prints        │
//! │         │                                            "error: message"   │
//! │         └── Success ──────────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! User-facing notices ("Invalid JSON", "Copy failed") are toasts pushed by
//! the command itself; the ApiError is what the caller gets back.

use serde::Serialize;
use atelier_core::CoreError;
use atelier_db::DbError;

use crate::clipboard::ClipboardError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_FORMAT",
///   "message": "Invalid format: expected value at line 1 column 1"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown cart line, field path or setting
    NotFound,

    /// Argument rejected (unknown option value, unparsable command input)
    ValidationError,

    /// Imported text is not JSON
    InvalidFormat,

    /// Local storage failed
    StorageError,

    /// Clipboard unavailable or write rejected
    ClipboardError,

    /// File read or write failed
    IoError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an I/O error naming the path involved.
    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        ApiError::new(ErrorCode::IoError, format!("{}: {}", path.display(), err))
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Storage query failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal storage error: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidFormat { .. } => {
                ApiError::new(ErrorCode::InvalidFormat, err.to_string())
            }
            CoreError::InvalidToken { .. } => {
                ApiError::new(ErrorCode::ValidationError, err.to_string())
            }
        }
    }
}

impl From<ClipboardError> for ApiError {
    fn from(err: ClipboardError) -> Self {
        ApiError::new(ErrorCode::ClipboardError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for command results.
pub type ApiResult<T> = Result<T, ApiError>;
