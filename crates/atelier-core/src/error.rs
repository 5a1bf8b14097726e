//! # Error Types
//!
//! Domain-specific error types for atelier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atelier-core errors (this file)                                       │
//! │  └── CoreError        - Malformed external input                       │
//! │                                                                         │
//! │  atelier-db errors (separate crate)                                    │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  App errors                                                             │
//! │  └── ApiError         - What the shell sees (serialized)               │
//! │                                                                         │
//! │  Flow: CoreError → ApiError → toast                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error Here
//! The validator never fails: garbage degrades to defaults. Only the codec
//! reports failures, and only the file path surfaces them to the user.

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Imported file text is not JSON.
    ///
    /// ## When This Occurs
    /// - User picks a file that is not JSON
    /// - JSON is truncated or hand-edited into an invalid state
    ///
    /// ## User Workflow
    /// ```text
    /// Import JSON
    ///      │
    ///      ▼
    /// from_file_text(text)
    ///      │
    ///      ▼
    /// InvalidFormat { reason }
    ///      │
    ///      ▼
    /// Toast: "Invalid JSON"
    /// ```
    #[error("Invalid format: {reason}")]
    InvalidFormat { reason: String },

    /// A URL token could not be decoded.
    ///
    /// Startup swallows this (a malformed hash must not alarm anyone), but
    /// the variant carries the stage that failed for logging.
    #[error("Invalid URL token ({stage}): {reason}")]
    InvalidToken { stage: TokenStage, reason: String },
}

/// Decoding stage at which a URL token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStage {
    Base64,
    Utf8,
    PercentEncoding,
    Json,
}

impl std::fmt::Display for TokenStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStage::Base64 => write!(f, "base64"),
            TokenStage::Utf8 => write!(f, "utf-8"),
            TokenStage::PercentEncoding => write!(f, "percent-encoding"),
            TokenStage::Json => write!(f, "json"),
        }
    }
}

impl CoreError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        CoreError::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Creates an InvalidToken error for the given stage.
    pub fn invalid_token(stage: TokenStage, reason: impl Into<String>) -> Self {
        CoreError::InvalidToken {
            stage,
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_format("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Invalid format: expected value at line 1 column 1"
        );

        let err = CoreError::invalid_token(TokenStage::Base64, "Invalid padding");
        assert_eq!(err.to_string(), "Invalid URL token (base64): Invalid padding");
    }
}
