//! Error types and exit codes for tagdraw
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage or configuration error (bad flags/args, forced id outside the pool)
//! - 3: Data/store error (missing store, unknown selector, unmapped import id)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

use crate::model::QuestionId;

/// Exit codes for the tagdraw CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage or configuration error (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for TagdrawError {
    fn from(err: rusqlite::Error) -> Self {
        TagdrawError::Other(err.to_string())
    }
}

/// Errors that can occur during tagdraw operations
#[derive(Error, Debug)]
pub enum TagdrawError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    /// A forced question id was requested that the candidate pool does not contain.
    /// Always a caller bug; never retried.
    #[error("question {question_id} is not available in the candidate pool")]
    ForcedIdNotSelectable { question_id: QuestionId },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found at {path:?}")]
    StoreNotFound { path: PathBuf },

    #[error("invalid store: {reason}")]
    InvalidStore { reason: String },

    #[error("selector not found: {id}")]
    SelectorNotFound { id: i64 },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("failed to enumerate question kinds: {reason}")]
    KindRegistry { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl TagdrawError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        TagdrawError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed transaction operation
    pub fn transaction(operation: &str, error: impl std::fmt::Display) -> Self {
        TagdrawError::FailedOperation {
            operation: format!("{} transaction", operation),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        TagdrawError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        TagdrawError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TagdrawError::UnknownFormat(_)
            | TagdrawError::UsageError(_)
            | TagdrawError::ForcedIdNotSelectable { .. }
            | TagdrawError::InvalidValue { .. } => ExitCode::Usage,

            TagdrawError::StoreNotFound { .. }
            | TagdrawError::InvalidStore { .. }
            | TagdrawError::SelectorNotFound { .. }
            | TagdrawError::NotFound { .. } => ExitCode::Data,

            TagdrawError::KindRegistry { .. }
            | TagdrawError::Io(_)
            | TagdrawError::Json(_)
            | TagdrawError::Toml(_)
            | TagdrawError::FailedOperation { .. }
            | TagdrawError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            TagdrawError::UnknownFormat(_) => "unknown_format",
            TagdrawError::UsageError(_) => "usage_error",
            TagdrawError::ForcedIdNotSelectable { .. } => "configuration_error",
            TagdrawError::InvalidValue { .. } => "invalid_value",
            TagdrawError::StoreNotFound { .. } => "store_not_found",
            TagdrawError::InvalidStore { .. } => "invalid_store",
            TagdrawError::SelectorNotFound { .. } => "selector_not_found",
            TagdrawError::NotFound { .. } => "not_found",
            TagdrawError::KindRegistry { .. } => "kind_registry",
            TagdrawError::Io(_) => "io_error",
            TagdrawError::Json(_) => "json_error",
            TagdrawError::Toml(_) => "toml_error",
            TagdrawError::FailedOperation { .. } => "failed_operation",
            TagdrawError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for tagdraw operations
pub type Result<T> = std::result::Result<T, TagdrawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_id_is_a_usage_error() {
        let err = TagdrawError::ForcedIdNotSelectable { question_id: 42 };
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert_eq!(
            err.to_string(),
            "question 42 is not available in the candidate pool"
        );
    }

    #[test]
    fn test_json_envelope() {
        let err = TagdrawError::SelectorNotFound { id: 7 };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "selector_not_found");
        assert_eq!(json["error"]["message"], "selector not found: 7");
    }

    #[test]
    fn test_rusqlite_error_maps_to_failure() {
        let err: TagdrawError = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(err.exit_code(), ExitCode::Failure);
    }
}
