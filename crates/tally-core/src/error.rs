use thiserror::Error;
use uuid::Uuid;

/// Expected failure modes of ledger engine operations. All are anticipated
/// outcomes surfaced to the presentation layer, not exceptional states.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid value for `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("insufficient wallet balance")]
    InsufficientBalance,
    #[error("expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("bill not found: {0}")]
    BillNotFound(Uuid),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serde(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
