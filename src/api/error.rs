use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("{field} {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("account {index}: {reason}")]
    InvalidAccount { index: usize, reason: String },

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl RequestError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        RequestError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn account(index: usize, reason: impl Into<String>) -> Self {
        RequestError::InvalidAccount {
            index,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(e: serde_json::Error) -> Self {
        RequestError::InvalidPayload(e.to_string())
    }
}
