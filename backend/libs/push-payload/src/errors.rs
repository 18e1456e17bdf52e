use thiserror::Error;

/// Result type alias for payload operations
pub type Result<T> = std::result::Result<T, PayloadError>;

/// Push Payload Error Types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Failed to parse push payload: {0}")]
    Parse(String),

    #[error("Invalid payload schema: {0}")]
    Schema(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid payload content: {0}")]
    Content(String),

    #[error("Invalid push configuration: {0}")]
    Config(String),
}

impl PayloadError {
    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        PayloadError::Schema(msg.into())
    }

    pub(crate) fn content(msg: impl Into<String>) -> Self {
        PayloadError::Content(msg.into())
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        PayloadError::Parse(err.to_string())
    }
}

impl From<envy::Error> for PayloadError {
    fn from(err: envy::Error) -> Self {
        PayloadError::Config(err.to_string())
    }
}

impl From<PayloadError> for String {
    fn from(err: PayloadError) -> Self {
        err.to_string()
    }
}
