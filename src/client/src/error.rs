//! Client error handling

use crate::validation::ValidationErrors;
use taskboard_authz::AuthzError;
use taskboard_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the token; the persisted session has been cleared
    #[error("Unauthorized: credentials rejected or session expired")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success status other than 401/404
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A field the operation cannot proceed without is absent from the response
    #[error("Missing field in response: {0}")]
    MissingField(&'static str),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Authz(#[from] AuthzError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    /// Whether this error must tear down the local session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation(errors)
    }
}
