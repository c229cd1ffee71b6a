//! Error types for the authorization engine

use thiserror::Error;

/// Authorization engine errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthzError {
    /// Operation needs an authenticated session
    #[error("No authenticated session")]
    NotAuthenticated,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
