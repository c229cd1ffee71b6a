//! Error types for the shared domain model

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while interpreting domain values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Role string outside the closed role set
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Permission key outside the closed key set
    #[error("Unknown permission key: {0}")]
    UnknownPermissionKey(String),

    /// Value outside a closed enumeration (status, priority, task type)
    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}

impl CoreError {
    /// Create an invalid-value error
    pub fn invalid_value<S: Into<String>>(kind: &'static str, value: S) -> Self {
        CoreError::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::UnknownRole("manager".to_string());
        assert_eq!(err.to_string(), "Unknown role: manager");

        let err = CoreError::invalid_value("priority", "urgent");
        assert_eq!(err.to_string(), "Invalid priority: urgent");
    }
}
