//! Error types for vaultlift-core

use thiserror::Error;

/// Result type alias using vaultlift-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for vaultlift
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// One or more required environment variables are unset or empty
    #[error("missing required environment variables: {}", .names.join(", "))]
    MissingVariables { names: Vec<String> },

    /// A variable is present but its value cannot be used
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },

    /// A secret identifier has no usable leaf segment
    #[error("secret identifier has no name segment: {path:?}")]
    InvalidIdentifier { path: String },
}

impl Error {
    /// Create a missing variables error
    pub fn missing_variables<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingVariables {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(path: impl Into<String>) -> Self {
        Self::InvalidIdentifier { path: path.into() }
    }
}
