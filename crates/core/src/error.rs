//! Error types for Vellum token providers.

use alloc::string::String;

/// Result type alias for Vellum operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for token provider operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input argument does not respect the provider's input contract.
    #[error("invalid input for token {token}: {message}")]
    InvalidInput { token: String, message: String },
    /// The token name violates the naming rules.
    #[error("invalid token name {name:?}: {message}")]
    InvalidName { name: String, message: String },
    /// The producer function of a token failed.
    #[error("value producer for token {token} failed: {message}")]
    Producer { token: String, message: String },
    /// A token with the same name is already registered.
    #[error("token {name} is already registered")]
    DuplicateToken { name: String },
    /// No token with the given name is registered.
    #[error("token not found: {name}")]
    TokenNotFound { name: String },
    /// A value falls outside the bounded domain of a token.
    #[error("token {token} can't have value {value:?}")]
    ValueOutOfBounds { token: String, value: String },
}

impl Error {
    /// Creates an invalid input error.
    pub fn invalid_input(token: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a producer error.
    pub fn producer(token: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Producer {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Creates a duplicate token error.
    pub fn duplicate_token(name: impl Into<String>) -> Self {
        Error::DuplicateToken { name: name.into() }
    }

    /// Creates a token not found error.
    pub fn token_not_found(name: impl Into<String>) -> Self {
        Error::TokenNotFound { name: name.into() }
    }

    /// Creates a value out of bounds error.
    pub fn value_out_of_bounds(token: impl Into<String>, value: impl Into<String>) -> Self {
        Error::ValueOutOfBounds {
            token: token.into(),
            value: value.into(),
        }
    }

    /// Returns true if this error is a caller contract violation rather than a
    /// data or runtime condition.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput { .. } | Error::InvalidName { .. } | Error::ValueOutOfBounds { .. }
        )
    }
}
