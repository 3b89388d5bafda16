//! Error types shared by the marketplace client crates.
//!
//! Every failure a page can run into is one of these variants. Controllers
//! catch them at their boundary and turn them into user-visible notices, so
//! none of them is expected to reach `main`.

use thiserror::Error;

/// Errors that can occur while talking to the marketplace backend
/// or interpreting user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request did not complete (connection refused, reset, DNS, ...)
    #[error("Request failed to complete: {0}")]
    Network(String),

    /// The response body did not have the expected shape
    #[error("Could not decode response: {0}")]
    Decode(String),

    /// The backend answered with a non-success status
    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },

    /// The action needs a signed-in user
    #[error("Sign-in required to {action}")]
    AuthRequired { action: String },

    /// A code or label typed by the user is not part of the domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl ClientError {
    /// Shorthand for an `AuthRequired` error.
    pub fn auth_required(action: impl Into<String>) -> Self {
        ClientError::AuthRequired {
            action: action.into(),
        }
    }

    /// Shorthand for an `InvalidValue` error.
    pub fn invalid_value(field: &str, value: &str) -> Self {
        ClientError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Convenience type alias for Results in the marketplace crates
pub type Result<T> = std::result::Result<T, ClientError>;
