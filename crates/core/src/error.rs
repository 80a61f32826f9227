// Error taxonomy for the request path

use thiserror::Error;

/// Result type alias for Notekeep operations
pub type Result<T> = std::result::Result<T, Error>;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const USERNAME_EXISTS: &str = "Username already exists.";
pub const BOTH_FIELDS_REQUIRED: &str = "Both fields are required.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const CREDENTIALS_NOT_PROVIDED: &str = "Authentication credentials were not provided.";
pub const INVALID_TOKEN: &str = "Invalid token.";
pub const TITLE_REQUIRED: &str = "Title is required.";
pub const NOT_FOUND: &str = "Not found.";
pub const INTERNAL_ERROR: &str = "Internal server error.";

/// Errors surfaced by the auth gateway, resource guard and note service.
///
/// The `&'static str` payloads are the literal messages returned to
/// clients. `Storage` carries internal detail that must only be logged.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or empty required field
    #[error("{0}")]
    Validation(&'static str),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(&'static str),

    /// Failed credential check or missing/invalid token
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Resource missing or owned by someone else
    #[error("Not found.")]
    NotFound,

    /// Underlying store unavailable or misbehaving
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl Error {
    /// Message that is safe to show to the caller
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::Validation(msg) | Error::Conflict(msg) | Error::Unauthorized(msg) => msg,
            Error::NotFound => NOT_FOUND,
            Error::Storage(_) => INTERNAL_ERROR,
        }
    }
}
