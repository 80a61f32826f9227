// Notekeep core
//
// DB-agnostic domain types shared by the server and the CLI.
//
// Key design decisions:
// - Identity never carries the password hash; only the storage layer sees it
// - Token is an opaque newtype so it can't be confused with other strings (or logged)
// - One error taxonomy for the whole request path, mapped to HTTP at the edge

pub mod error;
pub mod identity;
pub mod note;
pub mod token;

// Re-exports for convenience
pub use error::{Error, Result};
pub use identity::{AvatarTemplate, Identity, Profile, DEFAULT_AVATAR_BASE_URL};
pub use note::Note;
pub use token::{is_valid_token_format, Token, TOKEN_BYTES};
