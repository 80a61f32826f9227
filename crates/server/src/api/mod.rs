// HTTP API routes
//
// This module contains the note route handlers and the DTOs shared by all
// public endpoints. Auth routes live in `crate::auth`.

pub mod common;
pub mod notes;
pub mod validation;

// Re-export common types
pub use common::{ApiError, ErrorResponse, MessageResponse};
