// Note domain type
//
// Notes are owned by exactly one identity. The owner is not part of the
// public representation; ownership is enforced by every query instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A personal note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Note {
    /// Unique identifier for the note.
    pub id: i64,
    /// Note title. Never empty.
    #[cfg_attr(feature = "openapi", schema(example = "Groceries"))]
    pub title: String,
    /// Note body.
    #[cfg_attr(feature = "openapi", schema(example = "Milk, eggs, bread"))]
    pub content: String,
    /// Timestamp when the note was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the note was last updated.
    pub updated_at: DateTime<Utc>,
}
