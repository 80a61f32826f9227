// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use notekeep_core::{Identity, Note, Token};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Users
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Drop the password hash on the way out of the storage layer
    pub fn into_identity(self) -> Identity {
        Identity {
            id: self.id,
            username: self.username,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserRow {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

// ============================================
// Auth tokens
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct AuthTokenRow {
    pub key: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl AuthTokenRow {
    pub fn token(&self) -> Token {
        Token::from_stored(self.key.clone())
    }
}

// ============================================
// Notes
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNoteRow {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Full replacement of a note's editable fields
#[derive(Debug, Clone)]
pub struct UpdateNoteRow {
    pub title: String,
    pub content: String,
}
