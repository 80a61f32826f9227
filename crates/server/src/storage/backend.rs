// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Short backend name for health output and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "in-memory",
        }
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_username(username).await,
            Self::InMemory(db) => db.get_user_by_username(username).await,
        }
    }

    // ============================================
    // Auth tokens
    // ============================================

    pub async fn get_token_for_user(&self, user_id: Uuid) -> Result<Option<AuthTokenRow>> {
        match self {
            Self::Postgres(db) => db.get_token_for_user(user_id).await,
            Self::InMemory(db) => db.get_token_for_user(user_id).await,
        }
    }

    pub async fn insert_token(&self, key: &str, user_id: Uuid) -> Result<Option<AuthTokenRow>> {
        match self {
            Self::Postgres(db) => db.insert_token(key, user_id).await,
            Self::InMemory(db) => db.insert_token(key, user_id).await,
        }
    }

    pub async fn get_user_by_token(&self, key: &str) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_token(key).await,
            Self::InMemory(db) => db.get_user_by_token(key).await,
        }
    }

    pub async fn count_tokens(&self) -> Result<i64> {
        match self {
            Self::Postgres(db) => db.count_tokens().await,
            Self::InMemory(db) => db.count_tokens().await,
        }
    }

    // ============================================
    // Notes
    // ============================================

    pub async fn create_note(&self, input: CreateNoteRow) -> Result<NoteRow> {
        match self {
            Self::Postgres(db) => db.create_note(input).await,
            Self::InMemory(db) => db.create_note(input).await,
        }
    }

    pub async fn list_notes(&self, user_id: Uuid) -> Result<Vec<NoteRow>> {
        match self {
            Self::Postgres(db) => db.list_notes(user_id).await,
            Self::InMemory(db) => db.list_notes(user_id).await,
        }
    }

    pub async fn get_note(&self, id: i64, user_id: Uuid) -> Result<Option<NoteRow>> {
        match self {
            Self::Postgres(db) => db.get_note(id, user_id).await,
            Self::InMemory(db) => db.get_note(id, user_id).await,
        }
    }

    pub async fn update_note(
        &self,
        id: i64,
        user_id: Uuid,
        input: UpdateNoteRow,
    ) -> Result<Option<NoteRow>> {
        match self {
            Self::Postgres(db) => db.update_note(id, user_id, input).await,
            Self::InMemory(db) => db.update_note(id, user_id, input).await,
        }
    }

    pub async fn delete_note(&self, id: i64, user_id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_note(id, user_id).await,
            Self::InMemory(db) => db.delete_note(id, user_id).await,
        }
    }
}
