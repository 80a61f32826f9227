// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: Each table sits behind a single lock so uniqueness checks and
//           inserts happen together (no check-then-act window)
//
// This implementation mirrors the PostgreSQL API, allowing the server to run
// without a database for development and tests.

use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

#[derive(Default)]
struct UserTable {
    by_id: HashMap<Uuid, UserRow>,
    // username -> id, the unique index
    by_username: HashMap<String, Uuid>,
}

#[derive(Default)]
struct TokenTable {
    by_key: HashMap<String, AuthTokenRow>,
    // user_id -> key, the unique index
    by_user: HashMap<Uuid, String>,
}

#[derive(Default)]
struct NoteTable {
    rows: HashMap<i64, NoteRow>,
    next_id: i64,
}

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<UserTable>,
    tokens: RwLock<TokenTable>,
    notes: RwLock<NoteTable>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Users
    // ============================================

    /// Insert a user; `None` if the username is taken
    pub async fn create_user(&self, input: CreateUserRow) -> Result<Option<UserRow>> {
        let mut users = self.users.write();
        if users.by_username.contains_key(&input.username) {
            return Ok(None);
        }

        let row = UserRow {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        users.by_username.insert(row.username.clone(), row.id);
        users.by_id.insert(row.id, row.clone());
        Ok(Some(row))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        let users = self.users.read();
        Ok(users
            .by_username
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    // ============================================
    // Auth tokens
    // ============================================

    pub async fn get_token_for_user(&self, user_id: Uuid) -> Result<Option<AuthTokenRow>> {
        let tokens = self.tokens.read();
        Ok(tokens
            .by_user
            .get(&user_id)
            .and_then(|key| tokens.by_key.get(key))
            .cloned())
    }

    /// Insert a token unless the user already has one or the key is taken
    pub async fn insert_token(&self, key: &str, user_id: Uuid) -> Result<Option<AuthTokenRow>> {
        let mut tokens = self.tokens.write();
        if tokens.by_user.contains_key(&user_id) || tokens.by_key.contains_key(key) {
            return Ok(None);
        }

        let row = AuthTokenRow {
            key: key.to_string(),
            user_id,
            created_at: Utc::now(),
        };
        tokens.by_user.insert(user_id, row.key.clone());
        tokens.by_key.insert(row.key.clone(), row.clone());
        Ok(Some(row))
    }

    pub async fn get_user_by_token(&self, key: &str) -> Result<Option<UserRow>> {
        let user_id = self.tokens.read().by_key.get(key).map(|row| row.user_id);
        Ok(user_id.and_then(|id| self.users.read().by_id.get(&id).cloned()))
    }

    pub async fn count_tokens(&self) -> Result<i64> {
        Ok(self.tokens.read().by_key.len() as i64)
    }

    // ============================================
    // Notes
    // ============================================

    pub async fn create_note(&self, input: CreateNoteRow) -> Result<NoteRow> {
        let mut notes = self.notes.write();
        notes.next_id += 1;
        let now = Utc::now();
        let row = NoteRow {
            id: notes.next_id,
            user_id: input.user_id,
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: now,
        };
        notes.rows.insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn list_notes(&self, user_id: Uuid) -> Result<Vec<NoteRow>> {
        let notes = self.notes.read();
        let mut result: Vec<_> = notes
            .rows
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    pub async fn get_note(&self, id: i64, user_id: Uuid) -> Result<Option<NoteRow>> {
        Ok(self
            .notes
            .read()
            .rows
            .get(&id)
            .filter(|n| n.user_id == user_id)
            .cloned())
    }

    pub async fn update_note(
        &self,
        id: i64,
        user_id: Uuid,
        input: UpdateNoteRow,
    ) -> Result<Option<NoteRow>> {
        let mut notes = self.notes.write();
        match notes.rows.get_mut(&id) {
            Some(note) if note.user_id == user_id => {
                note.title = input.title;
                note.content = input.content;
                note.updated_at = Utc::now();
                Ok(Some(note.clone()))
            }
            _ => Ok(None),
        }
    }

    pub async fn delete_note(&self, id: i64, user_id: Uuid) -> Result<bool> {
        let mut notes = self.notes.write();
        if notes.rows.get(&id).is_some_and(|n| n.user_id == user_id) {
            notes.rows.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
