// Note service
// Decision: Every operation takes the owner explicitly; a note owned by
//           someone else is reported exactly like a missing one

use notekeep_core::error::TITLE_REQUIRED;
use notekeep_core::{Error, Identity, Note, Result};

use crate::api::validation::is_blank;
use crate::storage::{CreateNoteRow, StorageBackend, UpdateNoteRow};

/// Validated note fields (create and full update)
#[derive(Debug, Clone)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    fn check(&self) -> Result<()> {
        if is_blank(&self.title) {
            return Err(Error::Validation(TITLE_REQUIRED));
        }
        Ok(())
    }
}

pub struct NoteService {
    db: StorageBackend,
}

impl NoteService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    pub async fn list(&self, owner: &Identity) -> Result<Vec<Note>> {
        let rows = self.db.list_notes(owner.id).await?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    pub async fn create(&self, owner: &Identity, input: NoteInput) -> Result<Note> {
        input.check()?;
        let row = self
            .db
            .create_note(CreateNoteRow {
                user_id: owner.id,
                title: input.title,
                content: input.content,
            })
            .await?;
        tracing::debug!(user_id = %owner.id, note_id = row.id, "Note created");
        Ok(row.into())
    }

    pub async fn get(&self, owner: &Identity, id: i64) -> Result<Note> {
        self.db
            .get_note(id, owner.id)
            .await?
            .map(Note::from)
            .ok_or(Error::NotFound)
    }

    pub async fn update(&self, owner: &Identity, id: i64, input: NoteInput) -> Result<Note> {
        input.check()?;
        let row = self
            .db
            .update_note(
                id,
                owner.id,
                UpdateNoteRow {
                    title: input.title,
                    content: input.content,
                },
            )
            .await?;
        row.map(Note::from).ok_or(Error::NotFound)
    }

    pub async fn delete(&self, owner: &Identity, id: i64) -> Result<()> {
        if !self.db.delete_note(id, owner.id).await? {
            return Err(Error::NotFound);
        }
        tracing::debug!(user_id = %owner.id, note_id = id, "Note deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CreateUserRow;

    async fn create_identity(db: &StorageBackend, username: &str) -> Identity {
        db.create_user(CreateUserRow {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$argon2id$fake".to_string(),
        })
        .await
        .unwrap()
        .unwrap()
        .into_identity()
    }

    fn input(title: &str, content: &str) -> NoteInput {
        NoteInput {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let db = StorageBackend::in_memory();
        let service = NoteService::new(db.clone());
        let alice = create_identity(&db, "alice").await;

        let note = service
            .create(&alice, input("Groceries", "Milk"))
            .await
            .unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(service.get(&alice, note.id).await.unwrap(), note);

        let updated = service
            .update(&alice, note.id, input("Groceries", "Milk, eggs"))
            .await
            .unwrap();
        assert_eq!(updated.content, "Milk, eggs");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at >= note.updated_at);

        service.delete(&alice, note.id).await.unwrap();
        assert!(matches!(
            service.get(&alice, note.id).await.unwrap_err(),
            Error::NotFound
        ));
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let db = StorageBackend::in_memory();
        let service = NoteService::new(db.clone());
        let alice = create_identity(&db, "alice").await;

        let err = service.create(&alice, input("  ", "body")).await.unwrap_err();
        assert!(matches!(err, Error::Validation("Title is required.")));
        assert!(service.list(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_owner_sees_not_found() {
        let db = StorageBackend::in_memory();
        let service = NoteService::new(db.clone());
        let alice = create_identity(&db, "alice").await;
        let bob = create_identity(&db, "bob").await;

        let note = service.create(&alice, input("Private", "")).await.unwrap();

        assert!(matches!(
            service.get(&bob, note.id).await.unwrap_err(),
            Error::NotFound
        ));
        assert!(matches!(
            service
                .update(&bob, note.id, input("Mine", ""))
                .await
                .unwrap_err(),
            Error::NotFound
        ));
        assert!(matches!(
            service.delete(&bob, note.id).await.unwrap_err(),
            Error::NotFound
        ));

        // Untouched for the owner
        assert_eq!(service.get(&alice, note.id).await.unwrap().title, "Private");
    }
}
