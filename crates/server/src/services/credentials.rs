// Credential store
// Decision: The only component that creates or reads password hashes
// Decision: Argon2 runs on the blocking pool so it doesn't stall the runtime
// Decision: Unknown usernames are verified against a throwaway hash so they
//           cost the same as a wrong password

use anyhow::Context;
use notekeep_core::error::{ALL_FIELDS_REQUIRED, USERNAME_EXISTS};
use notekeep_core::{Error, Identity, Result};

use crate::api::validation::is_blank;
use crate::storage::{
    models::CreateUserRow,
    password::{hash_password, verify_password},
    StorageBackend,
};
use tokio::sync::OnceCell;

const DUMMY_PASSWORD: &str = "notekeep-dummy-password";

/// Validated registration input
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewIdentity")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated login input
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

pub struct CredentialStore {
    db: StorageBackend,
    dummy_hash: OnceCell<String>,
}

impl CredentialStore {
    pub fn new(db: StorageBackend) -> Self {
        Self {
            db,
            dummy_hash: OnceCell::new(),
        }
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.db.get_user_by_username(username).await?.is_some())
    }

    /// Create an identity with a salted password hash.
    ///
    /// Uniqueness is decided by the storage constraint, so two concurrent
    /// registrations of the same username produce exactly one identity.
    pub async fn create_identity(&self, input: NewIdentity) -> Result<Identity> {
        if is_blank(&input.username) || is_blank(&input.email) || is_blank(&input.password) {
            return Err(Error::Validation(ALL_FIELDS_REQUIRED));
        }

        let NewIdentity {
            username,
            email,
            password,
        } = input;

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .context("Password hashing task failed")??;

        let row = self
            .db
            .create_user(CreateUserRow {
                username,
                email,
                password_hash,
            })
            .await?;

        match row {
            Some(row) => Ok(row.into_identity()),
            None => Err(Error::Conflict(USERNAME_EXISTS)),
        }
    }

    /// Check a username/password pair.
    ///
    /// `Ok(None)` is the normal "no match" outcome, whether the username is
    /// unknown or the password is wrong.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>> {
        let user = self.db.get_user_by_username(username).await?;
        let password = password.to_string();

        let Some(user) = user else {
            let hash = self.dummy_hash().await?;
            tokio::task::spawn_blocking(move || verify_password(&password, &hash))
                .await
                .context("Password verification task failed")??;
            return Ok(None);
        };

        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .context("Password verification task failed")??;

        Ok(valid.then(|| user.into_identity()))
    }

    async fn dummy_hash(&self) -> Result<String> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| async {
                tokio::task::spawn_blocking(|| hash_password(DUMMY_PASSWORD))
                    .await
                    .context("Password hashing task failed")
                    .and_then(|hashed| hashed)
            })
            .await?;
        Ok(hash.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_identity(username: &str, email: &str, password: &str) -> NewIdentity {
        NewIdentity {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_verify() {
        let store = CredentialStore::new(StorageBackend::in_memory());
        let identity = store
            .create_identity(new_identity("alice", "alice@example.com", "s3cret"))
            .await
            .unwrap();
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.email, "alice@example.com");

        let verified = store.verify_credentials("alice", "s3cret").await.unwrap();
        assert_eq!(verified, Some(identity));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_both_none() {
        let store = CredentialStore::new(StorageBackend::in_memory());
        store
            .create_identity(new_identity("alice", "alice@example.com", "s3cret"))
            .await
            .unwrap();

        assert!(store
            .verify_credentials("alice", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .verify_credentials("nobody", "s3cret")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = CredentialStore::new(StorageBackend::in_memory());
        store
            .create_identity(new_identity("alice", "a@example.com", "pw"))
            .await
            .unwrap();

        let err = store
            .create_identity(new_identity("alice", "other@example.com", "pw2"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict("Username already exists.")));

        // The original password still works, the second one never landed
        assert!(store.verify_credentials("alice", "pw").await.unwrap().is_some());
        assert!(store.verify_credentials("alice", "pw2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected() {
        let store = CredentialStore::new(StorageBackend::in_memory());
        for input in [
            new_identity("", "a@b.com", "pw"),
            new_identity("u", "   ", "pw"),
            new_identity("u", "a@b.com", ""),
        ] {
            let err = store.create_identity(input).await.unwrap_err();
            assert!(matches!(err, Error::Validation("All fields are required.")));
        }
        assert!(!store.username_exists("u").await.unwrap());
    }

    #[tokio::test]
    async fn test_dummy_hash_is_computed_once() {
        let store = CredentialStore::new(StorageBackend::in_memory());
        let first = store.dummy_hash().await.unwrap();
        let second = store.dummy_hash().await.unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn test_debug_hides_password() {
        let input = new_identity("alice", "alice@example.com", "hunter2");
        assert!(!format!("{:?}", input).contains("hunter2"));

        let creds = Credentials {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
