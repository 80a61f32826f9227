// Token issuer
// Decision: Exactly one persistent token per identity, created lazily on
//           first successful authentication and never rotated
// Decision: Get-or-create relies on the storage unique constraints, so
//           concurrent first logins converge on a single stored token

use anyhow::anyhow;
use notekeep_core::{Identity, Result, Token};

use crate::storage::StorageBackend;

/// A freshly generated key colliding with an existing one is astronomically
/// unlikely; a few attempts is plenty.
const MAX_INSERT_ATTEMPTS: usize = 3;

pub struct TokenIssuer {
    db: StorageBackend,
}

impl TokenIssuer {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    /// Return the identity's token, creating it if none exists yet.
    pub async fn get_or_create_token(&self, identity: &Identity) -> Result<Token> {
        if let Some(row) = self.db.get_token_for_user(identity.id).await? {
            return Ok(row.token());
        }

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let candidate = Token::generate();
            if let Some(row) = self.db.insert_token(candidate.as_str(), identity.id).await? {
                tracing::debug!(user_id = %identity.id, "Issued new token");
                return Ok(row.token());
            }

            // Nothing inserted: either a concurrent request created this
            // user's token first, or the key belongs to someone else
            if let Some(row) = self.db.get_token_for_user(identity.id).await? {
                return Ok(row.token());
            }

            tracing::warn!(user_id = %identity.id, attempt, "Token key collision, retrying");
        }

        Err(anyhow!(
            "Could not allocate a unique token after {} attempts",
            MAX_INSERT_ATTEMPTS
        )
        .into())
    }

    /// Map a presented token to its identity, `None` if no such token exists.
    pub async fn resolve(&self, token: &Token) -> Result<Option<Identity>> {
        let user = self.db.get_user_by_token(token.as_str()).await?;
        Ok(user.map(|row| row.into_identity()))
    }
}
