// Auth gateway business logic
// Decision: Register and login both answer with the identity's single token
// Decision: Unknown username and wrong password are indistinguishable to the caller

use notekeep_core::error::{INVALID_CREDENTIALS, USERNAME_EXISTS};
use notekeep_core::{AvatarTemplate, Error, Identity, Profile, Result, Token};
use std::sync::Arc;

use super::credentials::{CredentialStore, Credentials, NewIdentity};
use super::token::TokenIssuer;

pub struct AuthService {
    credentials: CredentialStore,
    tokens: Arc<TokenIssuer>,
    avatars: AvatarTemplate,
}

impl AuthService {
    pub fn new(
        credentials: CredentialStore,
        tokens: Arc<TokenIssuer>,
        avatars: AvatarTemplate,
    ) -> Self {
        Self {
            credentials,
            tokens,
            avatars,
        }
    }

    /// Create an identity and hand back its token.
    pub async fn register(&self, input: NewIdentity) -> Result<Token> {
        // Cheap pre-check so a taken username doesn't pay for a hash;
        // the storage constraint still decides races
        if self.credentials.username_exists(&input.username).await? {
            return Err(Error::Conflict(USERNAME_EXISTS));
        }

        let identity = self.credentials.create_identity(input).await?;
        tracing::info!(user_id = %identity.id, username = %identity.username, "User registered");

        self.tokens.get_or_create_token(&identity).await
    }

    /// Exchange valid credentials for the identity's token.
    pub async fn login(&self, input: Credentials) -> Result<Token> {
        let identity = self
            .credentials
            .verify_credentials(&input.username, &input.password)
            .await?;

        let Some(identity) = identity else {
            tracing::debug!(username = %input.username, "Login rejected");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS));
        };

        tracing::debug!(user_id = %identity.id, "Login succeeded");
        self.tokens.get_or_create_token(&identity).await
    }

    pub fn profile(&self, identity: &Identity) -> Profile {
        self.avatars.profile(identity)
    }
}
