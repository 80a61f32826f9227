// Opaque bearer tokens
// Decision: 20 random bytes, hex encoded (40 chars), same shape as classic auth token keys
// Decision: Stored as-is so repeated logins can hand back the same token

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of random bytes in a token
pub const TOKEN_BYTES: usize = 20;

/// Opaque bearer credential. One per identity.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Generate a new random token from the OS-seeded CSPRNG
    pub fn generate() -> Self {
        let bytes: [u8; TOKEN_BYTES] = rand::thread_rng().gen();
        Self(hex::encode(bytes))
    }

    /// Accept a presented key only if it has the token shape
    pub fn parse(key: &str) -> Option<Self> {
        is_valid_token_format(key).then(|| Self(key.to_string()))
    }

    /// Wrap a key that came out of storage
    pub fn from_stored(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Never print token values
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(..)")
    }
}

/// Validate token format: exactly 40 lowercase hex chars
pub fn is_valid_token_format(key: &str) -> bool {
    key.len() == TOKEN_BYTES * 2
        && key
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
