// Identity domain types
//
// An Identity is a registered user's canonical record. The password hash
// stays inside the storage layer and is intentionally absent here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Default avatar service; combined with `/api/?name=<username>&background=random`
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://ui-avatars.com";

/// A registered user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    /// Unique, case-sensitive username
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Public profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Profile {
    /// The username.
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub name: String,
    /// The email address given at registration.
    #[cfg_attr(feature = "openapi", schema(example = "alice@example.com"))]
    pub email: String,
    /// Avatar image URL derived from the username.
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://ui-avatars.com/api/?name=alice&background=random")
    )]
    pub avatar: String,
}

/// Builds deterministic avatar URLs from usernames.
///
/// Pure URL construction; nothing is fetched.
#[derive(Debug, Clone)]
pub struct AvatarTemplate {
    base: Url,
}

impl AvatarTemplate {
    /// Create a template rooted at the given avatar service base URL.
    /// Any path on the base is kept; `api/` is appended below it.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let root = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&root)?.join("api/")?;
        Ok(Self { base })
    }

    /// Avatar URL for a username (the username is query-encoded)
    pub fn url_for(&self, username: &str) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("name", username)
            .append_pair("background", "random");
        url.into()
    }

    /// Profile view of an identity
    pub fn profile(&self, identity: &Identity) -> Profile {
        Profile {
            name: identity.username.clone(),
            email: identity.email.clone(),
            avatar: self.url_for(&identity.username),
        }
    }
}

impl Default for AvatarTemplate {
    fn default() -> Self {
        Self {
            base: Url::parse("https://ui-avatars.com/api/").expect("static URL is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(username: &str) -> Identity {
        Identity {
            id: Uuid::nil(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_default_avatar_url() {
        let template = AvatarTemplate::default();
        assert_eq!(
            template.url_for("alice"),
            "https://ui-avatars.com/api/?name=alice&background=random"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let template = AvatarTemplate::new("https://avatars.internal/").unwrap();
        assert_eq!(
            template.url_for("bob"),
            "https://avatars.internal/api/?name=bob&background=random"
        );
    }

    #[test]
    fn test_base_url_path_is_kept() {
        for base in ["https://host/avatars", "https://host/avatars/"] {
            let template = AvatarTemplate::new(base).unwrap();
            assert_eq!(
                template.url_for("erin"),
                "https://host/avatars/api/?name=erin&background=random"
            );
        }
    }

    #[test]
    fn test_avatar_url_is_deterministic() {
        let template = AvatarTemplate::new(DEFAULT_AVATAR_BASE_URL).unwrap();
        assert_eq!(template.url_for("carol"), template.url_for("carol"));
    }

    #[test]
    fn test_username_is_encoded() {
        let template = AvatarTemplate::default();
        let url = template.url_for("a&b=c");
        assert_eq!(
            url,
            "https://ui-avatars.com/api/?name=a%26b%3Dc&background=random"
        );
    }

    #[test]
    fn test_profile() {
        let template = AvatarTemplate::default();
        let profile = template.profile(&identity("dave"));
        assert_eq!(profile.name, "dave");
        assert_eq!(profile.email, "dave@example.com");
        assert_eq!(
            profile.avatar,
            "https://ui-avatars.com/api/?name=dave&background=random"
        );

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "dave");
        assert!(json.get("password").is_none());
    }
}
