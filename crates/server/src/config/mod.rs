// Server configuration
// Decision: Everything comes from environment variables (optionally via .env)
// Decision: No DATABASE_URL means in-memory dev mode, never an error

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use notekeep_core::{AvatarTemplate, DEFAULT_AVATAR_BASE_URL};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string; `None` selects in-memory storage
    pub database_url: Option<String>,
    /// Apply pending migrations at startup (Postgres only)
    pub run_migrations: bool,
    pub bind_addr: String,
    /// Prefix for every public API route, e.g. `/api`. Empty for none.
    pub api_prefix: String,
    /// Cross-origin callers allowed to use the API. Empty means same-origin only.
    pub cors_allowed_origins: Vec<HeaderValue>,
    pub avatars: AvatarTemplate,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            run_migrations: true,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            cors_allowed_origins: Vec::new(),
            avatars: AvatarTemplate::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL");

        let run_migrations = var("RUN_MIGRATIONS")
            .map(|value| parse_bool(&value))
            .unwrap_or(true);

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        // An explicitly empty API_PREFIX disables the prefix
        let api_prefix = match lookup("API_PREFIX") {
            Some(prefix) => normalize_prefix(&prefix),
            None => DEFAULT_API_PREFIX.to_string(),
        };

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,http://localhost:8081"
        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .filter_map(|s| s.parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        let avatar_base_url =
            var("AVATAR_BASE_URL").unwrap_or_else(|| DEFAULT_AVATAR_BASE_URL.to_string());
        let avatars = AvatarTemplate::new(&avatar_base_url)
            .with_context(|| format!("Invalid AVATAR_BASE_URL: {}", avatar_base_url))?;

        Ok(Self {
            database_url,
            run_migrations,
            bind_addr,
            api_prefix,
            cors_allowed_origins,
            avatars,
        })
    }
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// `api/` -> `/api`, `/` -> `` (no prefix)
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert!(config.database_url.is_none());
        assert!(config.run_migrations);
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.api_prefix, "/api");
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(
            config.avatars.url_for("alice"),
            "https://ui-avatars.com/api/?name=alice&background=random"
        );
    }

    #[test]
    fn test_database_and_migrations() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/notekeep"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/notekeep")
        );
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_blank_database_url_means_in_memory() {
        let config = config(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_api_prefix_normalization() {
        assert_eq!(config(&[("API_PREFIX", "v2/")]).unwrap().api_prefix, "/v2");
        assert_eq!(config(&[("API_PREFIX", "/api/")]).unwrap().api_prefix, "/api");
        assert_eq!(config(&[("API_PREFIX", "")]).unwrap().api_prefix, "");
        assert_eq!(config(&[("API_PREFIX", "/")]).unwrap().api_prefix, "");
    }

    #[test]
    fn test_cors_origins() {
        let config = config(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://app.example.com, http://localhost:8081,,",
        )])
        .unwrap();
        assert_eq!(config.cors_allowed_origins.len(), 2);
        assert_eq!(config.cors_allowed_origins[0], "https://app.example.com");
    }

    #[test]
    fn test_invalid_avatar_base_url() {
        assert!(config(&[("AVATAR_BASE_URL", "not a url")]).is_err());

        let config = config(&[("AVATAR_BASE_URL", "https://avatars.internal")]).unwrap();
        assert_eq!(
            config.avatars.url_for("bob"),
            "https://avatars.internal/api/?name=bob&background=random"
        );
    }
}
