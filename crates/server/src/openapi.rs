// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Notekeep API.
// It is served by the API server (Swagger UI) and written out by the
// export-openapi binary (static spec generation).

use crate::api;
use crate::auth;
use notekeep_core::{Note, Profile};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Notekeep API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::register,
        auth::routes::login,
        auth::routes::get_profile,
        api::notes::list_notes,
        api::notes::create_note,
        api::notes::get_note,
        api::notes::update_note,
        api::notes::delete_note,
    ),
    components(
        schemas(
            Profile, Note,
            auth::routes::RegisterRequest,
            auth::routes::LoginRequest,
            auth::routes::TokenResponse,
            api::notes::NoteRequest,
            api::ErrorResponse,
            api::MessageResponse,
        )
    ),
    modifiers(&TokenSecurity),
    tags(
        (name = "auth", description = "Registration, login and profile endpoints"),
        (name = "notes", description = "Personal note endpoints")
    ),
    info(
        title = "Notekeep API",
        version = "0.1.0",
        description = "API for registering users, issuing tokens and managing personal notes",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// Registers the `Authorization: Token <key>` scheme referenced by protected paths
struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token <key>",
            ))),
        );
    }
}

/// Prefix the route paths are annotated with
const DOCUMENTED_PREFIX: &str = "/api";

impl ApiDoc {
    /// Document with route paths rebased onto the configured API prefix
    pub fn with_prefix(prefix: &str) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if prefix != DOCUMENTED_PREFIX {
            let paths = std::mem::take(&mut doc.paths.paths);
            doc.paths.paths = paths
                .into_iter()
                .map(|(path, item)| {
                    let rebased = match path.strip_prefix(DOCUMENTED_PREFIX) {
                        Some(rest) => format!("{}{}", prefix, rest),
                        None => path.clone(),
                    };
                    (rebased, item)
                })
                .collect();
        }
        doc
    }

    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> String {
        Self::openapi()
            .to_pretty_json()
            .expect("Failed to serialize OpenAPI spec")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let json: serde_json::Value = serde_json::from_str(&ApiDoc::to_json()).unwrap();
        let paths = json["paths"].as_object().unwrap();
        for path in [
            "/api/auth/register/",
            "/api/auth/login/",
            "/api/profile/",
            "/api/notes/",
            "/api/notes/{note_id}/",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
        assert!(json["components"]["securitySchemes"]["token"].is_object());
    }

    #[test]
    fn test_paths_follow_configured_prefix() {
        let doc = ApiDoc::with_prefix("/v2");
        assert!(doc.paths.paths.contains_key("/v2/auth/login/"));
        assert!(doc.paths.paths.contains_key("/v2/notes/{note_id}/"));
        assert!(!doc.paths.paths.keys().any(|path| path.starts_with("/api/")));

        let doc = ApiDoc::with_prefix("");
        assert!(doc.paths.paths.contains_key("/profile/"));

        let doc = ApiDoc::with_prefix("/api");
        assert!(doc.paths.paths.contains_key("/api/notes/"));
    }
}
