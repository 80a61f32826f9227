// HTTP application assembly
// Decision: Health and docs are not prefixed; every API route is nested under the prefix
// Decision: Router construction is separate from main so tests drive the real app

use axum::http::{header, Method};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::auth::{self, AuthRoutesState, AuthState};
use crate::config::ServerConfig;
use crate::openapi::ApiDoc;
use crate::services::{AuthService, CredentialStore, NoteService, TokenIssuer};
use crate::storage::StorageBackend;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

/// Build the full application router on top of a storage backend
pub fn build_app(storage: StorageBackend, config: &ServerConfig) -> Router {
    let tokens = Arc::new(TokenIssuer::new(storage.clone()));
    let auth_state = AuthState::new(tokens.clone());

    let auth_service = Arc::new(AuthService::new(
        CredentialStore::new(storage.clone()),
        tokens,
        config.avatars.clone(),
    ));
    let auth_routes_state = AuthRoutesState {
        service: auth_service,
        auth: auth_state.clone(),
    };
    let notes_state = api::notes::NotesState {
        service: Arc::new(NoteService::new(storage.clone())),
        auth: auth_state,
    };
    let health_state = HealthState {
        storage: storage.kind(),
    };

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }

    let api_routes = Router::new()
        .merge(auth::routes(auth_routes_state))
        .merge(api::notes::routes(notes_state));

    // Build main router with health (not prefixed) and prefixed API routes
    let mut app = Router::new().route("/health", get(health).with_state(health_state));
    app = app.merge(build_router_with_prefix(api_routes, &config.api_prefix));

    // Add Swagger UI
    let app = app.merge(
        SwaggerUi::new("/swagger-ui").url(
            "/api-doc/openapi.json",
            ApiDoc::with_prefix(&config.api_prefix),
        ),
    );

    // Add CORS layer only if origins are configured
    let app = if config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?config.cors_allowed_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_allowed_origins.clone()))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                ]),
        )
    };

    app.layer(TraceLayer::new_for_http())
}

/// Build router with optional API prefix (extracted for testing)
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
