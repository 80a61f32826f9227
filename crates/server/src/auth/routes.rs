// Authentication HTTP routes
// Decision: Paths keep their trailing slash; the bare form is routed too
// Decision: A missing or unparseable JSON body is treated as an empty one,
//           so clients always get the field-level message

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use notekeep_core::error::{ALL_FIELDS_REQUIRED, BOTH_FIELDS_REQUIRED};
use notekeep_core::{Error, Profile, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::middleware::{AuthState, AuthUser};
use crate::api::validation::{
    check_size, present, MAX_EMAIL_BYTES, MAX_PASSWORD_BYTES, MAX_USERNAME_BYTES,
};
use crate::api::{ApiError, ErrorResponse};
use crate::services::{AuthService, Credentials, NewIdentity};

pub const REGISTERED_MESSAGE: &str = "User registered successfully.";
pub const LOGGED_IN_MESSAGE: &str = "Login successful.";

/// Register request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewIdentity> {
        let (Some(username), Some(email), Some(password)) = (
            present(self.username),
            present(self.email),
            present(self.password),
        ) else {
            return Err(Error::Validation(ALL_FIELDS_REQUIRED));
        };

        check_size("username", &username, MAX_USERNAME_BYTES)?;
        check_size("email", &email, MAX_EMAIL_BYTES)?;
        check_size("password", &password, MAX_PASSWORD_BYTES)?;

        Ok(NewIdentity {
            username,
            email,
            password,
        })
    }
}

/// Login request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials> {
        let (Some(username), Some(password)) = (present(self.username), present(self.password))
        else {
            return Err(Error::Validation(BOTH_FIELDS_REQUIRED));
        };

        check_size("username", &username, MAX_USERNAME_BYTES)?;
        check_size("password", &password, MAX_PASSWORD_BYTES)?;

        Ok(Credentials { username, password })
    }
}

/// Token response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "Login successful.")]
    pub message: String,
    /// Opaque token to send as `Authorization: Token <token>`.
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

/// State for auth routes
#[derive(Clone)]
pub struct AuthRoutesState {
    pub service: Arc<AuthService>,
    pub auth: AuthState,
}

impl FromRef<AuthRoutesState> for AuthState {
    fn from_ref(state: &AuthRoutesState) -> Self {
        state.auth.clone()
    }
}

/// Create auth routes
pub fn routes(state: AuthRoutesState) -> Router {
    Router::new()
        // Public routes
        .route("/auth/register/", post(register))
        .route("/auth/register", post(register))
        .route("/auth/login/", post(login))
        .route("/auth/login", post(login))
        // Protected routes
        .route("/profile/", get(get_profile))
        .route("/profile", get(get_profile))
        .with_state(state)
}

/// POST /auth/register/ - Create an account
#[utoipa::path(
    post,
    path = "/api/auth/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = TokenResponse),
        (status = 400, description = "Missing field or username taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AuthRoutesState>,
    body: Option<Json<RegisterRequest>>,
) -> std::result::Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let input = req.validate()?;
    let token = state.service.register(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            message: REGISTERED_MESSAGE.to_string(),
            token: token.into_string(),
        }),
    ))
}

/// POST /auth/login/ - Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/api/auth/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthRoutesState>,
    body: Option<Json<LoginRequest>>,
) -> std::result::Result<Json<TokenResponse>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let input = req.validate()?;
    let token = state.service.login(input).await?;

    Ok(Json(TokenResponse {
        message: LOGGED_IN_MESSAGE.to_string(),
        token: token.into_string(),
    }))
}

/// GET /profile/ - Current user's profile
#[utoipa::path(
    get,
    path = "/api/profile/",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = Profile),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "auth"
)]
pub async fn get_profile(
    State(state): State<AuthRoutesState>,
    user: AuthUser,
) -> Json<Profile> {
    Json(state.service.profile(&user.identity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn test_register_request_requires_all_fields() {
        let err = RegisterRequest::default().validate().unwrap_err();
        assert_eq!(err.public_message(), "All fields are required.");

        let err = register_request("alice", " ", "pw").validate().unwrap_err();
        assert_eq!(err.public_message(), "All fields are required.");

        let input = register_request("alice", "alice@example.com", "pw")
            .validate()
            .unwrap();
        assert_eq!(input.username, "alice");
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let err = LoginRequest {
            username: Some("alice".to_string()),
            password: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.public_message(), "Both fields are required.");
    }

    #[test]
    fn test_oversized_password_is_rejected() {
        let err = register_request("alice", "a@example.com", &"x".repeat(MAX_PASSWORD_BYTES + 1))
            .validate()
            .unwrap_err();
        assert_eq!(err.public_message(), "Input exceeds allowed limits.");
    }

    #[test]
    fn test_request_tolerates_unknown_and_missing_fields() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username": "alice", "extra": 1}"#).unwrap();
        assert_eq!(req.username.as_deref(), Some("alice"));
        assert!(req.email.is_none());
    }
}
