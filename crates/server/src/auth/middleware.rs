// Authentication extractor (resource guard)
// Decision: Token travels in the Authorization header as `Token <key>`;
//           `Bearer <key>` is accepted as well, scheme match is case-insensitive
// Decision: Malformed header, foreign scheme and unknown key all read "Invalid token."

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use notekeep_core::error::{CREDENTIALS_NOT_PROVIDED, INVALID_TOKEN};
use notekeep_core::{Error, Identity, Result, Token};
use std::sync::Arc;

use crate::api::ApiError;
use crate::services::TokenIssuer;

const ACCEPTED_SCHEMES: [&str; 2] = ["token", "bearer"];

/// Authenticated identity extracted from the request.
/// Required: the request is rejected with 401 when absent or invalid.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
}

/// Auth state shared across gated routes
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenIssuer>,
}

impl AuthState {
    pub fn new(tokens: Arc<TokenIssuer>) -> Self {
        Self { tokens }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let identity = authenticate(&parts.headers, &auth_state.tokens).await?;
        Ok(AuthUser { identity })
    }
}

/// Resolve the request's token to an identity
pub async fn authenticate(headers: &HeaderMap, tokens: &TokenIssuer) -> Result<Identity> {
    let token = presented_token(headers)?;
    match tokens.resolve(&token).await? {
        Some(identity) => Ok(identity),
        None => {
            tracing::debug!("Rejected unknown token");
            Err(Error::Unauthorized(INVALID_TOKEN))
        }
    }
}

/// Pull the token out of the Authorization header without touching storage
pub fn presented_token(headers: &HeaderMap) -> Result<Token> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(Error::Unauthorized(CREDENTIALS_NOT_PROVIDED));
    };

    let value = value
        .to_str()
        .map_err(|_| Error::Unauthorized(INVALID_TOKEN))?;

    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(key), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::Unauthorized(INVALID_TOKEN));
    };

    if !ACCEPTED_SCHEMES
        .iter()
        .any(|accepted| scheme.eq_ignore_ascii_case(accepted))
    {
        return Err(Error::Unauthorized(INVALID_TOKEN));
    }

    Token::parse(key).ok_or(Error::Unauthorized(INVALID_TOKEN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(authorization).unwrap(),
        );
        headers
    }

    fn key() -> String {
        "0123456789abcdef0123456789abcdef01234567".to_string()
    }

    #[test]
    fn test_missing_header() {
        let err = presented_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(
            err.public_message(),
            "Authentication credentials were not provided."
        );
    }

    #[test]
    fn test_token_scheme() {
        let token = presented_token(&headers(&format!("Token {}", key()))).unwrap();
        assert_eq!(token.as_str(), key());
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        for scheme in ["token", "TOKEN", "Bearer", "bearer"] {
            let token = presented_token(&headers(&format!("{} {}", scheme, key()))).unwrap();
            assert_eq!(token.as_str(), key());
        }
    }

    #[test]
    fn test_rejected_headers() {
        let cases = [
            "Token".to_string(),
            key(),
            format!("Basic {}", key()),
            format!("Token {} extra", key()),
            "Token not-a-token".to_string(),
            format!("Token {}", key().to_uppercase()),
            format!("Token {}", &key()[..39]),
        ];
        for case in cases {
            let err = presented_token(&headers(&case)).unwrap_err();
            assert_eq!(err.public_message(), "Invalid token.", "case: {}", case);
        }
    }
}
