use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Extracts and checks the shared API key; mutating handlers take this first
/// so they reject before touching the store.
#[derive(Debug)]
pub struct ApiKey;

/// Constant-time comparison of the supplied key against the configured secret.
pub fn verify_key(supplied: &str, expected: &str) -> bool {
    supplied.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[async_trait]
impl FromRequestParts<AppState> for ApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        if !verify_key(supplied, &state.config.api_key) {
            warn!("request with wrong API key");
            return Err(ApiError::Unauthorized);
        }

        Ok(ApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    fn parts_with_headers(key: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/users");
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        let (parts, ()) = builder.body(()).expect("build request").into_parts();
        parts
    }

    #[test]
    fn verify_key_accepts_exact_match() {
        assert!(verify_key("s3cret", "s3cret"));
    }

    #[test]
    fn verify_key_rejects_wrong_value() {
        assert!(!verify_key("s3cret!", "s3cret"));
        assert!(!verify_key("", "s3cret"));
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = AppState::fake();
        let mut parts = parts_with_headers(None);
        let err = ApiKey::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_key_is_unauthorized() {
        let state = AppState::fake();
        let mut parts = parts_with_headers(Some("not-the-key"));
        let err = ApiKey::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn configured_key_is_accepted() {
        let state = AppState::fake();
        let mut parts = parts_with_headers(Some("test-key"));
        assert!(ApiKey::from_request_parts(&mut parts, &state).await.is_ok());
    }
}
