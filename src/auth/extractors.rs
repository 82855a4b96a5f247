use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::auth::jwt::{Claims, JwtKeys};
use crate::error::ApiError;

/// Verified caller identity, decoded from the token for the duration of a
/// request. Never persisted, never taken from the request body.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<Claims> for Principal {
    fn from(c: Claims) -> Self {
        Self {
            id: c.sub,
            email: c.email,
            name: c.name,
        }
    }
}

/// Pulls the raw token out of the transport framing: `Authorization: Bearer`
/// takes precedence, then the `token` cookie.
fn raw_token(parts: &Parts) -> Option<String> {
    if let Some(auth) = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(t) = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
        {
            return Some(t.to_string());
        }
    }
    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix("token="))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = raw_token(parts).ok_or(ApiError::Unauthenticated)?;
        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|e| {
            warn!("token present but failed verification");
            e
        })?;
        Ok(Principal::from(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::User;
    use crate::state::AppState;
    use axum::http::Request;
    use time::OffsetDateTime;

    fn parts_with_headers(headers: &[(&str, String)]) -> Parts {
        let mut builder = Request::builder().uri("/me");
        for (k, v) in headers {
            builder = builder.header(*k, v.as_str());
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn signed_token(state: &AppState, user: &User) -> String {
        JwtKeys::from_ref(state).sign(user).expect("sign")
    }

    fn make_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password_hash: "irrelevant".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn missing_credential_is_unauthenticated() {
        let state = AppState::fake();
        let mut parts = parts_with_headers(&[]);
        let err = Principal::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid_token() {
        let state = AppState::fake();
        let mut parts =
            parts_with_headers(&[("authorization", "Bearer not-a-jwt".to_string())]);
        let err = Principal::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn bearer_token_yields_principal() {
        let state = AppState::fake();
        let user = make_user();
        let token = signed_token(&state, &user);
        let mut parts =
            parts_with_headers(&[("authorization", format!("Bearer {}", token))]);
        let principal = Principal::from_request_parts(&mut parts, &state)
            .await
            .expect("principal");
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.email, user.email);
        assert_eq!(principal.name, user.name);
    }

    #[tokio::test]
    async fn cookie_token_yields_principal() {
        let state = AppState::fake();
        let user = make_user();
        let token = signed_token(&state, &user);
        let mut parts =
            parts_with_headers(&[("cookie", format!("theme=dark; token={}", token))]);
        let principal = Principal::from_request_parts(&mut parts, &state)
            .await
            .expect("principal");
        assert_eq!(principal.id, user.id);
    }

    #[tokio::test]
    async fn empty_cookie_token_is_unauthenticated() {
        let state = AppState::fake();
        let mut parts = parts_with_headers(&[("cookie", "token=".to_string())]);
        let err = Principal::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
