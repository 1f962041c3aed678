//! # Authentication Middleware
//!
//! Bearer token middleware that binds every request to a user.
//!
//! ## Token Format
//!
//! ```text
//! Bearer {user_id}:{secret}   secret configured (AUTH_SECRET)
//! Bearer {user_id}            development mode, no secret configured
//! ```
//!
//! ## AuthenticatedUser
//!
//! Every authenticated request gets an [`AuthenticatedUser`] injected into
//! the request extensions. Handlers extract it via the `FromRequestParts` impl.

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use drivent_core::UserId;
use subtle::ConstantTimeEq;

use crate::error::{AppError, ErrorBody, ErrorDetail};

/// The user a request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Extracts the user that the auth middleware injected into extensions.
/// Returns 401 if none is present.
#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("no authenticated user in request context".into()))
    }
}

// ── Auth Configuration ──────────────────────────────────────────────────────

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the secret.
#[derive(Clone)]
pub struct AuthConfig {
    pub secret: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ── Token Validation ────────────────────────────────────────────────────────

/// Constant-time comparison of bearer secrets.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        // Dummy comparison to keep timing constant regardless of length match.
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    let value: i32 = raw
        .parse()
        .map_err(|_| format!("invalid user id: {raw:?}"))?;
    UserId::new(value).map_err(|e| e.to_string())
}

/// Parse a bearer token into the user it authenticates.
///
/// With a secret configured the token must be `{user_id}:{secret}`. Without
/// one, the token is `{user_id}` and any `:{suffix}` is ignored.
pub fn parse_bearer_token(
    provided: &str,
    expected_secret: Option<&str>,
) -> Result<AuthenticatedUser, String> {
    match expected_secret {
        Some(expected) => {
            let Some((user_part, secret)) = provided.split_once(':') else {
                return Err("invalid token format, expected {user_id}:{secret}".into());
            };
            if !constant_time_token_eq(secret, expected) {
                return Err("invalid bearer token".into());
            }
            Ok(AuthenticatedUser {
                user_id: parse_user_id(user_part)?,
            })
        }
        None => {
            let user_part = provided
                .split_once(':')
                .map_or(provided, |(user, _)| user);
            Ok(AuthenticatedUser {
                user_id: parse_user_id(user_part)?,
            })
        }
    }
}

// ── Middleware ───────────────────────────────────────────────────────────────

/// Extract and validate the Bearer token from the Authorization header.
///
/// A header is always required; only the secret check is skipped in
/// development mode.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let secret = request
        .extensions()
        .get::<AuthConfig>()
        .and_then(|c| c.secret.clone());

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(header_value) if header_value.starts_with("Bearer ") => {
            let provided = &header_value[7..];
            match parse_bearer_token(provided, secret.as_deref()) {
                Ok(user) => {
                    request.extensions_mut().insert(user);
                    next.run(request).await
                }
                Err(msg) => {
                    tracing::warn!(reason = %msg, "authentication failed: invalid bearer token");
                    unauthorized_response(&msg)
                }
            }
        }
        Some(_) => {
            tracing::warn!("authentication failed: non-Bearer authorization scheme");
            unauthorized_response("authorization header must use Bearer scheme")
        }
        None => {
            tracing::warn!("authentication failed: missing authorization header");
            unauthorized_response("missing authorization header")
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            details: None,
        },
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Minimal router echoing the authenticated user id.
    fn test_app(secret: Option<&str>) -> Router {
        let auth_config = AuthConfig {
            secret: secret.map(String::from),
        };
        Router::new()
            .route(
                "/test",
                get(|user: AuthenticatedUser| async move { user.user_id.to_string() }),
            )
            .layer(from_fn(auth_middleware))
            .layer(axum::Extension(auth_config))
    }

    async fn call(app: Router, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_token_injects_user() {
        let (status, body) = call(test_app(Some("s3cret")), Some("Bearer 42:s3cret")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn missing_authorization_header_rejected() {
        let (status, body) = call(test_app(Some("s3cret")), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let err: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(err["error"]["code"], "UNAUTHORIZED");
        assert!(err["error"]["message"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn wrong_secret_rejected() {
        let (status, body) = call(test_app(Some("s3cret")), Some("Bearer 42:guess")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let err: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(err["error"]["message"].as_str().unwrap().contains("invalid"));
    }

    #[tokio::test]
    async fn random_word_rejected() {
        let (status, _) = call(test_app(Some("s3cret")), Some("Bearer lorem")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_rejected() {
        let (status, body) =
            call(test_app(Some("s3cret")), Some("Basic dXNlcjpwYXNz")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Bearer scheme"));
    }

    #[tokio::test]
    async fn development_mode_still_requires_header() {
        let (status, _) = call(test_app(None), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn development_mode_trusts_user_id() {
        let (status, body) = call(test_app(None), Some("Bearer 7")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "7");
    }

    #[test]
    fn constant_time_eq_identical_tokens() {
        assert!(constant_time_token_eq("secret-token-123", "secret-token-123"));
    }

    #[test]
    fn constant_time_eq_rejects_prefix() {
        assert!(!constant_time_token_eq("secret", "secret-token-123"));
    }

    #[test]
    fn constant_time_eq_rejects_empty() {
        assert!(!constant_time_token_eq("", "secret-token-123"));
    }

    #[test]
    fn parse_bearer_token_with_secret() {
        let user = parse_bearer_token("15:my-secret", Some("my-secret")).unwrap();
        assert_eq!(user.user_id.get(), 15);
    }

    #[test]
    fn parse_bearer_token_secret_may_contain_colons() {
        let user = parse_bearer_token("15:a:b", Some("a:b")).unwrap();
        assert_eq!(user.user_id.get(), 15);
    }

    #[test]
    fn parse_bearer_token_requires_secret_segment() {
        let result = parse_bearer_token("15", Some("my-secret"));
        assert!(result.unwrap_err().contains("expected {user_id}:{secret}"));
    }

    #[test]
    fn parse_bearer_token_rejects_non_numeric_user() {
        let result = parse_bearer_token("alice:my-secret", Some("my-secret"));
        assert!(result.unwrap_err().contains("invalid user id"));
    }

    #[test]
    fn parse_bearer_token_rejects_non_positive_user() {
        assert!(parse_bearer_token("0:my-secret", Some("my-secret")).is_err());
        assert!(parse_bearer_token("-4", None).is_err());
    }

    #[test]
    fn parse_bearer_token_development_mode_ignores_suffix() {
        let user = parse_bearer_token("3:whatever", None).unwrap();
        assert_eq!(user.user_id.get(), 3);
    }

    #[test]
    fn auth_config_debug_redacts_secret() {
        let config = AuthConfig {
            secret: Some("hunter2".to_string()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
    }
}
