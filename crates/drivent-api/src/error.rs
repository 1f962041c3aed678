//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps eligibility failures and store errors to HTTP status codes and
//! returns JSON error bodies with an error code and message.
//!
//! | Failure                         | Status |
//! |---------------------------------|--------|
//! | enrollment / ticket / hotel gone| 404    |
//! | ticket does not cover a hotel   | 402    |
//! | missing or bad credentials      | 401    |
//! | anything else                   | 400    |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use drivent_core::{EligibilityError, FailureKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "PAYMENT_REQUIRED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Enrollment, ticket or hotel not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Ticket exists but does not cover a hotel stay (402).
    #[error("payment required: {0}")]
    PaymentRequired(String),

    /// Request could not be interpreted, e.g. a non-numeric path id (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any failure without a dedicated classification (400).
    /// The message is logged but not returned to the client.
    #[error("unclassified error: {0}")]
    Unclassified(String),

    /// Authentication failure: missing or invalid token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::PaymentRequired(_) => (StatusCode::PAYMENT_REQUIRED, "PAYMENT_REQUIRED"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unclassified(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        }
    }

    /// Wrap a store failure outside the eligibility check.
    pub fn store(err: sqlx::Error) -> Self {
        Self::Unclassified(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Unclassified(_) => "The request could not be completed".to_string(),
            other => other.to_string(),
        };

        if let Self::Unclassified(_) = &self {
            tracing::error!(error = %self, "unclassified request failure");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert eligibility failures by their [`FailureKind`].
impl<E: std::fmt::Display> From<EligibilityError<E>> for AppError {
    fn from(err: EligibilityError<E>) -> Self {
        match err.kind() {
            FailureKind::NotFound => Self::NotFound(err.to_string()),
            FailureKind::PaymentRequired => Self::PaymentRequired(err.to_string()),
            FailureKind::Unclassified => Self::Unclassified(err.to_string()),
        }
    }
}
