//! API error handling
//!
//! Webhook rejections answer with the plain-text message and status code
//! the authenticator designed; everything else is an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};
use webhook::AuthError;

/// Error type for the webhook intake route
#[derive(Debug)]
pub enum ApiError {
    /// The delivery failed authentication
    Rejected(AuthError),
    /// The downstream handler failed
    Handler(common::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Rejected(err)
    }
}

impl From<common::Error> for ApiError {
    fn from(err: common::Error) -> Self {
        ApiError::Handler(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(err) => {
                warn!("rejected webhook delivery: {}", err);
                (err.status(), err.to_string()).into_response()
            }
            ApiError::Handler(err) => {
                error!("webhook handler failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string()).into_response()
            }
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
