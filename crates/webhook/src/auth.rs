//! Shared-secret authentication of inbound webhook deliveries.
//!
//! The checks run in a fixed order and short-circuit on the first
//! failure; the token is only compared after the cheaper structural
//! checks pass. The server layer buffers the request body once before
//! calling in, so the payload slice here is already owned upstream and
//! idempotent to read.

use http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

use crate::config::HookConfig;

/// Rejection reasons, ordered as the checks run.
///
/// The `Display` text of each variant is exactly the plain-text body an
/// HTTP server should write back, and [`AuthError::status`] is the
/// matching status code, so callers can test behavior purely against the
/// returned error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("webhook secret should be non-empty")]
    EmptySecret,

    #[error("400 Bad Request: failed to read request body")]
    BodyRead,

    #[error("413 Payload Too Large: request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("405 Method Not Allowed")]
    MethodNotAllowed,

    #[error("400 Bad Request: hook only accepts Content-Type: application/json")]
    UnsupportedContentType,

    #[error("400 Bad Request: missing {header} header")]
    MissingEventType { header: String },

    #[error("401 Unauthorized: missing {header} header")]
    MissingToken { header: String },

    #[error("403 Forbidden: invalid {header}")]
    InvalidToken { header: String },
}

impl AuthError {
    /// The HTTP status code to reject the delivery with.
    pub fn status(&self) -> StatusCode {
        match self {
            // configuration error, never written to the wire
            AuthError::EmptySecret => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::BodyRead
            | AuthError::UnsupportedContentType
            | AuthError::MissingEventType { .. } => StatusCode::BAD_REQUEST,
            AuthError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AuthError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AuthError::MissingToken { .. } => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken { .. } => StatusCode::FORBIDDEN,
        }
    }
}

/// An authenticated delivery: the event-type tag, the delivery GUID and
/// the buffered payload, ready for [`crate::dispatch`].
#[derive(Debug)]
pub struct Authenticated<'a> {
    event_type: String,
    guid: String,
    payload: &'a [u8],
}

impl Authenticated<'_> {
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The delivery GUID header value; may be empty.
    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn payload(&self) -> &[u8] {
        self.payload
    }
}

/// Validates inbound requests against a pre-configured shared secret.
#[derive(Debug, Clone)]
pub struct Authenticator {
    secret: String,
}

impl Authenticator {
    pub fn new(secret: impl Into<String>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        Ok(Self { secret })
    }

    pub fn set_secret(&mut self, secret: impl Into<String>) -> Result<(), AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        self.secret = secret;
        Ok(())
    }

    /// Runs the validation sequence over an already-buffered request.
    ///
    /// Order: body size, method, content type, event-type header, token
    /// presence, token match. The first failure wins.
    pub fn authenticate<'a>(
        &self,
        method: &Method,
        headers: &HeaderMap,
        payload: &'a [u8],
        hook: &HookConfig,
    ) -> Result<Authenticated<'a>, AuthError> {
        if payload.len() > hook.max_body_bytes {
            return Err(AuthError::PayloadTooLarge {
                limit: hook.max_body_bytes,
            });
        }

        if method != Method::POST {
            return Err(AuthError::MethodNotAllowed);
        }

        let content_type = header_value(headers, http::header::CONTENT_TYPE.as_str());
        if !content_type.starts_with("application/json") {
            return Err(AuthError::UnsupportedContentType);
        }

        let event_type = header_value(headers, &hook.event_type_header);
        if event_type.is_empty() {
            return Err(AuthError::MissingEventType {
                header: hook.event_type_header.clone(),
            });
        }

        let token = header_value(headers, &hook.token_header);
        if token.is_empty() {
            return Err(AuthError::MissingToken {
                header: hook.token_header.clone(),
            });
        }

        // Exact, case-sensitive comparison against the configured secret.
        if token != self.secret {
            return Err(AuthError::InvalidToken {
                header: hook.token_header.clone(),
            });
        }

        Ok(Authenticated {
            event_type: event_type.to_string(),
            guid: header_value(headers, &hook.delivery_header).to_string(),
            payload,
        })
    }
}

fn header_value<'h>(headers: &'h HeaderMap, name: &str) -> &'h str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
