//! Webhook intake route

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{HeaderMap, Method};
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use webhook::{dispatch, AuthError, Delivery};

/// Authenticates a delivery, dispatches it into a typed event and hands
/// it to the handler seam. Writing the success response stays here; the
/// authenticator only writes rejections.
pub async fn deliver(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> ApiResult<&'static str> {
    // One buffered read of the body, bounded by the configured cap.
    let payload = to_bytes(body, state.hook.max_body_bytes)
        .await
        .map_err(|err| {
            if is_length_limit(&err) {
                ApiError::Rejected(AuthError::PayloadTooLarge {
                    limit: state.hook.max_body_bytes,
                })
            } else {
                ApiError::Rejected(AuthError::BodyRead)
            }
        })?;

    let authenticated = state
        .auth
        .authenticate(&method, &headers, &payload, &state.hook)?;

    let delivery = dispatch(
        &state.hook,
        authenticated.event_type(),
        authenticated.guid(),
        authenticated.payload(),
    );

    handle(&delivery)?;

    Ok("ok\n")
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if current.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = current.source();
    }
    false
}

/// Business-logic seam: downstream automation plugs in here. The default
/// wiring records the delivery and nothing else.
fn handle(delivery: &Delivery) -> common::Result<()> {
    let view = delivery.view();
    info!(
        event_type = %delivery.event_type,
        guid = %delivery.guid,
        org = view.org().unwrap_or(""),
        repo = view.repo().unwrap_or(""),
        action = view.action().unwrap_or(""),
        pr_comment = delivery.is_pr_comment(),
        "webhook delivery dispatched"
    );
    Ok(())
}
