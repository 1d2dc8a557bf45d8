//! Notification Routes
//!
//! - POST /api/v1/notifications/resolve - Resolve and display a push payload

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::notification::Notification;

/// POST /api/v1/notifications/resolve
///
/// The body is a raw push payload. A body that does not decode still yields
/// the default notification, matching what a device would show.
pub async fn resolve_notification(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<Notification>> {
    let notification = state.notifier.on_raw_message(&body).await?;
    Ok(Json(notification))
}
