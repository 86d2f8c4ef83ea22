//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication and operate only on the
//! authenticated user's own notifications.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use gigboard_core::error::CoreError;
use gigboard_core::types::DbId;
use gigboard_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/notifications
///
/// List the authenticated user's notifications, newest first, with sender
/// display info.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": notifications })))
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark a single notification as read. 404 if the notification does not
/// exist or belongs to someone else.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let notification = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        })?;

    Ok(Json(json!({ "data": notification })))
}

/// POST /api/v1/notifications/read-all
///
/// Mark all of the authenticated user's notifications as read. Returns the
/// number of notifications that were marked.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": { "marked_read": count } })))
}

/// GET /api/v1/notifications/unread-count
///
/// Return the number of unread notifications for the authenticated user.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": { "count": count } })))
}

/// DELETE /api/v1/notifications/{id}
///
/// Delete one of the authenticated user's notifications. 204 on success.
pub async fn delete_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = NotificationRepo::delete(&state.pool, notification_id, auth.user_id).await?;
    if !removed {
        return Err(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}
