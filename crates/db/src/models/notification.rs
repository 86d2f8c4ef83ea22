//! Notification entity models.

use gigboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub sender_id: Option<DbId>,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub created_at: Timestamp,
}

/// A notification joined with the sender's display info, where a sender
/// exists (system notifications have none).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationWithSender {
    pub id: DbId,
    pub user_id: DbId,
    pub sender_id: Option<DbId>,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub created_at: Timestamp,
    pub sender_fullname: Option<String>,
    pub sender_role: Option<String>,
    pub sender_avatar_url: Option<String>,
    pub sender_company_name: Option<String>,
}

/// Parameters for creating a notification row.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub sender_id: Option<DbId>,
    pub title: String,
    pub message: String,
    pub kind: &'static str,
}
