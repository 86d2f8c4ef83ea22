//! Notification fan-out: persist a row, then push it over a live channel.
//!
//! Fan-out is strictly best-effort. It runs after the triggering
//! operation's transaction has committed, and no failure here — database or
//! push — ever propagates back to the caller. Failures are logged and
//! swallowed.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ws::Message;
use gigboard_core::types::DbId;
use gigboard_db::models::notification::{CreateNotification, Notification};
use gigboard_db::repositories::NotificationRepo;
use gigboard_db::DbPool;

use crate::ws::WsManager;

/// How long a push attempt may take before it is abandoned.
const PUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// A live delivery channel for notifications.
///
/// The service layer depends on this trait, not on the WebSocket stack, so
/// tests can run with [`NoopSink`] and future transports (mobile push, SSE)
/// slot in without touching the callers.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Push a persisted notification to the recipient's live connections.
    async fn push(&self, user_id: DbId, notification: &Notification) -> Result<(), String>;
}

/// Pushes notifications to the recipient's WebSocket connections.
pub struct WsSink {
    ws_manager: Arc<WsManager>,
}

impl WsSink {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }
}

#[async_trait]
impl NotificationSink for WsSink {
    async fn push(&self, user_id: DbId, notification: &Notification) -> Result<(), String> {
        let payload = serde_json::json!({
            "event": "notification",
            "data": notification,
        });
        let text = serde_json::to_string(&payload).map_err(|e| e.to_string())?;

        let send = self
            .ws_manager
            .send_to_user(user_id, Message::Text(text.into()));
        let delivered = tokio::time::timeout(PUSH_TIMEOUT, send)
            .await
            .map_err(|_| "push timed out".to_string())?;

        tracing::debug!(user_id, delivered, "Pushed notification over WebSocket");
        Ok(())
    }
}

/// A sink that delivers nothing. Used in tests and in deployments without a
/// live push channel; notifications are still persisted and readable.
pub struct NoopSink;

#[async_trait]
impl NotificationSink for NoopSink {
    async fn push(&self, _user_id: DbId, _notification: &Notification) -> Result<(), String> {
        Ok(())
    }
}

/// Persists notifications and fans them out through the configured sink.
pub struct Notifier {
    pool: DbPool,
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(pool: DbPool, sink: Arc<dyn NotificationSink>) -> Self {
        Self { pool, sink }
    }

    /// Persist and push one notification. Never fails: errors are logged
    /// and the triggering operation proceeds unaffected.
    pub async fn send(&self, input: CreateNotification) {
        let notification = match NotificationRepo::create(&self.pool, &input).await {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(
                    user_id = input.user_id,
                    kind = input.kind,
                    error = %e,
                    "Failed to persist notification"
                );
                return;
            }
        };

        if let Err(e) = self.sink.push(notification.user_id, &notification).await {
            tracing::warn!(
                user_id = notification.user_id,
                notification_id = notification.id,
                error = %e,
                "Failed to push notification"
            );
        }
    }
}
