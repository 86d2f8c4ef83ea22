//! Repository for the `notifications` table.

use sqlx::PgPool;

use gigboard_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification, NotificationWithSender};

const COLUMNS: &str = "id, user_id, sender_id, title, message, type, read, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert an unread notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, sender_id, title, message, type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(input.sender_id)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.kind)
            .fetch_one(pool)
            .await
    }

    /// List a user's notifications with sender display info, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NotificationWithSender>, sqlx::Error> {
        sqlx::query_as::<_, NotificationWithSender>(
            "SELECT n.id, n.user_id, n.sender_id, n.title, n.message, n.type, n.read,
                    n.created_at,
                    u.fullname AS sender_fullname,
                    u.role AS sender_role,
                    fp.avatar_url AS sender_avatar_url,
                    cp.company_name AS sender_company_name
             FROM notifications n
             LEFT JOIN users u ON u.id = n.sender_id
             LEFT JOIN freelancer_profiles fp ON fp.user_id = n.sender_id
             LEFT JOIN client_profiles cp ON cp.user_id = n.sender_id
             WHERE n.user_id = $1
             ORDER BY n.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Count a user's unread notifications.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Mark one notification read, scoped to its recipient. Returns the
    /// updated row, or `None` if the row does not exist or belongs to
    /// someone else.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET read = TRUE
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark all of a user's notifications read, returning how many changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE")
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Delete one notification, scoped to its recipient. Returns whether a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
