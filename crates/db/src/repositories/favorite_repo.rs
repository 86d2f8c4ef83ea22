//! Repository for the `favorites` table.
//!
//! Duplicate bookmarks are rejected by `uq_favorites_freelancer_project`;
//! `create` surfaces the violation as a database error for the caller to
//! classify.

use sqlx::PgPool;

use gigboard_core::types::DbId;

use crate::models::favorite::{Favorite, FavoriteWithProject};

const COLUMNS: &str = "id, freelancer_id, project_id, created_at";

/// Provides bookmark operations for freelancers.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite, returning the created row.
    pub async fn create(
        pool: &PgPool,
        freelancer_id: DbId,
        project_id: DbId,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (freelancer_id, project_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(freelancer_id)
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a favorite by (freelancer, project). Returns whether a row
    /// was removed.
    pub async fn delete(
        pool: &PgPool,
        freelancer_id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM favorites WHERE freelancer_id = $1 AND project_id = $2")
                .bind(freelancer_id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a freelancer's favorites with project summaries, newest first.
    /// Soft-deleted projects drop out of the listing but keep their rows.
    pub async fn list_for_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<Vec<FavoriteWithProject>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteWithProject>(
            "SELECT f.id, f.freelancer_id, f.project_id, f.created_at,
                    p.title AS project_title,
                    p.budget AS project_budget,
                    p.progress_status AS project_progress_status,
                    p.deadline AS project_deadline
             FROM favorites f
             JOIN projects p ON p.id = f.project_id
             WHERE f.freelancer_id = $1 AND p.deleted = FALSE
             ORDER BY f.created_at DESC",
        )
        .bind(freelancer_id)
        .fetch_all(pool)
        .await
    }
}
