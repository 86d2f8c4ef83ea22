//! Aggregate queries backing the client and freelancer dashboards.
//!
//! Each method is a single `COUNT(*) FILTER` pass so the dashboard costs
//! one round trip per card, not one per bucket.

use sqlx::PgPool;

use gigboard_core::types::DbId;

use crate::models::dashboard::{ClientProjectMetrics, FreelancerProjectStats};

/// Read-only aggregates over projects and applications.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Project counts for a client, bucketed by lifecycle state, derived
    /// status, archive flag, recency, and budget band. Archived projects
    /// count toward `total` and the bucket columns; `active`/`archived`
    /// split on the soft-delete flag.
    pub async fn client_project_metrics(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<ClientProjectMetrics, sqlx::Error> {
        sqlx::query_as::<_, ClientProjectMetrics>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE progress_status = 'draft') AS draft,
                    COUNT(*) FILTER (WHERE progress_status = 'ongoing') AS ongoing,
                    COUNT(*) FILTER (WHERE progress_status = 'completed') AS completed,
                    COUNT(*) FILTER (WHERE progress_status = 'cancelled') AS cancelled,
                    COUNT(*) FILTER (WHERE status = 'open') AS open,
                    COUNT(*) FILTER (WHERE status = 'closed') AS closed,
                    COUNT(*) FILTER (WHERE deleted = FALSE) AS active,
                    COUNT(*) FILTER (WHERE deleted = TRUE) AS archived,
                    COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '7 days')
                        AS created_last_7_days,
                    COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '30 days')
                        AS created_last_30_days,
                    COUNT(*) FILTER (WHERE budget < 1000) AS low_budget,
                    COUNT(*) FILTER (WHERE budget >= 1000 AND budget < 10000) AS mid_budget,
                    COUNT(*) FILTER (WHERE budget >= 10000) AS high_budget
             FROM projects
             WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_one(pool)
        .await
    }

    /// Progress-status counts over the non-deleted projects a freelancer
    /// has been approved on.
    pub async fn freelancer_project_stats(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<FreelancerProjectStats, sqlx::Error> {
        sqlx::query_as::<_, FreelancerProjectStats>(
            "SELECT COUNT(*) FILTER (WHERE p.progress_status = 'ongoing') AS ongoing,
                    COUNT(*) FILTER (WHERE p.progress_status = 'completed') AS completed,
                    COUNT(*) FILTER (WHERE p.progress_status = 'cancelled') AS cancelled
             FROM applications a
             JOIN projects p ON p.id = a.project_id
             WHERE a.freelancer_id = $1
               AND a.status = 'approved'
               AND p.deleted = FALSE",
        )
        .bind(freelancer_id)
        .fetch_one(pool)
        .await
    }
}
