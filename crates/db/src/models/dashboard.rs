//! Aggregated dashboard metrics models.

use serde::Serialize;
use sqlx::FromRow;

/// Project counts for a client's dashboard, bucketed several ways in a
/// single aggregate query.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ClientProjectMetrics {
    pub total: i64,
    pub draft: i64,
    pub ongoing: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub open: i64,
    pub closed: i64,
    pub active: i64,
    pub archived: i64,
    pub created_last_7_days: i64,
    pub created_last_30_days: i64,
    pub low_budget: i64,
    pub mid_budget: i64,
    pub high_budget: i64,
}

/// Progress-status counts over a freelancer's approved, non-deleted
/// projects.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct FreelancerProjectStats {
    pub ongoing: i64,
    pub completed: i64,
    pub cancelled: i64,
}
