//! Favorite (bookmark) entity model.

use gigboard_core::lifecycle::ProgressStatus;
use gigboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub freelancer_id: DbId,
    pub project_id: DbId,
    pub created_at: Timestamp,
}

/// A favorite joined with a summary of the bookmarked project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FavoriteWithProject {
    pub id: DbId,
    pub freelancer_id: DbId,
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub project_title: Option<String>,
    pub project_budget: Option<i64>,
    #[sqlx(try_from = "String")]
    pub project_progress_status: ProgressStatus,
    pub project_deadline: Option<Timestamp>,
}
