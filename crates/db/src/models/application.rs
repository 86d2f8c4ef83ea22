//! Application entity model and joined read models.

use gigboard_core::lifecycle::ProgressStatus;
use gigboard_core::types::{DbId, Timestamp};
use gigboard_core::workflow::ApplicationStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub project_id: DbId,
    pub freelancer_id: DbId,
    pub message: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An application joined with a summary of its project.
///
/// Used in a freelancer's "my applications" listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationWithProject {
    pub id: DbId,
    pub project_id: DbId,
    pub freelancer_id: DbId,
    pub message: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub project_title: Option<String>,
    #[sqlx(try_from = "String")]
    pub project_progress_status: ProgressStatus,
    pub project_budget: Option<i64>,
    pub project_deadline: Option<Timestamp>,
    pub project_deleted: bool,
}

/// An application joined with the applying freelancer's display info.
///
/// Used when the owning client reviews a project's applicants.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationWithFreelancer {
    pub id: DbId,
    pub project_id: DbId,
    pub freelancer_id: DbId,
    pub message: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub freelancer_fullname: String,
    pub freelancer_email: String,
    pub freelancer_profession: Option<String>,
    pub freelancer_avatar_url: Option<String>,
}

/// An application joined with both project and freelancer summaries.
///
/// Used for a client's cross-project application overview.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationOverview {
    pub id: DbId,
    pub project_id: DbId,
    pub freelancer_id: DbId,
    pub message: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
    pub project_title: Option<String>,
    #[sqlx(try_from = "String")]
    pub project_progress_status: ProgressStatus,
    pub freelancer_fullname: String,
    pub freelancer_email: String,
}

/// DTO for applying to a project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateApplication {
    pub message: Option<String>,
}

/// Per-status application counts for one freelancer.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ApplicationStatusCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}
