//! Project entity model and DTOs.

use gigboard_core::lifecycle::{ProgressStatus, ProjectStatus};
use gigboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `status` comes from a stored generated column and is read-only: it is
/// `open` exactly when `progress_status` is `ongoing`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<i64>,
    pub tags: Vec<String>,
    pub deadline: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub progress_status: ProgressStatus,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub deleted_by: Option<DbId>,
    pub payment_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project joined with its owning client's display info and profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithClient {
    pub id: DbId,
    pub client_id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<i64>,
    pub tags: Vec<String>,
    pub deadline: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub progress_status: ProgressStatus,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub deleted: bool,
    pub payment_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub client_fullname: String,
    pub client_email: String,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}

/// DTO for creating a new project.
///
/// All content fields are optional at this level; the lifecycle service
/// enforces presence for non-draft creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub deadline: Option<Timestamp>,
}

/// DTO for a partial project update. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub deadline: Option<Timestamp>,
}

/// Filters for the public open-project listing.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilters {
    /// Free-text match over title/description, or an exact tag hit.
    pub search: Option<String>,
    pub min_budget: Option<i64>,
    pub max_budget: Option<i64>,
    pub deadline_after: Option<Timestamp>,
    pub deadline_before: Option<Timestamp>,
    /// Match projects whose tag set intersects this one.
    pub tags: Vec<String>,
}

/// Filters for a client's own project listing.
#[derive(Debug, Clone, Default)]
pub struct ClientProjectFilters {
    pub progress_status: Option<ProgressStatus>,
    pub include_archived: bool,
}

/// Sort order for project listings. Columns are whitelisted here so no
/// caller-supplied string ever reaches the SQL text.
#[derive(Debug, Clone, Copy)]
pub struct ProjectSort {
    pub column: ProjectSortColumn,
    pub descending: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum ProjectSortColumn {
    CreatedAt,
    Budget,
    Deadline,
}

impl ProjectSortColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            ProjectSortColumn::CreatedAt => "created_at",
            ProjectSortColumn::Budget => "budget",
            ProjectSortColumn::Deadline => "deadline",
        }
    }
}

impl Default for ProjectSort {
    fn default() -> Self {
        Self {
            column: ProjectSortColumn::CreatedAt,
            descending: true,
        }
    }
}

impl ProjectSort {
    /// Parse caller-supplied `sort_by`/`sort_order` strings, falling back to
    /// `created_at DESC` for anything unrecognized.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let column = match sort_by {
            Some("budget") => ProjectSortColumn::Budget,
            Some("deadline") => ProjectSortColumn::Deadline,
            _ => ProjectSortColumn::CreatedAt,
        };
        let descending = !matches!(sort_order, Some("asc"));
        Self { column, descending }
    }

    pub fn as_sql(self) -> String {
        format!(
            "{} {}",
            self.column.as_sql(),
            if self.descending { "DESC" } else { "ASC" }
        )
    }
}
