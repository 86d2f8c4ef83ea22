//! Repository for the `applications` table.
//!
//! Double-apply protection is the `uq_applications_project_freelancer`
//! unique constraint, not an existence pre-check; `create` surfaces the
//! violation as a database error for the caller to classify. The partial
//! index `uq_applications_one_approved` backstops the single-staffing
//! invariant the same way.

use sqlx::{PgConnection, PgPool};

use gigboard_core::types::DbId;
use gigboard_core::workflow::ApplicationStatus;

use crate::models::application::{
    Application, ApplicationOverview, ApplicationStatusCounts, ApplicationWithFreelancer,
    ApplicationWithProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, freelancer_id, message, status, created_at, updated_at";

const QUALIFIED_COLUMNS: &str =
    "a.id, a.project_id, a.freelancer_id, a.message, a.status, a.created_at, a.updated_at";

/// Provides CRUD and workflow-write operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a `pending` application, returning the created row.
    ///
    /// A duplicate (project, freelancer) pair fails with a unique-violation
    /// database error.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        freelancer_id: DbId,
        message: Option<&str>,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (project_id, freelancer_id, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(project_id)
            .bind(freelancer_id)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// Find an application by ID with a row lock, for use inside a
    /// transaction.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Set an application's status inside a transaction.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(conn)
            .await
    }

    /// Find the approved application for a project, if any, inside a
    /// transaction. The partial unique index guarantees at most one.
    pub async fn find_approved_for_project(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications
             WHERE project_id = $1 AND status = 'approved'"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(project_id)
            .fetch_optional(conn)
            .await
    }

    /// Whether a project has an approved application other than `exclude_id`.
    pub async fn exists_other_approved(
        conn: &mut PgConnection,
        project_id: DbId,
        exclude_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM applications
                WHERE project_id = $1 AND status = 'approved' AND id <> $2
             )",
        )
        .bind(project_id)
        .bind(exclude_id)
        .fetch_one(conn)
        .await
    }

    /// List a freelancer's applications with project summaries, newest
    /// first.
    pub async fn list_for_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<Vec<ApplicationWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS},
                    p.title AS project_title,
                    p.progress_status AS project_progress_status,
                    p.budget AS project_budget,
                    p.deadline AS project_deadline,
                    p.deleted AS project_deleted
             FROM applications a
             JOIN projects p ON p.id = a.project_id
             WHERE a.freelancer_id = $1
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ApplicationWithProject>(&query)
            .bind(freelancer_id)
            .fetch_all(pool)
            .await
    }

    /// List a project's applicants with freelancer display info, newest
    /// first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ApplicationWithFreelancer>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS},
                    u.fullname AS freelancer_fullname,
                    u.email AS freelancer_email,
                    fp.profession AS freelancer_profession,
                    fp.avatar_url AS freelancer_avatar_url
             FROM applications a
             JOIN users u ON u.id = a.freelancer_id
             LEFT JOIN freelancer_profiles fp ON fp.user_id = a.freelancer_id
             WHERE a.project_id = $1
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ApplicationWithFreelancer>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List every application across all of a client's projects, newest
    /// first.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ApplicationOverview>, sqlx::Error> {
        let query = format!(
            "SELECT a.id, a.project_id, a.freelancer_id, a.message, a.status, a.created_at,
                    p.title AS project_title,
                    p.progress_status AS project_progress_status,
                    u.fullname AS freelancer_fullname,
                    u.email AS freelancer_email
             FROM applications a
             JOIN projects p ON p.id = a.project_id
             JOIN users u ON u.id = a.freelancer_id
             WHERE p.client_id = $1
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ApplicationOverview>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Per-status application counts for one freelancer, in one aggregate
    /// pass.
    pub async fn status_counts_for_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<ApplicationStatusCounts, sqlx::Error> {
        sqlx::query_as::<_, ApplicationStatusCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                    COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                    COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
             FROM applications
             WHERE freelancer_id = $1",
        )
        .bind(freelancer_id)
        .fetch_one(pool)
        .await
    }
}
