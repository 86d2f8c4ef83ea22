//! Repository for the `projects` table.
//!
//! `status` is a stored generated column; no write here ever touches it.
//! Lifecycle transitions that must coordinate with other tables (payments,
//! applications) go through the `&mut PgConnection` methods so the service
//! layer can wrap them in a single transaction.

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use gigboard_core::lifecycle::ProgressStatus;
use gigboard_core::types::DbId;

use crate::models::project::{
    ClientProjectFilters, CreateProject, Project, ProjectFilters, ProjectSort, ProjectWithClient,
    UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, title, description, budget, tags, deadline, \
     progress_status, status, deleted, deleted_at, deleted_by, payment_id, \
     created_at, updated_at";

/// Qualified columns plus the owning client's display info, for joined reads.
const WITH_CLIENT_COLUMNS: &str = "p.id, p.client_id, p.title, p.description, p.budget, p.tags, p.deadline, \
     p.progress_status, p.status, p.deleted, p.payment_id, p.created_at, p.updated_at, \
     u.fullname AS client_fullname, u.email AS client_email, \
     cp.company_name, cp.company_logo";

const WITH_CLIENT_JOINS: &str = "FROM projects p \
     JOIN users u ON u.id = p.client_id \
     LEFT JOIN client_profiles cp ON cp.user_id = p.client_id";

/// Provides CRUD and lifecycle-write operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `client_id` with the given initial
    /// progress status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        input: &CreateProject,
        progress_status: ProgressStatus,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (client_id, title, description, budget, tags, deadline, progress_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.budget)
            .bind(&input.tags)
            .bind(input.deadline)
            .bind(progress_status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID, including soft-deleted rows.
    ///
    /// Callers distinguish "missing" from "archived" themselves; several
    /// lifecycle operations treat the two differently.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID with a row lock, for use inside a transaction.
    ///
    /// Every multi-entity lifecycle transition starts with this lock so two
    /// concurrent transitions cannot both pass their state checks.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a project joined with its client's display info and profile.
    pub async fn find_with_client(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithClient>, sqlx::Error> {
        let query = format!("SELECT {WITH_CLIENT_COLUMNS} {WITH_CLIENT_JOINS} WHERE p.id = $1");
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields in `input` change.
    ///
    /// Returns `None` if no active (non-deleted) row with the given `id`
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                budget = COALESCE($4, budget),
                tags = COALESCE($5, tags),
                deadline = COALESCE($6, deadline),
                updated_at = NOW()
             WHERE id = $1 AND deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.budget)
            .bind(&input.tags)
            .bind(input.deadline)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project. Returns `true` if a live row was marked.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        deleted_by: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects
             SET deleted = TRUE, deleted_at = NOW(), deleted_by = $2, updated_at = NOW()
             WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id)
        .bind(deleted_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Archive: soft-delete and force the progress status to `cancelled`.
    ///
    /// The state gate (only closed projects archive) is validated by the
    /// service under the row lock before this write.
    pub async fn archive(
        conn: &mut PgConnection,
        id: DbId,
        deleted_by: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET deleted = TRUE, deleted_at = NOW(), deleted_by = $2,
                 progress_status = 'cancelled', updated_at = NOW()
             WHERE id = $1 AND deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(deleted_by)
            .fetch_optional(conn)
            .await
    }

    /// Clear the soft-delete axis. The progress status is left untouched;
    /// reopening after an archive takes an explicit progress update.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET deleted = FALSE, deleted_at = NULL, deleted_by = NULL, updated_at = NOW()
             WHERE id = $1 AND deleted = TRUE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the progress status inside a transaction. The generated `status`
    /// column re-derives automatically.
    pub async fn set_progress(
        conn: &mut PgConnection,
        id: DbId,
        progress_status: ProgressStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET progress_status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(progress_status.as_str())
            .fetch_optional(conn)
            .await
    }

    /// Mark a project completed and link its payment, inside a transaction.
    ///
    /// The `payment_id IS NULL` guard makes the link write-once even if a
    /// racing transaction slipped past the service checks.
    pub async fn set_completed(
        conn: &mut PgConnection,
        id: DbId,
        payment_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET progress_status = 'completed', payment_id = $2, updated_at = NOW()
             WHERE id = $1 AND payment_id IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(payment_id)
            .fetch_optional(conn)
            .await
    }

    /// List publicly visible projects: non-deleted, open, ongoing, with the
    /// caller's filters applied.
    pub async fn list_open(
        pool: &PgPool,
        filters: &ProjectFilters,
        sort: ProjectSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {WITH_CLIENT_COLUMNS} {WITH_CLIENT_JOINS} WHERE "
        ));
        push_open_filters(&mut qb, filters);
        qb.push(format!(" ORDER BY p.{}", sort.as_sql()));
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);
        qb.build_query_as::<ProjectWithClient>()
            .fetch_all(pool)
            .await
    }

    /// Count rows matching the public listing filters.
    pub async fn count_open(pool: &PgPool, filters: &ProjectFilters) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM projects p WHERE ");
        push_open_filters(&mut qb, filters);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// List a client's own projects with dashboard filters.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
        filters: &ClientProjectFilters,
        sort: ProjectSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {WITH_CLIENT_COLUMNS} {WITH_CLIENT_JOINS} WHERE "
        ));
        push_client_filters(&mut qb, client_id, filters);
        qb.push(format!(" ORDER BY p.{}", sort.as_sql()));
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);
        qb.build_query_as::<ProjectWithClient>()
            .fetch_all(pool)
            .await
    }

    /// Count rows matching a client's dashboard filters.
    pub async fn count_for_client(
        pool: &PgPool,
        client_id: DbId,
        filters: &ClientProjectFilters,
    ) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM projects p WHERE ");
        push_client_filters(&mut qb, client_id, filters);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }
}

/// Push the WHERE clause for the public open-project listing.
fn push_open_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filters: &'a ProjectFilters) {
    qb.push("p.deleted = FALSE AND p.status = 'open' AND p.progress_status = 'ongoing'");

    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        qb.push(" AND (p.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR p.description ILIKE ");
        qb.push_bind(pattern);
        qb.push(" OR ");
        qb.push_bind(search.to_string());
        qb.push(" = ANY(p.tags))");
    }
    if let Some(min) = filters.min_budget {
        qb.push(" AND p.budget >= ");
        qb.push_bind(min);
    }
    if let Some(max) = filters.max_budget {
        qb.push(" AND p.budget <= ");
        qb.push_bind(max);
    }
    if let Some(after) = filters.deadline_after {
        qb.push(" AND p.deadline >= ");
        qb.push_bind(after);
    }
    if let Some(before) = filters.deadline_before {
        qb.push(" AND p.deadline <= ");
        qb.push_bind(before);
    }
    if !filters.tags.is_empty() {
        qb.push(" AND p.tags && ");
        qb.push_bind(&filters.tags);
    }
}

/// Push the WHERE clause for a client's own listing.
fn push_client_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    client_id: DbId,
    filters: &ClientProjectFilters,
) {
    qb.push("p.client_id = ");
    qb.push_bind(client_id);
    if !filters.include_archived {
        qb.push(" AND p.deleted = FALSE");
    }
    if let Some(progress) = filters.progress_status {
        qb.push(" AND p.progress_status = ");
        qb.push_bind(progress.as_str());
    }
}
