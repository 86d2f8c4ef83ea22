//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use gigboard_core::error::CoreError;
use gigboard_core::lifecycle::ProgressStatus;
use gigboard_core::types::{DbId, Timestamp};
use gigboard_db::models::project::{
    ClientProjectFilters, CreateProject, ProjectFilters, ProjectSort, UpdateProject,
};
use gigboard_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireClient;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageMeta, PagedResponse};
use crate::services::projects;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(flatten)]
    pub project: CreateProject,
    /// Create as a draft (hidden, all fields optional). Defaults to `false`.
    #[serde(default)]
    pub is_draft: bool,
}

/// Query parameters for the public open-project listing.
///
/// Pagination fields are spelled out rather than nested because
/// `serde_urlencoded` cannot drive `#[serde(flatten)]` through typed
/// fields.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub min_budget: Option<i64>,
    pub max_budget: Option<i64>,
    pub deadline_after: Option<Timestamp>,
    pub deadline_before: Option<Timestamp>,
    /// Comma-separated tag list; matches projects sharing any tag.
    pub tags: Option<String>,
}

impl ListProjectsQuery {
    fn filters(&self) -> ProjectFilters {
        ProjectFilters {
            search: self.search.clone(),
            min_budget: self.min_budget,
            max_budget: self.max_budget,
            deadline_after: self.deadline_after,
            deadline_before: self.deadline_before,
            tags: split_tags(self.tags.as_deref()),
        }
    }

    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
        }
    }
}

/// Query parameters for a client's own project listing.
#[derive(Debug, Default, Deserialize)]
pub struct ClientProjectsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub progress_status: Option<String>,
    #[serde(default)]
    pub include_archived: bool,
}

impl ClientProjectsQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
        }
    }
}

/// Body for `PUT /projects/{id}/progress`.
///
/// `progress_status` arrives as a plain string and is parsed by hand so an
/// unknown value surfaces as a validation error, not a body-rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub progress_status: String,
}

fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
///
/// Create a project (draft or published) owned by the authenticated client.
pub async fn create_project(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<impl IntoResponse> {
    let project = projects::create(&state, auth.user_id, &input.project, input.is_draft).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
///
/// List open projects with search, budget/deadline/tag filters, and
/// pagination.
pub async fn list_projects(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListProjectsQuery>,
) -> AppResult<Json<PagedResponse<gigboard_db::models::project::ProjectWithClient>>> {
    let filters = params.filters();
    let pagination = params.pagination();
    let sort = ProjectSort::parse(params.sort_by.as_deref(), params.sort_order.as_deref());
    let (page, limit, offset) = (pagination.page(), pagination.limit(), pagination.offset());

    let total = ProjectRepo::count_open(&state.pool, &filters).await?;
    let data = ProjectRepo::list_open(&state.pool, &filters, sort, limit, offset).await?;

    Ok(Json(PagedResponse {
        data,
        meta: PageMeta::new(total, page, limit),
    }))
}

/// GET /api/v1/projects/client
///
/// List the authenticated client's own projects, optionally filtered by
/// progress status and including archived ones.
pub async fn list_client_projects(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Query(params): Query<ClientProjectsQuery>,
) -> AppResult<Json<PagedResponse<gigboard_db::models::project::ProjectWithClient>>> {
    let progress_status = params
        .progress_status
        .as_deref()
        .map(str::parse::<ProgressStatus>)
        .transpose()
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let filters = ClientProjectFilters {
        progress_status,
        include_archived: params.include_archived,
    };
    let pagination = params.pagination();
    let sort = ProjectSort::parse(params.sort_by.as_deref(), params.sort_order.as_deref());
    let (page, limit, offset) = (pagination.page(), pagination.limit(), pagination.offset());

    let total = ProjectRepo::count_for_client(&state.pool, auth.user_id, &filters).await?;
    let data =
        ProjectRepo::list_for_client(&state.pool, auth.user_id, &filters, sort, limit, offset)
            .await?;

    Ok(Json(PagedResponse {
        data,
        meta: PageMeta::new(total, page, limit),
    }))
}

/// GET /api/v1/projects/{id}
///
/// Fetch one project with its client's display info. Archived projects are
/// visible only to their owner or an admin.
pub async fn get_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let project = ProjectRepo::find_with_client(&state.pool, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if project.deleted && !auth.is_owner_or_admin(project.client_id) {
        return Err(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }
        .into());
    }

    Ok(Json(json!({ "data": project })))
}

/// PUT /api/v1/projects/{id}
///
/// Partially update a project's content fields. Owner only; archived
/// projects cannot be edited.
pub async fn update_project(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(budget) = input.budget {
        if budget < 0 {
            return Err(CoreError::Validation("budget must not be negative".into()).into());
        }
    }

    let existing = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if existing.client_id != auth.user_id {
        return Err(
            CoreError::Forbidden("Only the owning client can edit a project".into()).into(),
        );
    }

    let updated = ProjectRepo::update(&state.pool, project_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    Ok(Json(json!({ "data": updated })))
}

/// DELETE /api/v1/projects/{id}
///
/// Soft-delete a project. Owner or admin. Returns 204 No Content.
pub async fn delete_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if !auth.is_owner_or_admin(existing.client_id) {
        return Err(CoreError::Forbidden(
            "Only the owning client or an admin can delete a project".into(),
        )
        .into());
    }

    let removed = ProjectRepo::soft_delete(&state.pool, project_id, auth.user_id).await?;
    if !removed {
        return Err(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }
        .into());
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/archive
///
/// Archive a closed project (soft-delete + cancel).
pub async fn archive_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let project = projects::archive(&state, &auth, project_id).await?;
    Ok(Json(json!({ "data": project })))
}

/// POST /api/v1/projects/{id}/unarchive
///
/// Restore an archived project's visibility (it stays cancelled).
pub async fn unarchive_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let project = projects::unarchive(&state, &auth, project_id).await?;
    Ok(Json(json!({ "data": project })))
}

/// PUT /api/v1/projects/{id}/complete
///
/// Complete a project: issue its payment and mark it completed.
pub async fn complete_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let (project, payment) = projects::complete(&state, &auth, project_id).await?;
    Ok(Json(json!({
        "data": { "project": project, "payment": payment }
    })))
}

/// PUT /api/v1/projects/{id}/progress
///
/// Move a project's progress status directly (no payment on this path).
pub async fn update_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateProgressRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let target = input
        .progress_status
        .parse::<ProgressStatus>()
        .map_err(CoreError::Validation)?;

    let project = projects::update_progress(&state, &auth, project_id, target).await?;
    Ok(Json(json!({ "data": project })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags(None), Vec::<String>::new());
        assert_eq!(split_tags(Some("rust, web , ")), vec!["rust", "web"]);
    }
}
