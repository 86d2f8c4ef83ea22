//! Handlers for applications: applying, reviewing, deciding.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use gigboard_core::error::CoreError;
use gigboard_core::types::DbId;
use gigboard_core::workflow::ApplicationStatus;
use gigboard_db::models::application::CreateApplication;
use gigboard_db::repositories::{ApplicationRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireClient, RequireFreelancer};
use crate::services::applications;
use crate::state::AppState;

/// Body for `PUT /applications/{id}/status`.
///
/// `status` arrives as a plain string and is parsed by hand so an unknown
/// value surfaces as a validation error, not a body-rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// POST /api/v1/projects/{project_id}/applications
///
/// Apply to an open project as the authenticated freelancer.
pub async fn apply(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateApplication>,
) -> AppResult<impl IntoResponse> {
    let application = applications::apply(&state, &auth, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": application }))))
}

/// GET /api/v1/projects/{project_id}/applications
///
/// List a project's applicants with freelancer display info. Owning client
/// or admin only.
pub async fn list_for_project(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if !auth.is_owner_or_admin(project.client_id) {
        return Err(CoreError::Forbidden(
            "Only the owning client or an admin can review applications".into(),
        )
        .into());
    }

    let applications = ApplicationRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(json!({ "data": applications })))
}

/// GET /api/v1/applications/mine
///
/// The authenticated freelancer's applications with project summaries.
pub async fn list_mine(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let applications = ApplicationRepo::list_for_freelancer(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": applications })))
}

/// GET /api/v1/applications/client
///
/// Every application across the authenticated client's projects.
pub async fn list_for_client(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let applications = ApplicationRepo::list_for_client(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": applications })))
}

/// PUT /api/v1/applications/{id}/status
///
/// Approve or reject an application, cascading into the project lifecycle.
pub async fn update_status(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Path(application_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let status = input
        .status
        .parse::<ApplicationStatus>()
        .map_err(CoreError::Validation)?;

    let application = applications::update_status(&state, &auth, application_id, status).await?;
    Ok(Json(json!({ "data": application })))
}
