//! Handlers for a freelancer's project bookmarks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use gigboard_core::error::CoreError;
use gigboard_core::lifecycle::ProjectStatus;
use gigboard_core::types::DbId;
use gigboard_db::repositories::{FavoriteRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireFreelancer;
use crate::state::AppState;

/// POST /api/v1/favorites/{project_id}
///
/// Bookmark an open project. Duplicates are refused with 409 via the
/// unique constraint.
pub async fn add_favorite(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if project.status != ProjectStatus::Open {
        return Err(CoreError::InvalidState("Only open projects can be bookmarked".into()).into());
    }

    let favorite = FavoriteRepo::create(&state.pool, auth.user_id, project_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": favorite }))))
}

/// DELETE /api/v1/favorites/{project_id}
///
/// Remove a bookmark. 204 on success, 404 if it was never bookmarked.
pub async fn remove_favorite(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = FavoriteRepo::delete(&state.pool, auth.user_id, project_id).await?;
    if !removed {
        return Err(CoreError::NotFound {
            entity: "Favorite",
            id: project_id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/favorites
///
/// List the authenticated freelancer's bookmarks with project summaries.
/// Projects archived since bookmarking drop out of the listing.
pub async fn list_favorites(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let favorites = FavoriteRepo::list_for_freelancer(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": favorites })))
}
