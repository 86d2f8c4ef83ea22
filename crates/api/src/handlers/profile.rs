//! Profile endpoints: role-specific profile upserts, public profile views,
//! and the visit log.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use gigboard_core::error::CoreError;
use gigboard_core::roles::Role;
use gigboard_core::types::DbId;
use gigboard_db::models::profile::{UpsertClientProfile, UpsertFreelancerProfile};
use gigboard_db::repositories::{ProfileRepo, ProfileVisitRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireClient, RequireFreelancer};
use crate::state::AppState;

/// Query parameters for the visitor log.
#[derive(Debug, Default, Deserialize)]
pub struct VisitsQuery {
    /// Maximum number of visitors to return. Defaults to 20.
    pub limit: Option<i64>,
}

const DEFAULT_VISITS_LIMIT: i64 = 20;

/// PUT /api/v1/profile/client
///
/// Create or replace the authenticated client's profile.
pub async fn upsert_client_profile(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<UpsertClientProfile>,
) -> AppResult<Json<serde_json::Value>> {
    let profile = ProfileRepo::upsert_client(&state.pool, auth.user_id, &input).await?;
    Ok(Json(json!({ "data": profile })))
}

/// PUT /api/v1/profile/freelancer
///
/// Create or replace the authenticated freelancer's profile.
pub async fn upsert_freelancer_profile(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
    Json(input): Json<UpsertFreelancerProfile>,
) -> AppResult<Json<serde_json::Value>> {
    let profile = ProfileRepo::upsert_freelancer(&state.pool, auth.user_id, &input).await?;
    Ok(Json(json!({ "data": profile })))
}

/// GET /api/v1/profile/{user_id}
///
/// View a user's public profile (role-specific fields). Viewing someone
/// else's profile records a visit; recording is best-effort and never
/// fails the request.
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    let profile = match user.role {
        Role::Client => {
            let p = ProfileRepo::find_client(&state.pool, user_id).await?;
            json!({ "user": user, "client_profile": p })
        }
        Role::Freelancer => {
            let p = ProfileRepo::find_freelancer(&state.pool, user_id).await?;
            json!({ "user": user, "freelancer_profile": p })
        }
        Role::Admin => json!({ "user": user }),
    };

    // Self-visits are not logged.
    if auth.user_id != user_id {
        if let Err(e) = ProfileVisitRepo::record(&state.pool, user_id, auth.user_id).await {
            tracing::warn!(user_id, visitor_id = auth.user_id, error = %e, "Failed to record profile visit");
        }
    }

    Ok(Json(json!({ "data": profile })))
}

/// GET /api/v1/profile/visits
///
/// The authenticated user's recent profile visitors plus the all-time
/// visit count.
pub async fn list_visits(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<VisitsQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit.unwrap_or(DEFAULT_VISITS_LIMIT).clamp(1, 100);
    let visits = ProfileVisitRepo::list_for_owner(&state.pool, auth.user_id, limit).await?;
    let total = ProfileVisitRepo::count_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(json!({
        "data": { "visits": visits, "total": total }
    })))
}
