//! User provisioning handlers.
//!
//! Users originate in the external identity provider; these endpoints let
//! an admin mirror them into the marketplace. A user's role is fixed at
//! creation and there is no endpoint that changes it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use gigboard_core::error::CoreError;
use gigboard_core::types::DbId;
use gigboard_db::models::user::CreateUser;
use gigboard_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/users
///
/// Provision a user (admin only). A duplicate email is refused with 409
/// via `uq_users_email`.
pub async fn create_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    if input.fullname.trim().is_empty() || input.email.trim().is_empty() {
        return Err(CoreError::Validation("fullname and email are required".into()).into());
    }

    let user = UserRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": user }))))
}

/// GET /api/v1/users/{id}
///
/// Fetch a user. Admins may fetch anyone; everyone else only themselves.
pub async fn get_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    if !auth.is_owner_or_admin(user_id) {
        return Err(CoreError::Forbidden("You can only view your own user record".into()).into());
    }

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    Ok(Json(json!({ "data": user })))
}
