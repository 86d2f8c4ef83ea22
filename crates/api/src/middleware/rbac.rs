//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement. Matching on the closed [`Role`] enum is exhaustive,
//! so adding a role forces every guard to be revisited.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use gigboard_core::error::CoreError;
use gigboard_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `client` role (admins pass too). Rejects with 403 otherwise.
///
/// ```ignore
/// async fn client_only(RequireClient(user): RequireClient) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireClient(pub AuthUser);

impl FromRequestParts<AppState> for RequireClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Client | Role::Admin => Ok(RequireClient(user)),
            Role::Freelancer => Err(AppError::Core(CoreError::Forbidden(
                "Client role required".into(),
            ))),
        }
    }
}

/// Requires the `freelancer` role. Rejects with 403 Forbidden otherwise.
pub struct RequireFreelancer(pub AuthUser);

impl FromRequestParts<AppState> for RequireFreelancer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Freelancer => Ok(RequireFreelancer(user)),
            Role::Client | Role::Admin => Err(AppError::Core(CoreError::Forbidden(
                "Freelancer role required".into(),
            ))),
        }
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Admin => Ok(RequireAdmin(user)),
            Role::Client | Role::Freelancer => Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            ))),
        }
    }
}
