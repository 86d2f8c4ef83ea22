//! Route definitions for the `/profile` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// PUT /client       -> upsert_client_profile
/// PUT /freelancer   -> upsert_freelancer_profile
/// GET /visits       -> list_visits
/// GET /{user_id}    -> get_profile (records a visit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/client", put(profile::upsert_client_profile))
        .route("/freelancer", put(profile::upsert_freelancer_profile))
        .route("/visits", get(profile::list_visits))
        .route("/{user_id}", get(profile::get_profile))
}
