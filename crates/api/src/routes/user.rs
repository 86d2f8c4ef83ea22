//! Route definitions for the `/users` resource (admin provisioning).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /       -> create_user (admin)
/// GET  /{id}   -> get_user (self or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create_user))
        .route("/{id}", get(user::get_user))
}
