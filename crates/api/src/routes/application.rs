//! Route definitions for the `/applications` resource.
//!
//! Applying itself lives under `/projects/{id}/applications`; this router
//! carries the cross-project views and the decision endpoint.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET /mine         -> list_mine (freelancer)
/// GET /client       -> list_for_client (client overview)
/// PUT /{id}/status  -> update_status (approve / reject)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mine", get(application::list_mine))
        .route("/client", get(application::list_for_client))
        .route("/{id}/status", put(application::update_status))
}
