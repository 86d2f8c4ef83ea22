//! Route definitions for the `/projects` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{application, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                      -> list_projects (open listing)
/// POST   /                      -> create_project
/// GET    /client                -> list_client_projects
/// GET    /{id}                  -> get_project
/// PUT    /{id}                  -> update_project
/// DELETE /{id}                  -> delete_project (soft)
/// POST   /{id}/archive          -> archive_project
/// POST   /{id}/unarchive        -> unarchive_project
/// PUT    /{id}/complete         -> complete_project
/// PUT    /{id}/progress         -> update_progress
/// POST   /{id}/applications     -> apply
/// GET    /{id}/applications     -> list_for_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(project::list_projects).post(project::create_project),
        )
        .route("/client", get(project::list_client_projects))
        .route(
            "/{id}",
            get(project::get_project)
                .put(project::update_project)
                .delete(project::delete_project),
        )
        .route("/{id}/archive", post(project::archive_project))
        .route("/{id}/unarchive", post(project::unarchive_project))
        .route("/{id}/complete", put(project::complete_project))
        .route("/{id}/progress", put(project::update_progress))
        .route(
            "/{id}/applications",
            post(application::apply).get(application::list_for_project),
        )
}
