pub mod application;
pub mod dashboard;
pub mod favorite;
pub mod health;
pub mod notification;
pub mod profile;
pub mod project;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                        notification WebSocket
///
/// /users                                     provision user (admin, POST)
/// /users/{id}                                get user (self or admin)
///
/// /projects                                  list open (GET), create (POST)
/// /projects/client                           client's own listing (GET)
/// /projects/{id}                             get, update, soft-delete
/// /projects/{id}/archive                     archive (POST)
/// /projects/{id}/unarchive                   unarchive (POST)
/// /projects/{id}/complete                    complete + pay (PUT)
/// /projects/{id}/progress                    move progress status (PUT)
/// /projects/{id}/applications                apply (POST), review (GET)
///
/// /applications/mine                         freelancer's applications (GET)
/// /applications/client                       client's application overview (GET)
/// /applications/{id}/status                  approve / reject (PUT)
///
/// /notifications                             list (GET)
/// /notifications/read-all                    mark all read (POST)
/// /notifications/unread-count                unread count (GET)
/// /notifications/{id}/read                   mark read (POST)
/// /notifications/{id}                        delete (DELETE)
///
/// /favorites                                 list bookmarks (GET)
/// /favorites/{project_id}                    bookmark (POST), remove (DELETE)
///
/// /dashboard/client/metrics                  client project metrics (GET)
/// /dashboard/freelancer/stats                approved-project stats (GET)
/// /dashboard/freelancer/applications         application status counts (GET)
/// /dashboard/freelancer/earnings             earnings graph (GET, ?year)
/// /dashboard/freelancer/payments             payment history (GET)
///
/// /profile/client                            upsert client profile (PUT)
/// /profile/freelancer                        upsert freelancer profile (PUT)
/// /profile/visits                            recent visitors (GET)
/// /profile/{user_id}                         public profile view (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/users", user::router())
        .nest("/projects", project::router())
        .nest("/applications", application::router())
        .nest("/notifications", notification::router())
        .nest("/favorites", favorite::router())
        .nest("/dashboard", dashboard::router())
        .nest("/profile", profile::router())
}
