//! Route definitions for the `/dashboard` metrics endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /client/metrics            -> client_metrics
/// GET /freelancer/stats          -> freelancer_stats
/// GET /freelancer/applications   -> freelancer_applications
/// GET /freelancer/earnings       -> freelancer_earnings (?year)
/// GET /freelancer/payments       -> freelancer_payments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/client/metrics", get(dashboard::client_metrics))
        .route("/freelancer/stats", get(dashboard::freelancer_stats))
        .route(
            "/freelancer/applications",
            get(dashboard::freelancer_applications),
        )
        .route("/freelancer/earnings", get(dashboard::freelancer_earnings))
        .route("/freelancer/payments", get(dashboard::freelancer_payments))
}
