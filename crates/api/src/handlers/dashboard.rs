//! Dashboard endpoints: aggregated metrics for clients and freelancers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use gigboard_db::repositories::{ApplicationRepo, DashboardRepo, PaymentRepo};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireClient, RequireFreelancer};
use crate::state::AppState;

/// Query parameters for the earnings graph.
#[derive(Debug, Default, Deserialize)]
pub struct EarningsQuery {
    /// Restrict to one calendar year (e.g. `2026`).
    pub year: Option<i32>,
}

/// GET /api/v1/dashboard/client/metrics
///
/// Project counts for the authenticated client, bucketed by lifecycle
/// state, derived status, archive flag, recency, and budget band.
pub async fn client_metrics(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let metrics = DashboardRepo::client_project_metrics(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": metrics })))
}

/// GET /api/v1/dashboard/freelancer/stats
///
/// Progress-status counts over projects the authenticated freelancer is
/// approved on.
pub async fn freelancer_stats(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let stats = DashboardRepo::freelancer_project_stats(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": stats })))
}

/// GET /api/v1/dashboard/freelancer/applications
///
/// Per-status application counts for the authenticated freelancer.
pub async fn freelancer_applications(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let counts = ApplicationRepo::status_counts_for_freelancer(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": counts })))
}

/// GET /api/v1/dashboard/freelancer/earnings
///
/// Total and per-month earnings for the authenticated freelancer,
/// optionally restricted to one year.
pub async fn freelancer_earnings(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
    Query(params): Query<EarningsQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let total = PaymentRepo::total_for_freelancer(&state.pool, auth.user_id).await?;
    let monthly = PaymentRepo::monthly_earnings(&state.pool, auth.user_id, params.year).await?;
    Ok(Json(json!({
        "data": { "total": total, "monthly": monthly }
    })))
}

/// GET /api/v1/dashboard/freelancer/payments
///
/// The authenticated freelancer's payment history, most recent first.
pub async fn freelancer_payments(
    RequireFreelancer(auth): RequireFreelancer,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let payments = PaymentRepo::list_for_freelancer(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": payments })))
}
