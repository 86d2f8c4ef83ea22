//! Integration tests for the application workflow: applying, deciding, and
//! the project-lifecycle cascades a decision triggers.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

async fn project_progress(app: &axum::Router, token: &str, project_id: i64) -> String {
    let response = common::get(app, &format!("/api/v1/projects/{project_id}"), Some(token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    body["data"]["progress_status"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_apply_and_double_apply(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "client@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "fl@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "Open gig").await;

    let application_id = common::apply_to_project(&app, &freelancer_token, project_id).await;
    assert!(application_id > 0);

    // Applying again is a conflict, enforced by the unique constraint.
    let response = common::post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/applications"),
        Some(&freelancer_token),
        json!({ "message": "second try" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = common::body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_apply_to_closed_project(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "closed@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "fl2@test.io").await;

    let response = common::post_json(
        &app,
        "/api/v1/projects",
        Some(&client_token),
        json!({ "title": "Hidden draft", "is_draft": true }),
    )
    .await;
    let body = common::body_json(response).await;
    let draft_id = body["data"]["id"].as_i64().unwrap();

    let response = common::post_json(
        &app,
        &format!("/api/v1/projects/{draft_id}/applications"),
        Some(&freelancer_token),
        json!({ "message": "hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["code"], "INVALID_STATE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_clients_cannot_apply(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "notafl@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "Self serve").await;

    let response = common::post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/applications"),
        Some(&client_token),
        json!({ "message": "me" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_only_one_approval_per_project(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "picky@test.io").await;
    let (_, fl_a_token) = common::seed_freelancer(&pool, "fl-a@test.io").await;
    let (_, fl_b_token) = common::seed_freelancer(&pool, "fl-b@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "One seat").await;

    let app_a = common::apply_to_project(&app, &fl_a_token, project_id).await;
    let app_b = common::apply_to_project(&app, &fl_b_token, project_id).await;

    let response = common::put_json(
        &app,
        &format!("/api/v1/applications/{app_a}/status"),
        Some(&client_token),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::put_json(
        &app,
        &format!("/api/v1/applications/{app_b}/status"),
        Some(&client_token),
        json!({ "status": "rejected" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Approving the second while the first holds the seat is a conflict.
    let response = common::put_json(
        &app,
        &format!("/api/v1/applications/{app_b}/status"),
        Some(&client_token),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = common::body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rejecting_the_approved_freelancer_cancels_the_project(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "regret@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "fl3@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "Changed my mind").await;
    let application_id = common::apply_to_project(&app, &freelancer_token, project_id).await;

    let uri = format!("/api/v1/applications/{application_id}/status");
    common::put_json(&app, &uri, Some(&client_token), json!({ "status": "approved" })).await;
    assert_eq!(
        project_progress(&app, &client_token, project_id).await,
        "ongoing"
    );

    // Unseating the approved freelancer cancels the project.
    let response =
        common::put_json(&app, &uri, Some(&client_token), json!({ "status": "rejected" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["status"], "rejected");
    assert_eq!(
        project_progress(&app, &client_token, project_id).await,
        "cancelled"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rejecting_a_pending_application_changes_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "calm@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "fl4@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "Still hiring").await;
    let application_id = common::apply_to_project(&app, &freelancer_token, project_id).await;

    let response = common::put_json(
        &app,
        &format!("/api/v1/applications/{application_id}/status"),
        Some(&client_token),
        json!({ "status": "rejected" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The project keeps accepting applications.
    assert_eq!(
        project_progress(&app, &client_token, project_id).await,
        "ongoing"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_decision_must_be_approve_or_reject(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "strict@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "fl5@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "No undo").await;
    let application_id = common::apply_to_project(&app, &freelancer_token, project_id).await;

    let response = common::put_json(
        &app,
        &format!("/api/v1/applications/{application_id}/status"),
        Some(&client_token),
        json!({ "status": "pending" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // An unknown value gets the same envelope, not a body-rejection.
    let response = common::put_json(
        &app,
        &format!("/api/v1/applications/{application_id}/status"),
        Some(&client_token),
        json!({ "status": "withdrawn" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_only_the_owning_client_decides(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, owner_token) = common::seed_client(&pool, "ownerc@test.io").await;
    let (_, other_token) = common::seed_client(&pool, "otherc@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "fl6@test.io").await;
    let project_id = common::create_open_project(&app, &owner_token, "Private hiring").await;
    let application_id = common::apply_to_project(&app, &freelancer_token, project_id).await;

    let response = common::put_json(
        &app,
        &format!("/api/v1/applications/{application_id}/status"),
        Some(&other_token),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_application_listings(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "lister@test.io").await;
    let (_, other_client_token) = common::seed_client(&pool, "nosy@test.io").await;
    let (freelancer, freelancer_token) = common::seed_freelancer(&pool, "fl7@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "Visible work").await;
    common::apply_to_project(&app, &freelancer_token, project_id).await;

    // The owning client sees applicants with display info.
    let uri = format!("/api/v1/projects/{project_id}/applications");
    let response = common::get(&app, &uri, Some(&client_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let applicants = body["data"].as_array().unwrap();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0]["freelancer_id"], freelancer.id);
    assert_eq!(applicants[0]["freelancer_email"], "fl7@test.io");

    // A different client does not.
    let response = common::get(&app, &uri, Some(&other_client_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The freelancer sees their own applications with project summaries.
    let response = common::get(&app, "/api/v1/applications/mine", Some(&freelancer_token)).await;
    let body = common::body_json(response).await;
    let mine = body["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["project_title"], "Visible work");
    assert_eq!(mine[0]["status"], "pending");

    // The client's cross-project overview includes it too.
    let response = common::get(&app, "/api/v1/applications/client", Some(&client_token)).await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_decisions_notify_the_freelancer(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "notify@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "fl8@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "Good news").await;
    let application_id = common::apply_to_project(&app, &freelancer_token, project_id).await;

    common::put_json(
        &app,
        &format!("/api/v1/applications/{application_id}/status"),
        Some(&client_token),
        json!({ "status": "approved" }),
    )
    .await;

    let response = common::get(&app, "/api/v1/notifications", Some(&freelancer_token)).await;
    let body = common::body_json(response).await;
    let notifications = body["data"].as_array().unwrap();
    assert!(notifications
        .iter()
        .any(|n| n["type"] == "application_status"));

    // And applying notified the client.
    let response = common::get(&app, "/api/v1/notifications", Some(&client_token)).await;
    let body = common::body_json(response).await;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["type"] == "application"));
}
