//! Integration tests for the notification center endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

/// Seed one client-side notification by having a freelancer apply.
async fn seed_application_notification(
    app: &axum::Router,
    client_token: &str,
    freelancer_token: &str,
) -> i64 {
    let project_id = common::create_open_project(app, client_token, "Notifying work").await;
    common::apply_to_project(app, freelancer_token, project_id).await;

    let response = common::get(app, "/api/v1/notifications", Some(client_token)).await;
    let body = common::body_json(response).await;
    body["data"][0]["id"].as_i64().expect("notification id")
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_listing_carries_sender_display_info(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "recipient@test.io").await;
    let (freelancer, freelancer_token) = common::seed_freelancer(&pool, "sender@test.io").await;

    seed_application_notification(&app, &client_token, &freelancer_token).await;

    let response = common::get(&app, "/api/v1/notifications", Some(&client_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let notifications = body["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);

    let n = &notifications[0];
    assert_eq!(n["type"], "application");
    assert_eq!(n["read"], false);
    assert_eq!(n["sender_id"], freelancer.id);
    assert_eq!(n["sender_fullname"], freelancer.fullname);
    assert_eq!(n["sender_role"], "freelancer");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_read_flow(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "reader@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "writer@test.io").await;

    let notification_id =
        seed_application_notification(&app, &client_token, &freelancer_token).await;

    let response = common::get(
        &app,
        "/api/v1/notifications/unread-count",
        Some(&client_token),
    )
    .await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["count"], 1);

    let response = common::post(
        &app,
        &format!("/api/v1/notifications/{notification_id}/read"),
        Some(&client_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["read"], true);

    let response = common::get(
        &app,
        "/api/v1/notifications/unread-count",
        Some(&client_token),
    )
    .await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_read_all(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "bulk@test.io").await;
    let (_, fl_a_token) = common::seed_freelancer(&pool, "bulk-a@test.io").await;
    let (_, fl_b_token) = common::seed_freelancer(&pool, "bulk-b@test.io").await;

    let project_id = common::create_open_project(&app, &client_token, "Popular gig").await;
    common::apply_to_project(&app, &fl_a_token, project_id).await;
    common::apply_to_project(&app, &fl_b_token, project_id).await;

    let response = common::post(&app, "/api/v1/notifications/read-all", Some(&client_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["marked_read"], 2);

    // Idempotent: nothing left to mark.
    let response = common::post(&app, "/api/v1/notifications/read-all", Some(&client_token)).await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["marked_read"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notifications_are_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "mine@test.io").await;
    let (_, freelancer_token) = common::seed_freelancer(&pool, "applicant@test.io").await;
    let (_, snoop_token) = common::seed_client(&pool, "snoop@test.io").await;

    let notification_id =
        seed_application_notification(&app, &client_token, &freelancer_token).await;

    // Someone else's list does not contain it.
    let response = common::get(&app, "/api/v1/notifications", Some(&snoop_token)).await;
    let body = common::body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    // And they cannot mark or delete it.
    let response = common::post(
        &app,
        &format!("/api/v1/notifications/{notification_id}/read"),
        Some(&snoop_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::delete(
        &app,
        &format!("/api/v1/notifications/{notification_id}"),
        Some(&snoop_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner can delete it.
    let response = common::delete(
        &app,
        &format!("/api/v1/notifications/{notification_id}"),
        Some(&client_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::get(&app, "/api/v1/notifications", Some(&client_token)).await;
    let body = common::body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_system_notifications_have_no_sender(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = common::seed_client(&pool, "system@test.io").await;
    let project_id = common::create_open_project(&app, &client_token, "Status watch").await;

    // A progress change produces a system notification (no sender).
    common::put_json(
        &app,
        &format!("/api/v1/projects/{project_id}/progress"),
        Some(&client_token),
        json!({ "progress_status": "cancelled" }),
    )
    .await;

    let response = common::get(&app, "/api/v1/notifications", Some(&client_token)).await;
    let body = common::body_json(response).await;
    let notifications = body["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "project_status");
    assert!(notifications[0]["sender_id"].is_null());
    assert!(notifications[0]["sender_fullname"].is_null());
}
