//! Integration tests for the project repository: lifecycle writes, the
//! generated status column, and soft-delete visibility.

use gigboard_core::lifecycle::{ProgressStatus, ProjectStatus};
use gigboard_core::roles::Role;
use gigboard_db::models::project::{
    ClientProjectFilters, CreateProject, ProjectFilters, ProjectSort,
};
use gigboard_db::models::user::CreateUser;
use gigboard_db::repositories::{ApplicationRepo, PaymentRepo, ProjectRepo, UserRepo};
use sqlx::PgPool;

async fn seed_client(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            fullname: "Test Client".into(),
            email: email.into(),
            role: Role::Client,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_freelancer(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            fullname: "Test Freelancer".into(),
            email: email.into(),
            role: Role::Freelancer,
        },
    )
    .await
    .unwrap()
    .id
}

fn published_project(title: &str) -> CreateProject {
    CreateProject {
        title: Some(title.into()),
        description: Some("A test project".into()),
        budget: Some(5000),
        tags: vec!["rust".into(), "backend".into()],
        deadline: Some(chrono::Utc::now() + chrono::Duration::days(30)),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_is_derived_from_progress(pool: PgPool) {
    let client_id = seed_client(&pool, "derive@test.io").await;

    let draft = ProjectRepo::create(
        &pool,
        client_id,
        &CreateProject::default(),
        ProgressStatus::Draft,
    )
    .await
    .unwrap();
    assert_eq!(draft.status, ProjectStatus::Closed);

    let mut conn = pool.acquire().await.unwrap();
    let ongoing = ProjectRepo::set_progress(&mut conn, draft.id, ProgressStatus::Ongoing)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ongoing.status, ProjectStatus::Open);

    let cancelled = ProjectRepo::set_progress(&mut conn, draft.id, ProgressStatus::Cancelled)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, ProjectStatus::Closed);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_open_listing_excludes_drafts_and_deleted(pool: PgPool) {
    let client_id = seed_client(&pool, "listing@test.io").await;

    let visible = ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Visible"),
        ProgressStatus::Ongoing,
    )
    .await
    .unwrap();
    let draft = ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Draft"),
        ProgressStatus::Draft,
    )
    .await
    .unwrap();
    let deleted = ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Deleted"),
        ProgressStatus::Ongoing,
    )
    .await
    .unwrap();
    ProjectRepo::soft_delete(&pool, deleted.id, client_id)
        .await
        .unwrap();

    let filters = ProjectFilters::default();
    let listed = ProjectRepo::list_open(&pool, &filters, ProjectSort::default(), 50, 0)
        .await
        .unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();

    assert!(ids.contains(&visible.id));
    assert!(!ids.contains(&draft.id));
    assert!(!ids.contains(&deleted.id));

    let total = ProjectRepo::count_open(&pool, &filters).await.unwrap();
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_matches_title_description_and_tags(pool: PgPool) {
    let client_id = seed_client(&pool, "search@test.io").await;

    ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Embedded firmware audit"),
        ProgressStatus::Ongoing,
    )
    .await
    .unwrap();

    for term in ["firmware", "test project", "rust"] {
        let filters = ProjectFilters {
            search: Some(term.into()),
            ..Default::default()
        };
        let total = ProjectRepo::count_open(&pool, &filters).await.unwrap();
        assert_eq!(total, 1, "search term '{term}' should match");
    }

    let filters = ProjectFilters {
        search: Some("nonexistent".into()),
        ..Default::default()
    };
    assert_eq!(ProjectRepo::count_open(&pool, &filters).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_budget_filter(pool: PgPool) {
    let client_id = seed_client(&pool, "budget@test.io").await;

    let mut cheap = published_project("Cheap");
    cheap.budget = Some(100);
    let mut dear = published_project("Dear");
    dear.budget = Some(50_000);
    ProjectRepo::create(&pool, client_id, &cheap, ProgressStatus::Ongoing)
        .await
        .unwrap();
    ProjectRepo::create(&pool, client_id, &dear, ProgressStatus::Ongoing)
        .await
        .unwrap();

    let filters = ProjectFilters {
        min_budget: Some(1000),
        ..Default::default()
    };
    assert_eq!(ProjectRepo::count_open(&pool, &filters).await.unwrap(), 1);

    let filters = ProjectFilters {
        min_budget: Some(50),
        max_budget: Some(500),
        ..Default::default()
    };
    assert_eq!(ProjectRepo::count_open(&pool, &filters).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deadline_filter_and_sort(pool: PgPool) {
    let client_id = seed_client(&pool, "deadline@test.io").await;

    let mut urgent = published_project("Urgent");
    urgent.deadline = Some(chrono::Utc::now() + chrono::Duration::days(7));
    urgent.budget = Some(1000);
    let mut relaxed = published_project("Relaxed");
    relaxed.deadline = Some(chrono::Utc::now() + chrono::Duration::days(60));
    relaxed.budget = Some(9000);

    let urgent = ProjectRepo::create(&pool, client_id, &urgent, ProgressStatus::Ongoing)
        .await
        .unwrap();
    let relaxed = ProjectRepo::create(&pool, client_id, &relaxed, ProgressStatus::Ongoing)
        .await
        .unwrap();

    let cutoff = chrono::Utc::now() + chrono::Duration::days(30);
    let filters = ProjectFilters {
        deadline_before: Some(cutoff),
        ..Default::default()
    };
    let listed = ProjectRepo::list_open(&pool, &filters, ProjectSort::default(), 50, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, urgent.id);

    let filters = ProjectFilters {
        deadline_after: Some(cutoff),
        ..Default::default()
    };
    assert_eq!(ProjectRepo::count_open(&pool, &filters).await.unwrap(), 1);

    // Sorting by budget ascending puts the cheap project first.
    let sort = ProjectSort::parse(Some("budget"), Some("asc"));
    let listed = ProjectRepo::list_open(&pool, &ProjectFilters::default(), sort, 50, 0)
        .await
        .unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![urgent.id, relaxed.id]);

    // Unrecognized sort input falls back to created_at DESC.
    let sort = ProjectSort::parse(Some("budget; DROP TABLE projects"), Some("sideways"));
    let listed = ProjectRepo::list_open(&pool, &ProjectFilters::default(), sort, 50, 0)
        .await
        .unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![relaxed.id, urgent.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_archive_forces_cancelled_and_restore_keeps_it(pool: PgPool) {
    let client_id = seed_client(&pool, "archive@test.io").await;
    let project = ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Archive me"),
        ProgressStatus::Draft,
    )
    .await
    .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let archived = ProjectRepo::archive(&mut conn, project.id, client_id)
        .await
        .unwrap()
        .unwrap();
    assert!(archived.deleted);
    assert_eq!(archived.progress_status, ProgressStatus::Cancelled);
    assert_eq!(archived.deleted_by, Some(client_id));

    let restored = ProjectRepo::restore(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!restored.deleted);
    assert!(restored.deleted_at.is_none());
    // Restoring visibility does not reopen the project.
    assert_eq!(restored.progress_status, ProgressStatus::Cancelled);
    assert_eq!(restored.status, ProjectStatus::Closed);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_payment_link_is_write_once(pool: PgPool) {
    let client_id = seed_client(&pool, "payonce-client@test.io").await;
    let freelancer_id = seed_freelancer(&pool, "payonce-fl@test.io").await;
    let project = ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Pay once"),
        ProgressStatus::Ongoing,
    )
    .await
    .unwrap();
    ApplicationRepo::create(&pool, project.id, freelancer_id, None)
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let payment = PaymentRepo::create(&mut tx, project.id, freelancer_id, 5000)
        .await
        .unwrap();
    let completed = ProjectRepo::set_completed(&mut tx, project.id, payment.id)
        .await
        .unwrap();
    assert!(completed.is_some());
    tx.commit().await.unwrap();

    // A second completion attempt finds the link already set.
    let mut tx = pool.begin().await.unwrap();
    let second = PaymentRepo::create(&mut tx, project.id, freelancer_id, 5000)
        .await
        .unwrap();
    let relinked = ProjectRepo::set_completed(&mut tx, project.id, second.id)
        .await
        .unwrap();
    assert!(relinked.is_none());
    tx.rollback().await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_leaves_omitted_fields(pool: PgPool) {
    let client_id = seed_client(&pool, "update@test.io").await;
    let project = ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Original title"),
        ProgressStatus::Ongoing,
    )
    .await
    .unwrap();

    let input = gigboard_db::models::project::UpdateProject {
        budget: Some(9999),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&pool, project.id, &input)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.budget, Some(9999));
    assert_eq!(updated.title.as_deref(), Some("Original title"));
    assert_eq!(updated.tags, project.tags);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_client_listing_filters(pool: PgPool) {
    let client_id = seed_client(&pool, "mine@test.io").await;
    let other_id = seed_client(&pool, "other@test.io").await;

    ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Mine ongoing"),
        ProgressStatus::Ongoing,
    )
    .await
    .unwrap();
    let archived = ProjectRepo::create(
        &pool,
        client_id,
        &published_project("Mine archived"),
        ProgressStatus::Draft,
    )
    .await
    .unwrap();
    ProjectRepo::soft_delete(&pool, archived.id, client_id)
        .await
        .unwrap();
    ProjectRepo::create(
        &pool,
        other_id,
        &published_project("Not mine"),
        ProgressStatus::Ongoing,
    )
    .await
    .unwrap();

    let filters = ClientProjectFilters::default();
    assert_eq!(
        ProjectRepo::count_for_client(&pool, client_id, &filters)
            .await
            .unwrap(),
        1
    );

    let filters = ClientProjectFilters {
        include_archived: true,
        ..Default::default()
    };
    assert_eq!(
        ProjectRepo::count_for_client(&pool, client_id, &filters)
            .await
            .unwrap(),
        2
    );

    let filters = ClientProjectFilters {
        progress_status: Some(ProgressStatus::Ongoing),
        include_archived: true,
    };
    assert_eq!(
        ProjectRepo::count_for_client(&pool, client_id, &filters)
            .await
            .unwrap(),
        1
    );
}
