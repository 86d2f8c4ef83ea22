//! The project lifecycle engine.
//!
//! State transitions that touch more than the projects table (completion
//! writes a payment; archive couples two axes) run here, each inside one
//! transaction opened on the shared pool. The first statement of every
//! transaction is a `SELECT ... FOR UPDATE` on the project row, so two
//! concurrent transitions serialize and the loser re-checks against the
//! winner's committed state.

use gigboard_core::error::CoreError;
use gigboard_core::lifecycle::{ProgressStatus, ProjectStatus};
use gigboard_core::notifications::{TYPE_PROJECT, TYPE_PROJECT_STATUS};
use gigboard_core::types::DbId;
use gigboard_db::models::notification::CreateNotification;
use gigboard_db::models::payment::Payment;
use gigboard_db::models::project::{CreateProject, Project, ProjectWithClient};
use gigboard_db::repositories::{ApplicationRepo, PaymentRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Create a project for `client_id`.
///
/// Drafts may omit every content field. Publishing directly (non-draft)
/// requires title, description, budget, and deadline, and starts the
/// project `ongoing` (open to applications). Returns the project joined
/// with the client's display info and profile.
pub async fn create(
    state: &AppState,
    client_id: DbId,
    input: &CreateProject,
    is_draft: bool,
) -> AppResult<ProjectWithClient> {
    if let Some(budget) = input.budget {
        if budget < 0 {
            return Err(CoreError::Validation("budget must not be negative".into()).into());
        }
    }

    if !is_draft {
        let missing = [
            ("title", input.title.as_deref().map_or(true, str::is_empty)),
            (
                "description",
                input.description.as_deref().map_or(true, str::is_empty),
            ),
            ("budget", input.budget.is_none()),
            ("deadline", input.deadline.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "publishing a project requires: {}",
                missing.join(", ")
            ))
            .into());
        }
    }

    let progress = if is_draft {
        ProgressStatus::Draft
    } else {
        ProgressStatus::Ongoing
    };

    let created = ProjectRepo::create(&state.pool, client_id, input, progress).await?;
    let project = ProjectRepo::find_with_client(&state.pool, created.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: created.id,
        })?;
    Ok(project)
}

/// Archive a project: soft-delete it and force its progress to
/// `cancelled`.
///
/// Only closed projects can be archived; an open project must first stop
/// accepting applications (complete, cancel, or revert to draft).
pub async fn archive(state: &AppState, auth: &AuthUser, project_id: DbId) -> AppResult<Project> {
    let mut tx = state.pool.begin().await?;

    let project = ProjectRepo::find_by_id_for_update(&mut tx, project_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if !auth.is_owner_or_admin(project.client_id) {
        return Err(CoreError::Forbidden("Only the owning client or an admin can archive a project".into()).into());
    }

    if project.status == ProjectStatus::Open {
        return Err(CoreError::InvalidState(
            "Open projects cannot be archived; close the project first".into(),
        )
        .into());
    }

    let archived = ProjectRepo::archive(&mut tx, project_id, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    tx.commit().await?;
    Ok(archived)
}

/// Restore an archived project's visibility.
///
/// Only the soft-delete axis is cleared: the project stays `cancelled`
/// until the client explicitly moves its progress again, so unarchiving
/// never silently reopens it to applications.
pub async fn unarchive(state: &AppState, auth: &AuthUser, project_id: DbId) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if project.client_id != auth.user_id {
        return Err(
            CoreError::Forbidden("Only the owning client can unarchive a project".into()).into(),
        );
    }

    ProjectRepo::restore(&state.pool, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })
        })
}

/// Complete a project: issue its payment and mark it `completed`, in one
/// transaction.
///
/// The payment amount is the project's budget and the payee is the
/// approved applicant. Completion is terminal and the payment link is
/// write-once; a second attempt fails before any write.
pub async fn complete(
    state: &AppState,
    auth: &AuthUser,
    project_id: DbId,
) -> AppResult<(Project, Payment)> {
    let mut tx = state.pool.begin().await?;

    let project = ProjectRepo::find_by_id_for_update(&mut tx, project_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if project.progress_status == ProgressStatus::Completed {
        return Err(CoreError::InvalidState("Project is already completed".into()).into());
    }

    if !auth.is_owner_or_admin(project.client_id) {
        return Err(CoreError::Forbidden(
            "Only the owning client or an admin can complete a project".into(),
        )
        .into());
    }

    let approved = ApplicationRepo::find_approved_for_project(&mut tx, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidState(
                "Project has no approved application to pay".into(),
            ))
        })?;

    let amount = project.budget.ok_or_else(|| {
        AppError::Core(CoreError::InvalidState(
            "Project has no budget; set one before completing".into(),
        ))
    })?;

    let payment = PaymentRepo::create(&mut tx, project_id, approved.freelancer_id, amount).await?;

    let completed = ProjectRepo::set_completed(&mut tx, project_id, payment.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Project already has a payment issued".into(),
            ))
        })?;

    tx.commit().await?;

    // Fan-out after commit; failures never surface.
    let title = completed.title.clone().unwrap_or_else(|| "Project".into());
    state
        .notifier
        .send(CreateNotification {
            user_id: approved.freelancer_id,
            sender_id: Some(auth.user_id),
            title: "Project completed".into(),
            message: format!("\"{title}\" was completed and your payment of {amount} was issued"),
            kind: TYPE_PROJECT,
        })
        .await;
    state
        .notifier
        .send(CreateNotification {
            user_id: completed.client_id,
            sender_id: None,
            title: "Payment issued".into(),
            message: format!("Payment of {amount} for \"{title}\" was issued"),
            kind: TYPE_PROJECT,
        })
        .await;

    Ok((completed, payment))
}

/// Move a project's progress status directly.
///
/// `completed` is terminal; everything else may move freely. The derived
/// open/closed status follows automatically. Note that completing a
/// project through this path does not issue a payment; `complete` is the
/// paying path.
pub async fn update_progress(
    state: &AppState,
    auth: &AuthUser,
    project_id: DbId,
    target: ProgressStatus,
) -> AppResult<Project> {
    let mut tx = state.pool.begin().await?;

    let project = ProjectRepo::find_by_id_for_update(&mut tx, project_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if !auth.is_owner_or_admin(project.client_id) {
        return Err(CoreError::Forbidden(
            "Only the owning client or an admin can change a project's progress".into(),
        )
        .into());
    }

    if !project.progress_status.can_transition_to(target) {
        return Err(CoreError::InvalidState(format!(
            "Cannot move a {} project to {target}",
            project.progress_status
        ))
        .into());
    }

    let updated = ProjectRepo::set_progress(&mut tx, project_id, target)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    tx.commit().await?;

    let title = updated.title.clone().unwrap_or_else(|| "Project".into());
    state
        .notifier
        .send(CreateNotification {
            user_id: updated.client_id,
            sender_id: None,
            title: "Project status changed".into(),
            message: format!("\"{title}\" is now {target}"),
            kind: TYPE_PROJECT_STATUS,
        })
        .await;

    if target == ProgressStatus::Completed {
        let mut conn = state.pool.acquire().await?;
        if let Some(approved) =
            ApplicationRepo::find_approved_for_project(&mut conn, project_id).await?
        {
            state
                .notifier
                .send(CreateNotification {
                    user_id: approved.freelancer_id,
                    sender_id: Some(auth.user_id),
                    title: "Project completed".into(),
                    message: format!("\"{title}\" was marked completed"),
                    kind: TYPE_PROJECT_STATUS,
                })
                .await;
        }
    }

    Ok(updated)
}
