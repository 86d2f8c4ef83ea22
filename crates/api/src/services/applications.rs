//! The application workflow: apply, approve, reject.
//!
//! Approval and rejection cascade into the project's lifecycle, so both run
//! in a transaction that locks the application row and then the project
//! row, in that order everywhere, to avoid lock cycles.

use gigboard_core::error::CoreError;
use gigboard_core::lifecycle::{ProgressStatus, ProjectStatus};
use gigboard_core::notifications::{TYPE_APPLICATION, TYPE_APPLICATION_STATUS};
use gigboard_core::types::DbId;
use gigboard_core::workflow::ApplicationStatus;
use gigboard_db::models::application::{Application, CreateApplication};
use gigboard_db::models::notification::CreateNotification;
use gigboard_db::repositories::{ApplicationRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Apply to an open project as a freelancer.
///
/// The double-apply check is the `uq_applications_project_freelancer`
/// constraint, classified to 409 by the error layer, so a concurrent
/// duplicate cannot slip through between a pre-check and the insert.
pub async fn apply(
    state: &AppState,
    auth: &AuthUser,
    project_id: DbId,
    input: &CreateApplication,
) -> AppResult<Application> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    if project.status != ProjectStatus::Open {
        return Err(
            CoreError::InvalidState("Project is not open for applications".into()).into(),
        );
    }

    let application =
        ApplicationRepo::create(&state.pool, project_id, auth.user_id, input.message.as_deref())
            .await?;

    let title = project.title.clone().unwrap_or_else(|| "your project".into());
    state
        .notifier
        .send(CreateNotification {
            user_id: project.client_id,
            sender_id: Some(auth.user_id),
            title: "New application".into(),
            message: format!("A freelancer applied to \"{title}\""),
            kind: TYPE_APPLICATION,
        })
        .await;

    Ok(application)
}

/// Decide an application: approve or reject it, cascading into the
/// project's lifecycle.
///
/// Approving puts the project `ongoing` (open). At most one application
/// per project may be approved; a second approval is refused with 409.
/// Rejecting the approved application un-staffs the project, which falls
/// back to `cancelled`; rejecting a pending application never changes the
/// project.
pub async fn update_status(
    state: &AppState,
    auth: &AuthUser,
    application_id: DbId,
    new_status: ApplicationStatus,
) -> AppResult<Application> {
    if !new_status.is_decision() {
        return Err(
            CoreError::Validation("status must be 'approved' or 'rejected'".into()).into(),
        );
    }

    let mut tx = state.pool.begin().await?;

    let application = ApplicationRepo::find_by_id_for_update(&mut tx, application_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Application",
            id: application_id,
        })?;

    let project = ProjectRepo::find_by_id_for_update(&mut tx, application.project_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: application.project_id,
        })?;

    if !auth.is_owner_or_admin(project.client_id) {
        return Err(CoreError::Forbidden(
            "Only the owning client or an admin can decide applications".into(),
        )
        .into());
    }

    if project.progress_status == ProgressStatus::Completed {
        return Err(CoreError::InvalidState(
            "Applications of a completed project can no longer be decided".into(),
        )
        .into());
    }

    let was_approved = application.status == ApplicationStatus::Approved;

    let updated = match new_status {
        ApplicationStatus::Approved => {
            if ApplicationRepo::exists_other_approved(&mut tx, project.id, application_id).await? {
                return Err(CoreError::Conflict(
                    "Project already has an approved application".into(),
                )
                .into());
            }
            let updated = ApplicationRepo::set_status(&mut tx, application_id, new_status)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Application",
                    id: application_id,
                })?;
            ProjectRepo::set_progress(&mut tx, project.id, ProgressStatus::Ongoing).await?;
            updated
        }
        ApplicationStatus::Rejected => {
            let updated = ApplicationRepo::set_status(&mut tx, application_id, new_status)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Application",
                    id: application_id,
                })?;
            // Rejecting the staffed freelancer un-staffs the project.
            if was_approved
                && !ApplicationRepo::exists_other_approved(&mut tx, project.id, application_id)
                    .await?
            {
                ProjectRepo::set_progress(&mut tx, project.id, ProgressStatus::Cancelled).await?;
            }
            updated
        }
        ApplicationStatus::Pending => unreachable!("is_decision rejected pending above"),
    };

    tx.commit().await?;

    let title = project.title.clone().unwrap_or_else(|| "a project".into());
    state
        .notifier
        .send(CreateNotification {
            user_id: updated.freelancer_id,
            sender_id: Some(auth.user_id),
            title: format!("Application {new_status}"),
            message: format!("Your application to \"{title}\" was {new_status}"),
            kind: TYPE_APPLICATION_STATUS,
        })
        .await;

    Ok(updated)
}
