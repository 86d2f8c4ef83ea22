//! Well-known notification type tags.
//!
//! These must match the values stored in the `notifications.type` column
//! and understood by the frontend notification center.

/// A freelancer applied to one of the recipient's projects.
pub const TYPE_APPLICATION: &str = "application";

/// The recipient's application was approved or rejected.
pub const TYPE_APPLICATION_STATUS: &str = "application_status";

/// A project the recipient is involved in changed (e.g. completed and paid).
pub const TYPE_PROJECT: &str = "project";

/// A project's progress status changed.
pub const TYPE_PROJECT_STATUS: &str = "project_status";
