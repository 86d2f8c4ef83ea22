//! User entity model and DTOs.

use gigboard_core::roles::Role;
use gigboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// Credential material lives with the external identity provider; this
/// table only carries what the marketplace itself needs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub fullname: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
///
/// The role is fixed at creation; no update DTO carries it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub fullname: String,
    pub email: String,
    pub role: Role,
}
