//! Profile visit log model.

use gigboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profile_visits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileVisit {
    pub id: DbId,
    pub profile_owner_id: DbId,
    pub visitor_id: DbId,
    pub visited_at: Timestamp,
}

/// A visit joined with the visitor's display info.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileVisitWithVisitor {
    pub id: DbId,
    pub visitor_id: DbId,
    pub visited_at: Timestamp,
    pub visitor_fullname: String,
    pub visitor_role: String,
}
