//! Payment entity model.
//!
//! Payments are immutable after creation; there is deliberately no update
//! DTO for them.

use gigboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub project_id: DbId,
    pub freelancer_id: DbId,
    pub amount: i64,
    pub paid_at: Timestamp,
}

/// One month of aggregated earnings for a freelancer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyEarnings {
    /// `YYYY-MM` month key.
    pub month: String,
    pub total: i64,
}
