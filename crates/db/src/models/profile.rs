//! Client and freelancer profile models.

use gigboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `client_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `freelancer_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FreelancerProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub profession: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a client profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertClientProfile {
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}

/// DTO for creating or replacing a freelancer profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertFreelancerProfile {
    pub profession: Option<String>,
    pub avatar_url: Option<String>,
}
