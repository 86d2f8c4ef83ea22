//! Repository for the `client_profiles` and `freelancer_profiles` tables.

use sqlx::PgPool;

use gigboard_core::types::DbId;

use crate::models::profile::{
    ClientProfile, FreelancerProfile, UpsertClientProfile, UpsertFreelancerProfile,
};

const CLIENT_COLUMNS: &str = "id, user_id, company_name, company_logo, created_at, updated_at";
const FREELANCER_COLUMNS: &str = "id, user_id, profession, avatar_url, created_at, updated_at";

/// Provides upsert/read operations for both profile variants.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Create or replace a client profile.
    pub async fn upsert_client(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertClientProfile,
    ) -> Result<ClientProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO client_profiles (user_id, company_name, company_logo)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_client_profiles_user
             DO UPDATE SET company_name = EXCLUDED.company_name,
                           company_logo = EXCLUDED.company_logo,
                           updated_at = NOW()
             RETURNING {CLIENT_COLUMNS}"
        );
        sqlx::query_as::<_, ClientProfile>(&query)
            .bind(user_id)
            .bind(&input.company_name)
            .bind(&input.company_logo)
            .fetch_one(pool)
            .await
    }

    /// Create or replace a freelancer profile.
    pub async fn upsert_freelancer(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertFreelancerProfile,
    ) -> Result<FreelancerProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO freelancer_profiles (user_id, profession, avatar_url)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_freelancer_profiles_user
             DO UPDATE SET profession = EXCLUDED.profession,
                           avatar_url = EXCLUDED.avatar_url,
                           updated_at = NOW()
             RETURNING {FREELANCER_COLUMNS}"
        );
        sqlx::query_as::<_, FreelancerProfile>(&query)
            .bind(user_id)
            .bind(&input.profession)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Find a client profile by owning user.
    pub async fn find_client(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ClientProfile>, sqlx::Error> {
        let query = format!("SELECT {CLIENT_COLUMNS} FROM client_profiles WHERE user_id = $1");
        sqlx::query_as::<_, ClientProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a freelancer profile by owning user.
    pub async fn find_freelancer(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<FreelancerProfile>, sqlx::Error> {
        let query =
            format!("SELECT {FREELANCER_COLUMNS} FROM freelancer_profiles WHERE user_id = $1");
        sqlx::query_as::<_, FreelancerProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
