//! Repository for the append-only `profile_visits` log.

use sqlx::PgPool;

use gigboard_core::types::DbId;

use crate::models::profile_visit::{ProfileVisit, ProfileVisitWithVisitor};

const COLUMNS: &str = "id, profile_owner_id, visitor_id, visited_at";

/// Records and reads profile-visit events.
pub struct ProfileVisitRepo;

impl ProfileVisitRepo {
    /// Record one visit. Repeat visits create new rows.
    pub async fn record(
        pool: &PgPool,
        profile_owner_id: DbId,
        visitor_id: DbId,
    ) -> Result<ProfileVisit, sqlx::Error> {
        let query = format!(
            "INSERT INTO profile_visits (profile_owner_id, visitor_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileVisit>(&query)
            .bind(profile_owner_id)
            .bind(visitor_id)
            .fetch_one(pool)
            .await
    }

    /// List the most recent visits to a profile, capped at `limit`.
    pub async fn list_for_owner(
        pool: &PgPool,
        profile_owner_id: DbId,
        limit: i64,
    ) -> Result<Vec<ProfileVisitWithVisitor>, sqlx::Error> {
        sqlx::query_as::<_, ProfileVisitWithVisitor>(
            "SELECT v.id, v.visitor_id, v.visited_at,
                    u.fullname AS visitor_fullname,
                    u.role AS visitor_role
             FROM profile_visits v
             JOIN users u ON u.id = v.visitor_id
             WHERE v.profile_owner_id = $1
             ORDER BY v.visited_at DESC
             LIMIT $2",
        )
        .bind(profile_owner_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Count all visits a profile has ever received.
    pub async fn count_for_owner(
        pool: &PgPool,
        profile_owner_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM profile_visits WHERE profile_owner_id = $1",
        )
        .bind(profile_owner_id)
        .fetch_one(pool)
        .await
    }
}
