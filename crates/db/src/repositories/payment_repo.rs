//! Repository for the `payments` table.
//!
//! Payments are insert-only. `create` takes a `PgConnection` because a
//! payment is only ever written inside the project-completion transaction,
//! never on its own.

use sqlx::{PgConnection, PgPool};

use gigboard_core::types::DbId;

use crate::models::payment::{MonthlyEarnings, Payment};

const COLUMNS: &str = "id, project_id, freelancer_id, amount, paid_at";

/// Provides insert and read operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a payment inside a transaction, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        project_id: DbId,
        freelancer_id: DbId,
        amount: i64,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (project_id, freelancer_id, amount)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(project_id)
            .bind(freelancer_id)
            .bind(amount)
            .fetch_one(conn)
            .await
    }

    /// List a freelancer's payments, most recent first.
    pub async fn list_for_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments
             WHERE freelancer_id = $1
             ORDER BY paid_at DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(freelancer_id)
            .fetch_all(pool)
            .await
    }

    /// Total amount a freelancer has earned across all payments.
    pub async fn total_for_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM payments WHERE freelancer_id = $1",
        )
        .bind(freelancer_id)
        .fetch_one(pool)
        .await
    }

    /// Monthly earnings for a freelancer, grouped by `YYYY-MM`, optionally
    /// restricted to one calendar year. Months with no payments are absent.
    pub async fn monthly_earnings(
        pool: &PgPool,
        freelancer_id: DbId,
        year: Option<i32>,
    ) -> Result<Vec<MonthlyEarnings>, sqlx::Error> {
        match year {
            Some(year) => {
                sqlx::query_as::<_, MonthlyEarnings>(
                    "SELECT TO_CHAR(DATE_TRUNC('month', paid_at), 'YYYY-MM') AS month,
                            COALESCE(SUM(amount), 0)::BIGINT AS total
                     FROM payments
                     WHERE freelancer_id = $1
                       AND EXTRACT(YEAR FROM paid_at) = $2
                     GROUP BY 1
                     ORDER BY 1",
                )
                .bind(freelancer_id)
                .bind(year)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, MonthlyEarnings>(
                    "SELECT TO_CHAR(DATE_TRUNC('month', paid_at), 'YYYY-MM') AS month,
                            COALESCE(SUM(amount), 0)::BIGINT AS total
                     FROM payments
                     WHERE freelancer_id = $1
                     GROUP BY 1
                     ORDER BY 1",
                )
                .bind(freelancer_id)
                .fetch_all(pool)
                .await
            }
        }
    }
}
