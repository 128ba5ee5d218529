//! Repository for the `meal_scans` ledger.
//!
//! [`ScanRepo::record_scan`] is the only write path. It runs the membership
//! and opt-in checks and the conditional insert inside one transaction; the
//! `uq_meal_scans_key` constraint plus `ON CONFLICT DO NOTHING` make the
//! duplicate check and the insert a single step, so concurrent attempts on
//! one key produce exactly one row.

use chrono::NaiveDate;
use forge_core::scan::{check_eligibility, settle, MealKey, ScanResult, OUTCOME_SERVED};
use forge_core::types::{MessId, Timestamp, UserId};
use sqlx::{PgConnection, PgPool};

use crate::models::scan_record::ScanRecord;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, mess_id, scan_date, meal, outcome, served_at, scanned_by";

/// Provides the scan ledger operations.
pub struct ScanRepo;

impl ScanRepo {
    /// Attempt to serve the meal identified by `key`.
    ///
    /// Returns a [`ScanResult`] for every eligibility outcome; only storage
    /// failures surface as `Err`. A failed attempt leaves nothing behind, so
    /// callers may retry on error.
    pub async fn record_scan(
        pool: &PgPool,
        key: &MealKey,
        scanned_by: UserId,
    ) -> Result<ScanResult, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let is_member = Self::is_member_inner(&mut *tx, key).await?;
        let opted_in = if is_member {
            Self::lock_opt_in_inner(&mut *tx, key).await?
        } else {
            None
        };

        if let Err(reason) = check_eligibility(is_member, opted_in) {
            tx.rollback().await?;
            return Ok(reason.into());
        }

        let served_at: Option<Timestamp> = sqlx::query_scalar(
            "INSERT INTO meal_scans (user_id, mess_id, scan_date, meal, outcome, scanned_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id, mess_id, scan_date, meal) DO NOTHING
             RETURNING served_at",
        )
        .bind(key.user_id)
        .bind(key.mess_id)
        .bind(key.date)
        .bind(key.meal.as_str())
        .bind(OUTCOME_SERVED)
        .bind(scanned_by)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(settle(served_at))
    }

    /// Membership covering the key's date, evaluated inside the scan
    /// transaction.
    async fn is_member_inner(conn: &mut PgConnection, key: &MealKey) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM memberships
                WHERE user_id = $1 AND mess_id = $2
                  AND active_from <= $3
                  AND (active_to IS NULL OR active_to >= $3)
             )",
        )
        .bind(key.user_id)
        .bind(key.mess_id)
        .bind(key.date)
        .fetch_one(conn)
        .await
    }

    /// Read the opt-in flag under a shared row lock so a concurrent opt-out
    /// waits until this scan commits or rolls back.
    async fn lock_opt_in_inner(
        conn: &mut PgConnection,
        key: &MealKey,
    ) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT is_opted FROM meal_opt_ins
             WHERE user_id = $1 AND mess_id = $2 AND opt_date = $3 AND meal = $4
             FOR SHARE",
        )
        .bind(key.user_id)
        .bind(key.mess_id)
        .bind(key.date)
        .bind(key.meal.as_str())
        .fetch_optional(conn)
        .await
    }

    /// Find the ledger row for a key, if the meal was served.
    pub async fn find(pool: &PgPool, key: &MealKey) -> Result<Option<ScanRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meal_scans
             WHERE user_id = $1 AND mess_id = $2 AND scan_date = $3 AND meal = $4"
        );
        sqlx::query_as::<_, ScanRecord>(&query)
            .bind(key.user_id)
            .bind(key.mess_id)
            .bind(key.date)
            .bind(key.meal.as_str())
            .fetch_optional(pool)
            .await
    }

    /// A user's serve history across all messes, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScanRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meal_scans
             WHERE user_id = $1
             ORDER BY served_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ScanRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every serve recorded for a mess on one day, most recent first.
    pub async fn list_for_mess_day(
        pool: &PgPool,
        mess_id: MessId,
        date: NaiveDate,
    ) -> Result<Vec<ScanRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meal_scans
             WHERE mess_id = $1 AND scan_date = $2
             ORDER BY served_at DESC, id DESC"
        );
        sqlx::query_as::<_, ScanRecord>(&query)
            .bind(mess_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }
}
