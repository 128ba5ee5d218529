//! Repository for the `meal_opt_ins` table.

use chrono::NaiveDate;
use forge_core::scan::MealKey;
use forge_core::types::{MessId, UserId};
use sqlx::PgPool;

use crate::models::opt_in::OptIn;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, mess_id, opt_date, meal, is_opted, created_at, updated_at";

/// Provides opt-in reads and the last-write-wins upsert.
pub struct OptInRepo;

impl OptInRepo {
    /// Record whether the user intends to eat the meal in `key`.
    ///
    /// Uses `ON CONFLICT ... DO UPDATE` so the latest call wins and exactly
    /// one row exists per key.
    pub async fn upsert(pool: &PgPool, key: &MealKey, is_opted: bool) -> Result<OptIn, sqlx::Error> {
        let query = format!(
            "INSERT INTO meal_opt_ins (user_id, mess_id, opt_date, meal, is_opted)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id, mess_id, opt_date, meal) DO UPDATE
             SET is_opted = EXCLUDED.is_opted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OptIn>(&query)
            .bind(key.user_id)
            .bind(key.mess_id)
            .bind(key.date)
            .bind(key.meal.as_str())
            .bind(is_opted)
            .fetch_one(pool)
            .await
    }

    /// Find the opt-in for a key. Returns `None` if the user never answered.
    pub async fn find(pool: &PgPool, key: &MealKey) -> Result<Option<OptIn>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meal_opt_ins
             WHERE user_id = $1 AND mess_id = $2 AND opt_date = $3 AND meal = $4"
        );
        sqlx::query_as::<_, OptIn>(&query)
            .bind(key.user_id)
            .bind(key.mess_id)
            .bind(key.date)
            .bind(key.meal.as_str())
            .fetch_optional(pool)
            .await
    }

    /// All of a user's opt-ins for one mess and day, in serving order.
    pub async fn list_for_user_day(
        pool: &PgPool,
        user_id: UserId,
        mess_id: MessId,
        date: NaiveDate,
    ) -> Result<Vec<OptIn>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meal_opt_ins
             WHERE user_id = $1 AND mess_id = $2 AND opt_date = $3
             ORDER BY CASE meal WHEN 'breakfast' THEN 0 WHEN 'lunch' THEN 1 ELSE 2 END"
        );
        sqlx::query_as::<_, OptIn>(&query)
            .bind(user_id)
            .bind(mess_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }
}
