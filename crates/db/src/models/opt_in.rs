//! Meal opt-in model.

use chrono::NaiveDate;
use forge_core::types::{DbId, MessId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `meal_opt_ins` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OptIn {
    pub id: DbId,
    pub user_id: UserId,
    pub mess_id: MessId,
    pub opt_date: NaiveDate,
    pub meal: String,
    pub is_opted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
