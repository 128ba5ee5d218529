//! Day menu item model.

use chrono::NaiveDate;
use forge_core::types::{DbId, MessId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `menu_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuItem {
    pub id: DbId,
    pub mess_id: MessId,
    pub menu_date: NaiveDate,
    pub meal: String,
    pub item_name: String,
    pub is_special: bool,
    pub allergens: Vec<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}
