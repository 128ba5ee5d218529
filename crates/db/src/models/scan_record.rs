//! Scan ledger row.

use chrono::NaiveDate;
use forge_core::types::{DbId, MessId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `meal_scans` table. Rows are immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScanRecord {
    pub id: DbId,
    pub user_id: UserId,
    pub mess_id: MessId,
    pub scan_date: NaiveDate,
    pub meal: String,
    pub outcome: String,
    pub served_at: Timestamp,
    /// Caller who operated the scan.
    pub scanned_by: Option<UserId>,
}
