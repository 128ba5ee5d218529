//! Shared query parameter types for API handlers.

use chrono::NaiveDate;
use forge_core::types::MessId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped with `clamp_limit` / `clamp_offset` before reaching
/// the repository.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?mess_id=&date=` selector for per-day views. A missing `date` means the
/// mess-local current date.
#[derive(Debug, Deserialize)]
pub struct MessDayParams {
    pub mess_id: MessId,
    pub date: Option<NaiveDate>,
}
