//! Daily opted-vs-served aggregation over `meal_opt_ins` and `meal_scans`.

use chrono::NaiveDate;
use forge_core::meal::Meal;
use forge_core::report::DailyReport;
use forge_core::scan::OUTCOME_SERVED;
use forge_core::types::MessId;
use sqlx::PgPool;

/// Provides read-only reporting queries.
pub struct ReportRepo;

impl ReportRepo {
    /// Compute the daily report for a mess.
    ///
    /// Both counts are read inside one `REPEATABLE READ, READ ONLY`
    /// transaction so they come from the same snapshot of committed rows.
    pub async fn daily(
        pool: &PgPool,
        mess_id: MessId,
        date: NaiveDate,
    ) -> Result<DailyReport, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let opted: Vec<(String, i64)> = sqlx::query_as(
            "SELECT meal, COUNT(*) FROM meal_opt_ins
             WHERE mess_id = $1 AND opt_date = $2 AND is_opted
             GROUP BY meal",
        )
        .bind(mess_id)
        .bind(date)
        .fetch_all(&mut *tx)
        .await?;

        let served: Vec<(String, i64)> = sqlx::query_as(
            "SELECT meal, COUNT(*) FROM meal_scans
             WHERE mess_id = $1 AND scan_date = $2 AND outcome = $3
             GROUP BY meal",
        )
        .bind(mess_id)
        .bind(date)
        .bind(OUTCOME_SERVED)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DailyReport::assemble(
            mess_id,
            date,
            parse_meal_counts(opted),
            parse_meal_counts(served),
        ))
    }
}

/// Convert grouped `(meal, count)` rows, dropping meals the schema would not
/// allow in the first place.
fn parse_meal_counts(rows: Vec<(String, i64)>) -> Vec<(Meal, i64)> {
    rows.into_iter()
        .filter_map(|(meal, count)| match Meal::from_str_value(&meal) {
            Ok(meal) => Some((meal, count)),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unrecognised meal in report");
                None
            }
        })
        .collect()
}
