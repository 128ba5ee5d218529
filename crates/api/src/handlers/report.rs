use axum::extract::State;
use axum::Json;
use chrono::Utc;
use forge_core::report::DailyReport;
use forge_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::middleware::rbac::RequireStaff;
use crate::query::MessDayParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/reports/daily?mess_id=&date=
pub async fn daily(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ApiQuery(params): ApiQuery<MessDayParams>,
) -> AppResult<Json<DataResponse<DailyReport>>> {
    let date = params
        .date
        .unwrap_or_else(|| state.clock.today(Utc::now()));
    let report = ReportRepo::daily(&state.pool, params.mess_id, date).await?;
    Ok(Json(DataResponse { data: report }))
}
