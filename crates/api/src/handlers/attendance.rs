//! Handlers for served-meal history.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use forge_core::paging::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use forge_db::models::scan_record::ScanRecord;
use forge_db::repositories::ScanRepo;

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::{MessDayParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/ops/scans/me?limit=&offset=
pub async fn my_history(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ScanRecord>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let rows = ScanRepo::list_for_user(&state.pool, user.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/ops/scans?mess_id=&date=
pub async fn mess_day(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ApiQuery(params): ApiQuery<MessDayParams>,
) -> AppResult<Json<DataResponse<Vec<ScanRecord>>>> {
    let date = params
        .date
        .unwrap_or_else(|| state.clock.today(Utc::now()));
    let rows = ScanRepo::list_for_mess_day(&state.pool, params.mess_id, date).await?;
    Ok(Json(DataResponse { data: rows }))
}
