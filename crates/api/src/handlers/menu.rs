//! Handlers for day menus (`/menu`).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use forge_core::menu::{validate_menu, PublishMenu};
use forge_db::models::menu::MenuItem;
use forge_db::repositories::MenuRepo;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::MessDayParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/menu?mess_id=&date=
pub async fn get_day(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(params): ApiQuery<MessDayParams>,
) -> AppResult<Json<DataResponse<Vec<MenuItem>>>> {
    let date = params
        .date
        .unwrap_or_else(|| state.clock.today(Utc::now()));
    let items = MenuRepo::list_day(&state.pool, params.mess_id, date).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/menu
///
/// Replaces the whole menu for `(mess_id, menu_date)`.
pub async fn publish(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    ApiJson(mut input): ApiJson<PublishMenu>,
) -> AppResult<Json<DataResponse<Vec<MenuItem>>>> {
    validate_menu(&mut input)?;
    let items = MenuRepo::replace_day(&state.pool, &input).await?;

    tracing::info!(
        mess_id = %input.mess_id,
        menu_date = %input.menu_date,
        items = items.len(),
        published_by = %staff.user_id,
        "Menu published"
    );

    Ok(Json(DataResponse { data: items }))
}
