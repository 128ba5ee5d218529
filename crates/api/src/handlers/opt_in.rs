//! Handlers for meal opt-ins (`/ops/opt`).

use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use forge_core::meal::Meal;
use forge_core::scan::MealKey;
use forge_core::types::{MessId, UserId};
use forge_db::models::opt_in::OptIn;
use forge_db::repositories::OptInRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::query::MessDayParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /ops/opt`.
#[derive(Debug, Deserialize)]
pub struct SetOptInRequest {
    pub mess_id: MessId,
    #[serde(alias = "date")]
    pub opt_date: NaiveDate,
    pub meal: Meal,
    pub is_opted: bool,
    /// Staff may set another user's opt-in; defaults to the caller.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// POST /api/ops/opt
///
/// Last write wins. Membership is not checked here; an opt-in without a
/// membership simply never leads to a serve.
pub async fn set(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<SetOptInRequest>,
) -> AppResult<Json<DataResponse<OptIn>>> {
    let user_id = input.user_id.unwrap_or(user.user_id);
    user.authorize_for(user_id)?;

    let key = MealKey {
        user_id,
        mess_id: input.mess_id,
        date: input.opt_date,
        meal: input.meal,
    };
    let opt_in = OptInRepo::upsert(&state.pool, &key, input.is_opted).await?;

    tracing::debug!(
        user_id = %key.user_id,
        mess_id = %key.mess_id,
        date = %key.date,
        meal = %key.meal,
        is_opted = input.is_opted,
        "Opt-in recorded"
    );

    Ok(Json(DataResponse { data: opt_in }))
}

/// GET /api/ops/opt?mess_id=&date=
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(params): ApiQuery<MessDayParams>,
) -> AppResult<Json<DataResponse<Vec<OptIn>>>> {
    let date = params
        .date
        .unwrap_or_else(|| state.clock.today(Utc::now()));
    let rows = OptInRepo::list_for_user_day(&state.pool, user.user_id, params.mess_id, date).await?;
    Ok(Json(DataResponse { data: rows }))
}
