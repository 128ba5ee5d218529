//! Handlers for membership administration (`/memberships`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forge_core::error::CoreError;
use forge_core::membership::{validate_window, validate_withdrawal, MembershipWindow};
use forge_core::types::{MessId, UserId};
use forge_db::models::membership::{CreateMembership, Membership, WithdrawMembership};
use forge_db::repositories::MembershipRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Optional filters for `GET /memberships`.
#[derive(Debug, Deserialize)]
pub struct MembershipFilter {
    pub user_id: Option<UserId>,
    pub mess_id: Option<MessId>,
}

/// POST /api/memberships
///
/// A second open window for the same user and mess trips
/// `uq_memberships_open_window` and comes back as 409.
pub async fn enrol(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ApiJson(input): ApiJson<CreateMembership>,
) -> AppResult<(StatusCode, Json<DataResponse<Membership>>)> {
    validate_window(&MembershipWindow {
        active_from: input.active_from,
        active_to: input.active_to,
    })?;

    let membership = MembershipRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: membership })))
}

/// POST /api/memberships/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ApiJson(input): ApiJson<WithdrawMembership>,
) -> AppResult<Json<DataResponse<Membership>>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Open membership",
            id: format!("user {} in mess {}", input.user_id, input.mess_id),
        })
    };

    let open = MembershipRepo::find_open(&state.pool, input.user_id, input.mess_id)
        .await?
        .ok_or_else(not_found)?;
    validate_withdrawal(open.active_from, input.active_to)?;

    // A concurrent withdrawal may have closed the window in between.
    let closed = MembershipRepo::close(&state.pool, open.id, input.active_to)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(DataResponse { data: closed }))
}

/// GET /api/memberships?user_id=&mess_id=
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ApiQuery(filter): ApiQuery<MembershipFilter>,
) -> AppResult<Json<DataResponse<Vec<Membership>>>> {
    let rows = MembershipRepo::list(&state.pool, filter.user_id, filter.mess_id).await?;
    Ok(Json(DataResponse { data: rows }))
}
