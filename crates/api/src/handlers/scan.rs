//! Handler for the meal counter scan (`POST /ops/scan`).
//!
//! The subject of a scan is taken from, in order: the raw `qr` payload, an
//! explicit `user_id`, or the caller. `date` and `meal` are required and come from
//! the counter; [`current_slot`] offers the mess-local suggestion. Input
//! problems fail with 400 before the ledger is touched; eligibility rejections
//! come back as a normal 200 result.

use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use forge_core::meal::Meal;
use forge_core::qr::parse_qr_token;
use forge_core::scan::{MealKey, ScanResult};
use forge_core::types::{MessId, UserId};
use forge_db::repositories::ScanRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /ops/scan`.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub mess_id: MessId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Raw text decoded from the student's QR code.
    #[serde(default)]
    pub qr: Option<String>,
    pub date: NaiveDate,
    pub meal: Meal,
}

/// Scan outcome plus the key it was evaluated for.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    #[serde(flatten)]
    pub result: ScanResult,
    pub user_id: UserId,
    pub mess_id: MessId,
    pub date: NaiveDate,
    pub meal: Meal,
    pub message: String,
    /// Whether the same key can still be served after fixing the cause.
    /// False once the key already has a served row.
    pub retryable: bool,
}

/// Mess-local date and meal at the time of the request.
#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub date: NaiveDate,
    pub meal: Meal,
}

/// POST /api/ops/scan
pub async fn record(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<ScanRequest>,
) -> AppResult<Json<DataResponse<ScanResponse>>> {
    let subject = match (input.qr.as_deref(), input.user_id) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "Provide either qr or user_id, not both".into(),
            ))
        }
        (Some(raw), None) => parse_qr_token(raw)?.uid,
        (None, Some(user_id)) => user_id,
        (None, None) => user.user_id,
    };
    user.authorize_for(subject)?;

    let key = MealKey {
        user_id: subject,
        mess_id: input.mess_id,
        date: input.date,
        meal: input.meal,
    };

    let result = ScanRepo::record_scan(&state.pool, &key, user.user_id).await?;

    tracing::info!(
        user_id = %key.user_id,
        mess_id = %key.mess_id,
        date = %key.date,
        meal = %key.meal,
        scanned_by = %user.user_id,
        outcome = result.label(),
        "Scan attempt"
    );

    let (message, retryable) = match result.rejection() {
        Some(reason) if reason.is_terminal() => (reason.message(key.meal), false),
        // Opting out or withdrawing after a serve does not free the key.
        Some(reason) => (
            reason.message(key.meal),
            ScanRepo::find(&state.pool, &key).await?.is_none(),
        ),
        None => (format!("Marked for {}", key.meal), false),
    };

    Ok(Json(DataResponse {
        data: ScanResponse {
            result,
            user_id: key.user_id,
            mess_id: key.mess_id,
            date: key.date,
            meal: key.meal,
            message,
            retryable,
        },
    }))
}

/// GET /api/ops/slot
///
/// The meal the counter should scan for right now: 06:00-09:59 breakfast,
/// 11:00-14:59 lunch, otherwise dinner.
pub async fn current_slot(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Json<DataResponse<SlotResponse>> {
    let now = Utc::now();
    Json(DataResponse {
        data: SlotResponse {
            date: state.clock.today(now),
            meal: state.clock.current_meal(now),
        },
    })
}
