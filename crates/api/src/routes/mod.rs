pub mod health;
pub mod memberships;
pub mod menu;
pub mod ops;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ops/opt                    set opt-in (POST), caller's opt-ins for a day (GET)
/// /ops/scan                   record a scan (POST)
/// /ops/scans/me               caller's served-meal history (GET)
/// /ops/scans                  mess attendance for a day (GET, staff)
///
/// /reports/daily              opted vs served per meal (GET, staff)
///
/// /menu                       day menu (GET), publish day menu (POST, staff)
///
/// /memberships                list, enrol (GET, POST, staff)
/// /memberships/withdraw       close the open window (POST, staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/ops", ops::router())
        .nest("/reports", reports::router())
        .nest("/menu", menu::router())
        .nest("/memberships", memberships::router())
}
