//! Route definitions for counter operations (`/ops`).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attendance, opt_in, scan};
use crate::state::AppState;

/// Routes mounted at `/ops`.
///
/// ```text
/// POST   /opt          -> opt_in::set
/// GET    /opt          -> opt_in::list_mine
/// POST   /scan         -> scan::record
/// GET    /slot         -> scan::current_slot
/// GET    /scans/me     -> attendance::my_history
/// GET    /scans        -> attendance::mess_day
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/opt", get(opt_in::list_mine).post(opt_in::set))
        .route("/scan", post(scan::record))
        .route("/slot", get(scan::current_slot))
        .route("/scans/me", get(attendance::my_history))
        .route("/scans", get(attendance::mess_day))
}
