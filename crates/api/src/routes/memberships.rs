use axum::routing::{get, post};
use axum::Router;

use crate::handlers::membership;
use crate::state::AppState;

/// Routes mounted at `/memberships`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> enrol
/// POST   /withdraw    -> withdraw
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(membership::list).post(membership::enrol))
        .route("/withdraw", post(membership::withdraw))
}
