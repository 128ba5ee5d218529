use axum::routing::get;
use axum::Router;

use crate::handlers::menu;
use crate::state::AppState;

/// Routes mounted at `/menu`.
///
/// ```text
/// GET    /    -> get_day
/// POST   /    -> publish
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(menu::get_day).post(menu::publish))
}
