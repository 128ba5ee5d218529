//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use forge_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `staff` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn counter_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff or Admin role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
