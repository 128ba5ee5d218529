//! Bearer-credential authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use forge_core::error::CoreError;
use forge_core::identity::{bearer_credential, Caller};
use forge_core::roles::Role;
use forge_core::types::UserId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated caller resolved from the `Authorization: Bearer` header.
///
/// Resolution goes through [`AppState::identity`]; a missing, malformed or
/// rejected credential fails the request with 401 before any handler runs.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = user.role.as_str(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
}

impl AuthUser {
    pub fn caller(&self) -> Caller {
        Caller {
            user_id: self.user_id,
            role: self.role,
        }
    }

    /// Reject with 403 unless the caller may act on behalf of `user_id`.
    pub fn authorize_for(&self, user_id: UserId) -> AppResult<()> {
        if self.caller().can_act_for(user_id) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Students may only act for themselves".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let credential = bearer_credential(header)?;
        let caller = state.identity.resolve_caller(credential)?;

        Ok(AuthUser {
            user_id: caller.user_id,
            role: caller.role,
        })
    }
}
