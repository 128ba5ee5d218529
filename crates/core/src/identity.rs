//! Caller identity resolution contract.
//!
//! The HTTP layer pulls the bearer credential out of the `Authorization`
//! header and hands it to an [`IdentityProvider`]. Resolution is an explicit
//! `Result`; a failure stops the request before any store is touched.

use crate::roles::Role;
use crate::types::UserId;

/// Authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub role: Role,
}

impl Caller {
    /// Whether this caller may act on behalf of `user_id`.
    pub fn can_act_for(&self, user_id: UserId) -> bool {
        self.user_id == user_id || self.role.is_staff()
    }
}

/// Why a credential could not be resolved to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("Missing Authorization header")]
    MissingCredential,

    #[error("Invalid Authorization format. Expected: Bearer <token>")]
    MalformedCredential,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Resolves a bearer credential to a stable user identifier.
pub trait IdentityProvider: Send + Sync {
    fn resolve_caller(&self, credential: &str) -> Result<Caller, AuthFailure>;
}

/// Extract the bearer credential from a raw `Authorization` header value.
pub fn bearer_credential(header: Option<&str>) -> Result<&str, AuthFailure> {
    let header = header.ok_or(AuthFailure::MissingCredential)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthFailure::MalformedCredential)?
        .trim();
    if token.is_empty() {
        return Err(AuthFailure::MalformedCredential);
    }
    Ok(token)
}
