//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from the Bearer credential.
//! - [`rbac::RequireStaff`] -- Requires the `staff` or `admin` role.

pub mod auth;
pub mod rbac;
