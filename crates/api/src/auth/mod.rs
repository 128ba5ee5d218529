//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation and the JWT-backed
//!   [`IdentityProvider`](forge_core::identity::IdentityProvider).

pub mod jwt;
