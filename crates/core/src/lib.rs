//! Domain types and pure logic for the Food Forge mess backend.
//!
//! Nothing in this crate touches the database; repositories in `forge-db`
//! load rows and hand them to the functions defined here.

pub mod error;
pub mod identity;
pub mod meal;
pub mod membership;
pub mod menu;
pub mod paging;
pub mod qr;
pub mod report;
pub mod roles;
pub mod scan;
pub mod types;
