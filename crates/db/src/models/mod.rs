//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus `Deserialize` DTOs for writes where the table has
//! any.

pub mod membership;
pub mod menu;
pub mod opt_in;
pub mod scan_record;
