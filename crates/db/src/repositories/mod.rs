//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod membership_repo;
pub mod menu_repo;
pub mod opt_in_repo;
pub mod report_repo;
pub mod scan_repo;

pub use membership_repo::MembershipRepo;
pub use menu_repo::MenuRepo;
pub use opt_in_repo::OptInRepo;
pub use report_repo::ReportRepo;
pub use scan_repo::ScanRepo;
