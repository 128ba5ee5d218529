pub mod attendance;
pub mod membership;
pub mod menu;
pub mod opt_in;
pub mod report;
pub mod scan;
