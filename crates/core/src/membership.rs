//! Membership window rules.
//!
//! A membership is an inclusive date range `[active_from, active_to]`; an
//! absent `active_to` means the window is open-ended. Each (user, mess) pair
//! has at most one open window at a time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The date range a membership is active for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipWindow {
    pub active_from: NaiveDate,
    pub active_to: Option<NaiveDate>,
}

impl MembershipWindow {
    /// Whether `date` falls inside the window (both ends inclusive).
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.active_from <= date && self.active_to.map_or(true, |to| date <= to)
    }

    pub fn is_open(&self) -> bool {
        self.active_to.is_none()
    }
}

/// Validate a window supplied at enrolment time.
pub fn validate_window(window: &MembershipWindow) -> Result<(), CoreError> {
    if let Some(to) = window.active_to {
        if to < window.active_from {
            return Err(CoreError::Validation(format!(
                "active_to ({to}) must not be before active_from ({})",
                window.active_from
            )));
        }
    }
    Ok(())
}

/// Validate closing an open window at `active_to`.
pub fn validate_withdrawal(active_from: NaiveDate, active_to: NaiveDate) -> Result<(), CoreError> {
    validate_window(&MembershipWindow {
        active_from,
        active_to: Some(active_to),
    })
}
