//! Scan ledger eligibility rules and results.
//!
//! A scan attempt for a [`MealKey`] is checked in a fixed order: membership,
//! then opt-in, then duplicate. The first two checks are evaluated here
//! against data the repository has loaded inside its transaction; the
//! duplicate check is the conditional insert itself, whose outcome is turned
//! into a [`ScanResult`] by [`settle`].
//!
//! Rejections are ordinary results, not errors. A rejected attempt leaves no
//! record and may be retried once the cause is fixed, except
//! [`RejectionReason::AlreadyScanned`], which is permanent for the key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::meal::Meal;
use crate::types::{MessId, Timestamp, UserId};

/// Outcome string stored on every ledger row.
pub const OUTCOME_SERVED: &str = "served";

/// Unique key shared by opt-ins and ledger rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealKey {
    pub user_id: UserId,
    pub mess_id: MessId,
    pub date: NaiveDate,
    pub meal: Meal,
}

/// Why a scan attempt did not serve a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    NotAMember,
    NotOptedIn,
    AlreadyScanned,
}

impl RejectionReason {
    /// Wire code, identical to the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAMember => "NOT_A_MEMBER",
            Self::NotOptedIn => "NOT_OPTED_IN",
            Self::AlreadyScanned => "ALREADY_SCANNED",
        }
    }

    /// Human-readable message for the counter display.
    pub fn message(&self, meal: Meal) -> String {
        match self {
            Self::NotAMember => "Not an active member of this mess".to_string(),
            Self::NotOptedIn => format!("Not opted in for {meal}"),
            Self::AlreadyScanned => format!("Already marked for {meal}!"),
        }
    }

    /// Whether retrying the same key can ever succeed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::AlreadyScanned)
    }
}

/// Result of a single scan attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanResult {
    Served { served_at: Timestamp },
    Rejected { reason: RejectionReason },
}

impl ScanResult {
    pub fn is_served(&self) -> bool {
        matches!(self, Self::Served { .. })
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Served { .. } => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }

    /// Label used in structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Served { .. } => OUTCOME_SERVED,
            Self::Rejected { reason } => reason.code(),
        }
    }
}

impl From<RejectionReason> for ScanResult {
    fn from(reason: RejectionReason) -> Self {
        Self::Rejected { reason }
    }
}

/// Evaluate the membership and opt-in preconditions, in that order.
///
/// `opted_in` is `None` when no opt-in row exists for the key.
pub fn check_eligibility(is_member: bool, opted_in: Option<bool>) -> Result<(), RejectionReason> {
    if !is_member {
        return Err(RejectionReason::NotAMember);
    }
    if opted_in != Some(true) {
        return Err(RejectionReason::NotOptedIn);
    }
    Ok(())
}

/// Turn the outcome of the conditional ledger insert into a result.
///
/// `inserted` carries the new row's `served_at`, or `None` when the insert
/// hit an existing row for the key.
pub fn settle(inserted: Option<Timestamp>) -> ScanResult {
    match inserted {
        Some(served_at) => ScanResult::Served { served_at },
        None => RejectionReason::AlreadyScanned.into(),
    }
}
