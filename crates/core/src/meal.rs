//! Meals served by a mess and the serving windows used to infer the current
//! meal at the counter.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MEAL_BREAKFAST: &str = "breakfast";
pub const MEAL_LUNCH: &str = "lunch";
pub const MEAL_DINNER: &str = "dinner";

/// All valid meal strings, in serving order.
pub const VALID_MEALS: &[&str] = &[MEAL_BREAKFAST, MEAL_LUNCH, MEAL_DINNER];

/// Breakfast is served from 06:00 up to (not including) 10:00 local time.
const BREAKFAST_HOURS: std::ops::Range<u32> = 6..10;

/// Lunch is served from 11:00 up to (not including) 15:00 local time.
const LUNCH_HOURS: std::ops::Range<u32> = 11..15;

/// Default mess time zone: IST (UTC+05:30).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

// ---------------------------------------------------------------------------
// Meal
// ---------------------------------------------------------------------------

/// A meal slot. Ordering follows the serving order of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    /// Every meal, in serving order.
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            MEAL_BREAKFAST => Ok(Self::Breakfast),
            MEAL_LUNCH => Ok(Self::Lunch),
            MEAL_DINNER => Ok(Self::Dinner),
            _ => Err(CoreError::Validation(format!(
                "Invalid meal '{s}'. Must be one of: {}",
                VALID_MEALS.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => MEAL_BREAKFAST,
            Self::Lunch => MEAL_LUNCH,
            Self::Dinner => MEAL_DINNER,
        }
    }

    /// The meal being served at the given local wall-clock time.
    ///
    /// Anything outside the breakfast and lunch windows counts as dinner,
    /// including the small hours after midnight.
    pub fn for_local_time(time: NaiveTime) -> Self {
        let hour = time.hour();
        if BREAKFAST_HOURS.contains(&hour) {
            Self::Breakfast
        } else if LUNCH_HOURS.contains(&hour) {
            Self::Lunch
        } else {
            Self::Dinner
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Meal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_value(s)
    }
}

// ---------------------------------------------------------------------------
// MessClock
// ---------------------------------------------------------------------------

/// Converts UTC instants into the mess's local calendar date and meal slot.
#[derive(Debug, Clone, Copy)]
pub struct MessClock {
    offset: FixedOffset,
}

impl MessClock {
    /// Build a clock for a fixed UTC offset expressed in minutes east of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CoreError> {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                CoreError::Validation(format!("UTC offset of {minutes} minutes is out of range"))
            })?;
        Ok(Self { offset })
    }

    /// Local calendar date at `now`.
    pub fn today(&self, now: Timestamp) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// Meal being served at `now`.
    pub fn current_meal(&self, now: Timestamp) -> Meal {
        Meal::for_local_time(now.with_timezone(&self.offset).time())
    }
}
