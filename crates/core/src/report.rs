//! Daily opted-vs-served report assembly.
//!
//! Repositories return grouped counts for whatever meals have rows; the report
//! always lists every meal so a meal with no activity reads as zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::meal::Meal;
use crate::types::MessId;

/// Counts for one meal on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MealCounts {
    pub opted_count: i64,
    pub served_count: i64,
}

/// Per-meal counts for a mess and date. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReport {
    pub mess_id: MessId,
    pub date: NaiveDate,
    pub stats: BTreeMap<Meal, MealCounts>,
}

impl DailyReport {
    /// Build a report from grouped opt-in and serve counts.
    ///
    /// Meals missing from either input are reported as zero.
    pub fn assemble(
        mess_id: MessId,
        date: NaiveDate,
        opted: impl IntoIterator<Item = (Meal, i64)>,
        served: impl IntoIterator<Item = (Meal, i64)>,
    ) -> Self {
        let mut stats: BTreeMap<Meal, MealCounts> =
            Meal::ALL.iter().map(|m| (*m, MealCounts::default())).collect();

        for (meal, count) in opted {
            stats.entry(meal).or_default().opted_count += count;
        }
        for (meal, count) in served {
            stats.entry(meal).or_default().served_count += count;
        }

        Self {
            mess_id,
            date,
            stats,
        }
    }

    /// Counts for a single meal.
    pub fn meal(&self, meal: Meal) -> MealCounts {
        self.stats.get(&meal).copied().unwrap_or_default()
    }
}
