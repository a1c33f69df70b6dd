//! Tracking statistics
//!
//! Returned by `GET /tasks/stats/summary`. `total_time` is in minutes.

use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Summary Statistics */
/* -------------------------------------------------------------------------- */

/// Today and all-time tracking totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub today: PeriodStats,

    /// Accepts the camelCase `allTime` spelling as well
    #[serde(default, alias = "allTime")]
    pub all_time: PeriodStats,
}

/// Totals for one reporting period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Number of tasks started in the period
    #[serde(default)]
    pub tasks_count: u64,

    /// Tracked time in minutes
    #[serde(default)]
    pub total_time: f64,

    /// Number of break tasks, when the producer reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaks: Option<u64>,
}
