//! Report aggregates computed from session history.
//!
//! Unlike stored records these are never persisted; they are rebuilt from
//! the session log whenever the log or the selected window changes.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::MuscleGroup;

/// Rolling look-back period for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
    ];

    /// Earliest instant still inside the window ending at `now`.
    ///
    /// Arithmetic is calendar-based in `now`'s time zone. Month and year
    /// steps clamp to the last day of a shorter month (Mar 31 -> Feb 28/29).
    /// Returns `None` only when the result falls outside chrono's range.
    pub fn cutoff<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let now = now.clone();
        match self {
            TimeWindow::Day => now.checked_sub_days(Days::new(1)),
            TimeWindow::Week => now.checked_sub_days(Days::new(7)),
            TimeWindow::Month => now.checked_sub_months(Months::new(1)),
            TimeWindow::Year => now.checked_sub_months(Months::new(12)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown time window {s:?} (expected day, week, month or year)"))
    }
}

/// Totals over a set of sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReportSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub calories: u64,
    /// Minutes
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: u64,
    pub count: u32,
}

/// Per-day totals for the calories/duration charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyBucket {
    /// Calendar date (YYYY-MM-DD)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// Chart axis label (dd/mm)
    pub label: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub calories: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: u64,
}

impl DailyBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            label: format!("{:02}/{:02}", date.day(), date.month()),
            calories: 0,
            duration: 0,
        }
    }
}

/// How many exercise entries targeted a muscle group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategoryCount {
    pub muscle_group: MuscleGroup,
    pub count: u32,
}

impl CategoryCount {
    /// Percentage of `total` entries, rounded to the nearest whole number.
    pub fn share(&self, total: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        ((u64::from(self.count) * 100 + u64::from(total) / 2) / u64::from(total)) as u32
    }
}

/// Everything the report view renders for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Report {
    pub window: TimeWindow,
    pub summary: ReportSummary,
    pub daily: Vec<DailyBucket>,
    pub distribution: Vec<CategoryCount>,
}
