// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Report aggregation over the session log.
//!
//! The workflow for one report:
//! 1. Filter sessions to the selected look-back window
//! 2. Sum calories, minutes and session count
//! 3. Bucket sessions by calendar day for the charts
//! 4. Count exercise entries per muscle group
//!
//! Every function here borrows its input and never mutates it.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::collections::BTreeMap;

use crate::db::RecordStore;
use crate::error::Result;
use crate::models::{
    CategoryCount, DailyBucket, MuscleGroup, Report, ReportSummary, TimeWindow, WorkoutSession,
};

/// Most days shown on the daily charts.
pub const MAX_DAILY_BUCKETS: usize = 7;

/// Keep sessions dated at or after `now - window`, preserving input order.
///
/// The lower bound is inclusive and there is no upper bound, so sessions
/// stamped in the future (clock skew) are kept.
pub fn filter_by_window<'a, I, Tz>(
    sessions: I,
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> Vec<&'a WorkoutSession>
where
    I: IntoIterator<Item = &'a WorkoutSession>,
    Tz: TimeZone,
{
    let cutoff = window.cutoff(now).map(|c| c.with_timezone(&Utc));
    sessions
        .into_iter()
        .filter(|s| cutoff.map_or(true, |cutoff| s.date >= cutoff))
        .collect()
}

/// Sum the precomputed session totals.
pub fn summarize<'a, I>(sessions: I) -> ReportSummary
where
    I: IntoIterator<Item = &'a WorkoutSession>,
{
    sessions
        .into_iter()
        .fold(ReportSummary::default(), |mut summary, s| {
            summary.calories += u64::from(s.total_calories);
            summary.duration += u64::from(s.total_duration);
            summary.count += 1;
            summary
        })
}

/// Group sessions by calendar date in `tz`.
///
/// Buckets come back oldest first, limited to the most recent
/// [`MAX_DAILY_BUCKETS`] dates that have at least one session.
pub fn bucket_by_day<'a, I, Tz>(sessions: I, tz: &Tz) -> Vec<DailyBucket>
where
    I: IntoIterator<Item = &'a WorkoutSession>,
    Tz: TimeZone,
{
    let mut by_day: BTreeMap<_, DailyBucket> = BTreeMap::new();
    for session in sessions {
        let day = session.date.with_timezone(tz).date_naive();
        let bucket = by_day.entry(day).or_insert_with(|| DailyBucket::new(day));
        bucket.calories += u64::from(session.total_calories);
        bucket.duration += u64::from(session.total_duration);
    }

    let skip = by_day.len().saturating_sub(MAX_DAILY_BUCKETS);
    by_day.into_values().skip(skip).collect()
}

/// Count exercise entries per muscle group.
///
/// Each `WorkoutExercise` counts once regardless of its set count; groups
/// that never appear are omitted. Output follows [`MuscleGroup::ALL`] order.
pub fn category_distribution<'a, I>(sessions: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a WorkoutSession>,
{
    let mut counts: BTreeMap<MuscleGroup, u32> = BTreeMap::new();
    for session in sessions {
        for entry in &session.exercises {
            *counts.entry(entry.exercise.muscle_group).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(muscle_group, count)| CategoryCount {
            muscle_group,
            count,
        })
        .collect()
}

/// Total entries across a distribution, for percentage labels.
pub fn distribution_total(distribution: &[CategoryCount]) -> u32 {
    distribution.iter().map(|c| c.count).sum()
}

/// Build a full report from an in-memory session list.
pub fn build_report<Tz: TimeZone>(
    sessions: &[WorkoutSession],
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> Report {
    let filtered = filter_by_window(sessions, window, now);
    let tz = now.timezone();

    Report {
        window,
        summary: summarize(filtered.iter().copied()),
        daily: bucket_by_day(filtered.iter().copied(), &tz),
        distribution: category_distribution(filtered.iter().copied()),
    }
}

/// Reads the session log from the store and assembles reports.
#[derive(Clone)]
pub struct ReportService {
    store: RecordStore,
    tz: FixedOffset,
}

impl ReportService {
    /// `tz` decides which calendar day a session belongs to.
    pub fn new(store: RecordStore, tz: FixedOffset) -> Self {
        Self { store, tz }
    }

    /// Report for `window` ending now.
    pub fn build(&self, window: TimeWindow) -> Result<Report> {
        self.build_at(window, Utc::now().with_timezone(&self.tz))
    }

    /// Report for `window` ending at `now`.
    pub fn build_at(&self, window: TimeWindow, now: DateTime<FixedOffset>) -> Result<Report> {
        let sessions = self.store.sessions()?;
        let report = build_report(&sessions, window, &now.with_timezone(&self.tz));

        tracing::debug!(
            window = %window,
            total_sessions = sessions.len(),
            in_window = report.summary.count,
            days = report.daily.len(),
            "Report computed"
        );

        Ok(report)
    }
}
