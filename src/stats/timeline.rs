//! Timeline aggregation - day bucketing, running averages, velocity
//!
//! Turns a newest-first activity sequence into per-day buckets plus
//! timeline-wide totals. Pure and total: no I/O, never fails, an empty
//! input yields zeroed stats.
//!
//! The aggregator is re-run wholesale every time more history is paged in.
//! Pages fetched later are *older* than everything already seen, so an
//! incremental scheme would have to re-open (and possibly re-split) the
//! oldest existing bucket whenever a new page's newest record lands on the
//! same calendar day. Recomputing the whole thing is simpler and still
//! cheap at API-bounded timeline sizes.

use crate::types::ActivityRecord;
use chrono::NaiveDate;

/// All activity records sharing one calendar day.
///
/// Ordered most-recent-day-first in `TimelineStats::days`, matching the
/// source ordering of the timeline itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    /// Calendar date shared by every record in this bucket
    pub date: NaiveDate,

    /// Records from this day, newest first
    pub activities: Vec<ActivityRecord>,

    /// Combined text length of the day's records
    pub total_text_length: u64,

    /// Mean text length for the day, rounded to 2 decimals
    pub average_text_length: f64,

    /// Signed change in activity count versus the next *older* bucket.
    ///
    /// Positive means this day was more active than the day after it in
    /// decreasing-date order. `None` for the oldest bucket only; display
    /// code depends on this exact sign convention.
    pub velocity: Option<i64>,
}

impl DayBucket {
    fn open(date: NaiveDate) -> Self {
        Self {
            date,
            activities: Vec::new(),
            total_text_length: 0,
            average_text_length: 0.0,
            velocity: None,
        }
    }

    /// Number of activities on this day.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}

/// Derived statistics over a full timeline.
///
/// Replaced in full on every aggregation pass, never patched field by
/// field.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStats {
    /// The full raw sequence, newest first
    pub activities: Vec<ActivityRecord>,

    /// Day buckets, strictly decreasing by date, one per active day
    pub days: Vec<DayBucket>,

    /// Combined text length across the whole timeline
    pub total_text_length: u64,

    /// Mean text length per activity, rounded to 2 decimals (0 when empty)
    pub average_text_length: f64,

    /// Mean activities per active day, rounded to 2 decimals (0 when empty)
    pub average_activities_per_day: f64,
}

impl TimelineStats {
    /// Stats over an empty timeline: no days, zero totals and averages.
    pub fn empty() -> Self {
        aggregate_timeline(Vec::new())
    }

    /// Total number of activities aggregated so far.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}

/// Round to 2 decimal places for display-stable averages.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Close out a finished bucket: finalize its average, append it, and
/// retroactively assign the previous bucket's velocity now that its next
/// older neighbour's count is known.
fn close_bucket(mut bucket: DayBucket, days: &mut Vec<DayBucket>) {
    if !bucket.activities.is_empty() {
        bucket.average_text_length =
            round2(bucket.total_text_length as f64 / bucket.activities.len() as f64);
    }
    days.push(bucket);

    let n = days.len();
    if n >= 2 {
        let newer = days[n - 2].activity_count() as i64;
        let older = days[n - 1].activity_count() as i64;
        days[n - 2].velocity = Some(newer - older);
    }
}

/// Bucket a newest-first activity sequence by calendar day and compute
/// running totals and averages.
///
/// The input must already be ordered newest-first (the remote API's native
/// order); no re-sorting happens here. Day boundaries are wall-clock
/// day/month/year comparisons in the records' single reference timezone,
/// not elapsed-time comparisons: 23 hours apart is two buckets if midnight
/// was crossed.
///
/// Properties callers rely on:
/// - the buckets concatenated in order equal the input exactly
/// - `days[i].velocity == count(i) - count(i + 1)`, absent only for the
///   oldest bucket
/// - averages over zero records are 0, never NaN
pub fn aggregate_timeline(activities: Vec<ActivityRecord>) -> TimelineStats {
    let mut days: Vec<DayBucket> = Vec::new();
    let mut total_text_length: u64 = 0;
    let mut current: Option<DayBucket> = None;

    for record in &activities {
        let date = record.created_at.date_naive();

        let crosses_day = current.as_ref().map(|b| b.date != date).unwrap_or(true);
        if crosses_day {
            if let Some(finished) = current.take() {
                close_bucket(finished, &mut days);
            }
            current = Some(DayBucket::open(date));
        }

        let length = record.text_length();
        total_text_length += length;
        if let Some(bucket) = current.as_mut() {
            bucket.activities.push(record.clone());
            bucket.total_text_length += length;
        }
    }

    if let Some(finished) = current.take() {
        close_bucket(finished, &mut days);
    }

    // Top-level averages once at the end, avoiding per-record division
    let average_text_length = if activities.is_empty() {
        0.0
    } else {
        round2(total_text_length as f64 / activities.len() as f64)
    };
    let average_activities_per_day = if days.is_empty() {
        0.0
    } else {
        round2(activities.len() as f64 / days.len() as f64)
    };

    TimelineStats {
        activities,
        days,
        total_text_length,
        average_text_length,
        average_activities_per_day,
    }
}
