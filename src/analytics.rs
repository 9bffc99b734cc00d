//! Descriptive analytics over the canonical message sequence.
//!
//! Every function in this module is a pure projection of a `&[Message]`
//! slice; nothing here mutates state or fails. The [`Analyzer`](crate::Analyzer)
//! exposes these over its stored sequence, but they are equally usable
//! standalone.
//!
//! # The time series
//!
//! [`time_series`] is the central algorithm. It buckets messages by calendar
//! interval ([`Granularity`]) and guarantees two properties:
//!
//! - **Continuity**: every bucket between the earliest and latest message
//!   appears, with count zero when no message fell into it, so gaps are
//!   visible rather than silently omitted.
//! - **Current-period exclusion**: the bucket containing "now" is incomplete
//!   and never appears, and messages falling into it are not counted.
//!
//! "Now" is evaluated at call time, not at ingestion time, so the output can
//! change between calls as real time crosses a bucket boundary. That is a
//! deliberate property of the contract, kept here; [`time_series_at`] takes
//! the clock explicitly for deterministic use.
//!
//! Bucket keys are chosen so that lexical order equals calendar order
//! (zero-padded `2024-01-05`, ISO-week `2024-W02`, `2024-01`), which lets a
//! plain string sort produce a chronological series.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::Message;

/// Calendar interval used to bucket the time series.
///
/// Selects both the bucket-key format and the calendar step used to
/// enumerate buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One calendar day, keyed `YYYY-MM-DD`.
    Day,
    /// One ISO calendar week, keyed `GGGG-WVV` (ISO week-year and week).
    Week,
    /// One calendar month, keyed `YYYY-MM`.
    Month,
}

impl Granularity {
    /// Returns the bucket key for a timestamp.
    ///
    /// Keys are zero-padded so lexical order matches calendar order.
    pub fn bucket_key(self, ts: NaiveDateTime) -> String {
        match self {
            Granularity::Day => ts.format("%Y-%m-%d").to_string(),
            Granularity::Week => ts.format("%G-W%V").to_string(),
            Granularity::Month => ts.format("%Y-%m").to_string(),
        }
    }

    /// Returns the first day of the bucket containing `date`.
    fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                date - Days::new(u64::from(date.weekday().num_days_from_monday()))
            }
            Granularity::Month => date.with_day(1).unwrap(),
        }
    }

    /// Returns the first day of the bucket after the one starting at `start`.
    fn step(self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => start.checked_add_days(Days::new(1)),
            Granularity::Week => start.checked_add_days(Days::new(7)),
            Granularity::Month => start.checked_add_months(Months::new(1)),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Week => write!(f, "week"),
            Granularity::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            _ => Err(format!(
                "Unknown granularity: '{s}'. Expected one of: day, week, month"
            )),
        }
    }
}

/// One sender with their message count.
///
/// A leaderboard is a `Vec<SenderCount>` sorted by count descending, ties
/// broken by first appearance in the message sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderCount {
    /// Sender display name.
    pub sender: String,
    /// Number of messages from this sender.
    pub count: u64,
}

/// One calendar bucket of the time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Bucket key; unique within a series, lexically and chronologically
    /// sorted.
    pub bucket: String,
    /// Number of messages in this bucket.
    pub count: u64,
}

/// Counts messages per sender.
///
/// The mapping is unordered; use [`top_senders`] for a ranking.
pub fn sender_frequency(messages: &[Message]) -> HashMap<String, u64> {
    let mut frequency: HashMap<String, u64> = HashMap::new();
    for msg in messages {
        *frequency.entry(msg.sender.clone()).or_insert(0) += 1;
    }
    frequency
}

/// Ranks senders by message count, descending.
///
/// Ties keep first-seen order. `limit` truncates the result; `Some(0)`
/// yields an empty leaderboard, a limit beyond the number of distinct
/// senders yields all of them.
pub fn top_senders(messages: &[Message], limit: Option<usize>) -> Vec<SenderCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<SenderCount> = Vec::new();

    for msg in messages {
        match index.get(msg.sender.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(&msg.sender, counts.len());
                counts.push(SenderCount {
                    sender: msg.sender.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    if let Some(limit) = limit {
        counts.truncate(limit);
    }
    counts
}

/// Computes the calendar-bucketed time series, evaluating "now" at call time.
///
/// Optionally restricts to a single sender (exact match on the normalized
/// name). See the module docs for the continuity and current-period
/// guarantees.
pub fn time_series(
    messages: &[Message],
    granularity: Granularity,
    sender: Option<&str>,
) -> Vec<TimeSeriesPoint> {
    time_series_at(messages, granularity, sender, Local::now().naive_local())
}

/// [`time_series`] with an explicit clock.
///
/// The bucket containing `now` is the excluded current period. Production
/// callers want [`time_series`]; this variant exists so the exclusion is
/// testable without waiting for midnight.
pub fn time_series_at(
    messages: &[Message],
    granularity: Granularity,
    sender: Option<&str>,
    now: NaiveDateTime,
) -> Vec<TimeSeriesPoint> {
    let mut working: Vec<&Message> = match sender {
        Some(name) => messages.iter().filter(|m| m.sender == name).collect(),
        None => messages.iter().collect(),
    };

    if working.is_empty() {
        return vec![];
    }

    working.sort_by_key(|m| m.timestamp);

    let current_key = granularity.bucket_key(now);

    // Zero-fill every bucket from the earliest to the latest message so a
    // silent week still shows up as zero.
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    let first = granularity.bucket_start(working[0].timestamp.date());
    let last = granularity.bucket_start(working[working.len() - 1].timestamp.date());

    let mut cursor = first;
    while cursor <= last {
        let key = granularity.bucket_key(cursor.and_hms_opt(0, 0, 0).unwrap());
        if key != current_key {
            buckets.insert(key, 0);
        }
        match granularity.step(cursor) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    for msg in &working {
        let key = granularity.bucket_key(msg.timestamp);
        if key == current_key {
            continue;
        }
        *buckets.entry(key).or_insert(0) += 1;
    }

    // BTreeMap iterates in lexical key order, which the key formats make
    // chronological.
    buckets
        .into_iter()
        .map(|(bucket, count)| TimeSeriesPoint { bucket, count })
        .collect()
}

/// Counts messages per local hour of day.
///
/// Index = hour (0-23) of each message's timestamp; always 24 slots.
pub fn hour_histogram(messages: &[Message]) -> [u64; 24] {
    let mut hours = [0u64; 24];
    for msg in messages {
        hours[msg.timestamp.hour() as usize] += 1;
    }
    hours
}
