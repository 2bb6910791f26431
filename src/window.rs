//! Time window used to admit records.
//!
//! Bounds are either absolute RFC3339 instants or relative durations
//! (`15m`, `1h30m`, `2days`) counted back from "now". The lower bound is
//! inclusive and the upper bound exclusive.

use chrono::{DateTime, FixedOffset, TimeDelta};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error(
        "Invalid {bound} '{value}': expected a duration (eg 90s, 15m, 1h30m) or an RFC3339 time (eg 2017-02-13T09:16:57Z)"
    )]
    InvalidBound { bound: &'static str, value: String },

    #[error("Duration for {bound} '{value}' is out of range")]
    OutOfRange { bound: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    from: Option<DateTime<FixedOffset>>,
    to: Option<DateTime<FixedOffset>>,
}

impl TimeWindow {
    pub fn new(from: Option<DateTime<FixedOffset>>, to: Option<DateTime<FixedOffset>>) -> Self {
        Self { from, to }
    }

    /// A window with neither bound set
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from(&self) -> Option<&DateTime<FixedOffset>> {
        self.from.as_ref()
    }

    pub fn to(&self) -> Option<&DateTime<FixedOffset>> {
        self.to.as_ref()
    }

    /// `from <= timestamp < to`, with a missing bound leaving that side open
    pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        self.from.is_none_or(|from| *timestamp >= from) && self.to.is_none_or(|to| *timestamp < to)
    }

    /// True when both bounds are set and nothing can fall between them
    pub fn is_empty(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from >= to)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |bound: Option<DateTime<FixedOffset>>| {
            bound.map_or_else(|| "unbounded".to_string(), |ts| ts.to_rfc3339())
        };
        write!(f, "[{}, {})", render(self.from), render(self.to))
    }
}

/// Parse one window bound.
///
/// An empty value leaves the bound unset. A duration is subtracted from
/// `now`; anything else must be an RFC3339 instant.
pub fn parse_bound(
    bound: &'static str,
    value: &str,
    now: DateTime<FixedOffset>,
) -> Result<Option<DateTime<FixedOffset>>, WindowError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if let Ok(duration) = humantime::parse_duration(value) {
        let delta = TimeDelta::from_std(duration).map_err(|_| WindowError::OutOfRange {
            bound,
            value: value.to_string(),
        })?;
        return now
            .checked_sub_signed(delta)
            .map(Some)
            .ok_or_else(|| WindowError::OutOfRange {
                bound,
                value: value.to_string(),
            });
    }

    DateTime::parse_from_rfc3339(value)
        .map(Some)
        .map_err(|_| WindowError::InvalidBound {
            bound,
            value: value.to_string(),
        })
}
