//! Temporal activation constraints
//!
//! A constraint limits when a role assignment may be activated in a session:
//! a date range, a lockout window, a time-of-day window, a set of weekdays
//! and an idle timeout. Every field is optional; an empty constraint never
//! blocks activation.

use crate::error::{CoreError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Marker used by the directory encoding for an unset field
const NONE_FIELD: &str = "none";

/// Marker used by the directory encoding for "every day of the week"
const ALL_DAYS: &str = "all";

/// Temporal constraint attached to a role assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalConstraint {
    /// Idle timeout in minutes (0 = no timeout)
    #[serde(default)]
    pub timeout: u32,

    /// Earliest time of day the role may be active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<NaiveTime>,

    /// Latest time of day the role may be active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,

    /// First date the role may be active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_date: Option<NaiveDate>,

    /// Last date the role may be active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Start of a lockout period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_lock_date: Option<NaiveDate>,

    /// End of a lockout period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_lock_date: Option<NaiveDate>,

    /// Weekdays the role may be active on (empty = every day)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<Weekday>,
}

impl TemporalConstraint {
    /// Create an empty constraint
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict activation to a date range (inclusive)
    pub fn with_date_range(mut self, begin: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.begin_date = begin;
        self.end_date = end;
        self
    }

    /// Block activation during a lockout window (inclusive)
    pub fn with_lockout(mut self, begin: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.begin_lock_date = begin;
        self.end_lock_date = end;
        self
    }

    /// Restrict activation to a time-of-day window (inclusive)
    pub fn with_time_window(mut self, begin: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.begin_time = begin;
        self.end_time = end;
        self
    }

    /// Restrict activation to the given weekdays
    pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days = days.into_iter().collect();
        self.days.sort_by_key(|d| d.number_from_sunday());
        self.days.dedup();
        self
    }

    /// Set an idle timeout in minutes
    pub fn with_timeout(mut self, minutes: u32) -> Self {
        self.timeout = minutes;
        self
    }

    /// True when no field restricts activation
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }

    /// Check whether the date of `at` falls inside the begin/end date range
    pub fn date_allowed(&self, at: NaiveDateTime) -> bool {
        let date = at.date();
        if let Some(begin) = self.begin_date {
            if date < begin {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    /// Check whether the date of `at` falls inside the lockout window
    ///
    /// An open-ended window (only one bound) locks from/until that bound.
    pub fn locked_out(&self, at: NaiveDateTime) -> bool {
        let date = at.date();
        match (self.begin_lock_date, self.end_lock_date) {
            (None, None) => false,
            (Some(begin), None) => date >= begin,
            (None, Some(end)) => date <= end,
            (Some(begin), Some(end)) => date >= begin && date <= end,
        }
    }

    /// Check whether the time of `at` falls inside the time-of-day window
    ///
    /// A window whose end precedes its begin wraps past midnight.
    pub fn time_allowed(&self, at: NaiveDateTime) -> bool {
        let time = at.time();
        match (self.begin_time, self.end_time) {
            (None, None) => true,
            (Some(begin), None) => time >= begin,
            (None, Some(end)) => time <= end,
            (Some(begin), Some(end)) if begin <= end => time >= begin && time <= end,
            (Some(begin), Some(end)) => time >= begin || time <= end,
        }
    }

    /// Check whether the weekday of `at` is allowed
    pub fn day_allowed(&self, at: NaiveDateTime) -> bool {
        self.days.is_empty() || self.days.contains(&at.weekday())
    }

    pub(crate) fn encode_fields(&self) -> Vec<String> {
        vec![
            self.timeout.to_string(),
            self.begin_time.map(format_time).unwrap_or_default(),
            self.end_time.map(format_time).unwrap_or_default(),
            self.begin_date.map(format_date).unwrap_or_default(),
            self.end_date.map(format_date).unwrap_or_default(),
            self.begin_lock_date.map(format_date).unwrap_or_default(),
            self.end_lock_date.map(format_date).unwrap_or_default(),
            format_days(&self.days),
        ]
    }

    /// Decode the fields following the role name in a raw assignment value
    ///
    /// Order: timeout, begin time, end time, begin date, end date,
    /// begin lock date, end lock date, day mask. Missing trailing fields are
    /// treated as unset.
    pub(crate) fn decode_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() > 8 {
            return Err(CoreError::invalid_raw(format!(
                "expected at most 8 constraint fields, found {}",
                fields.len()
            )));
        }

        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        let timeout = match field(0).trim() {
            "" | NONE_FIELD => 0,
            value => value.parse::<u32>().map_err(|_| {
                CoreError::invalid_raw(format!("timeout '{}' is not a number", value))
            })?,
        };

        Ok(Self {
            timeout,
            begin_time: parse_time(field(1))?,
            end_time: parse_time(field(2))?,
            begin_date: parse_date(field(3))?,
            end_date: parse_date(field(4))?,
            begin_lock_date: parse_date(field(5))?,
            end_lock_date: parse_date(field(6))?,
            days: parse_days(field(7))?,
        })
    }
}

fn is_unset(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(NONE_FIELD)
}

/// Parse an `HHMM` time of day
fn parse_time(value: &str) -> Result<Option<NaiveTime>> {
    let value = value.trim();
    if is_unset(value) {
        return Ok(None);
    }
    NaiveTime::parse_from_str(value, "%H%M")
        .map(Some)
        .map_err(|e| CoreError::invalid_raw(format!("time '{}': {}", value, e)))
}

/// Parse a `YYYYMMDD` date
fn parse_date(value: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if is_unset(value) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .map(Some)
        .map_err(|e| CoreError::invalid_raw(format!("date '{}': {}", value, e)))
}

/// Parse a day mask such as `"23456"` (1 = Sunday .. 7 = Saturday)
fn parse_days(value: &str) -> Result<Vec<Weekday>> {
    let value = value.trim();
    if is_unset(value) || value.eq_ignore_ascii_case(ALL_DAYS) {
        return Ok(Vec::new());
    }

    let mut days = Vec::with_capacity(value.len());
    for c in value.chars() {
        let day = match c {
            '1' => Weekday::Sun,
            '2' => Weekday::Mon,
            '3' => Weekday::Tue,
            '4' => Weekday::Wed,
            '5' => Weekday::Thu,
            '6' => Weekday::Fri,
            '7' => Weekday::Sat,
            other => {
                return Err(CoreError::invalid_raw(format!(
                    "day mask '{}' contains '{}'",
                    value, other
                )))
            }
        };
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days.sort_by_key(|d| d.number_from_sunday());
    Ok(days)
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H%M").to_string()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn format_days(days: &[Weekday]) -> String {
    if days.is_empty() {
        return ALL_DAYS.to_string();
    }
    days.iter()
        .map(|d| char::from(b'0' + d.number_from_sunday() as u8))
        .collect()
}
