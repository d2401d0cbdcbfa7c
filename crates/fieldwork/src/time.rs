//! Minutes-since-midnight time values.
//!
//! Time fields store a time of day (or a duration, in interval mode) as whole
//! minutes. `None` means unset everywhere in this module; there is no
//! sentinel integer.
//!
//! Conversions to and from timestamps anchor minute `0` at the Unix epoch, so
//! a value round-trips through [`minutes_to_timestamp`] and
//! [`timestamp_to_minutes`] when read back in UTC.
//!
//! # Example
//!
//! ```
//! use fieldwork::time::{minutes_to_display_string, minutes_to_timestamp, timestamp_to_minutes};
//!
//! let ts = minutes_to_timestamp(90);
//! assert_eq!(ts.timestamp(), 5400);
//! assert_eq!(timestamp_to_minutes(&ts), 90);
//! assert_eq!(minutes_to_display_string(90), "01:30");
//! ```

use std::fmt;

use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::logging::targets;
use crate::validation::{FieldStrategy, InputMode, ValidationResult};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Map a minute count to the instant `minutes × 60` seconds after the Unix epoch.
///
/// Total for every `i32`; no range check is applied.
pub fn minutes_to_timestamp(minutes: i32) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::minutes(i64::from(minutes))
}

/// Extract `hour × 60 + minute` from a timestamp in its own time zone.
///
/// Pass a `DateTime<Utc>` to read the value the way
/// [`minutes_to_timestamp`] wrote it. Other zones shift the result by their
/// offset.
pub fn timestamp_to_minutes<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> i32 {
    // hour() < 24 and minute() < 60, so the sum always fits
    (timestamp.hour() * 60 + timestamp.minute()) as i32
}

/// Format minutes as zero-padded `HH:MM`, wrapping hours at 24.
///
/// Negative input yields an empty string.
pub fn minutes_to_display_string(minutes: i32) -> String {
    if minutes < 0 {
        return String::new();
    }
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    format!("{hours:02}:{mins:02}")
}

/// Format an optional minute count; `None` yields an empty string.
pub fn display_optional(minutes: Option<i32>) -> String {
    minutes.map(minutes_to_display_string).unwrap_or_default()
}

// =============================================================================
// Time text
// =============================================================================

/// A colon-delimited time string split into its components.
///
/// The split rule reads one component as *both* hours and minutes, so `"130"`
/// reports 130 hours and 130 minutes. Two components are hours then minutes.
/// Any other count leaves both unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeText {
    text: String,
    hours: Option<u32>,
    minutes: Option<u32>,
}

impl TimeText {
    /// Split a time string.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let components: Vec<&str> = text.split(':').collect();
        let (hours, minutes) = match components.as_slice() {
            [single] => {
                let value = single.parse().ok();
                (value, value)
            }
            [hours, minutes] => (hours.parse().ok(), minutes.parse().ok()),
            _ => (None, None),
        };
        Self {
            text,
            hours,
            minutes,
        }
    }

    /// The original text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The hours component, if present.
    pub fn hours(&self) -> Option<u32> {
        self.hours
    }

    /// The minutes component, if present.
    pub fn minutes(&self) -> Option<u32> {
        self.minutes
    }

    /// The clock time, if the text is fully entered.
    ///
    /// Text shorter than four characters is treated as unset so a partially
    /// deleted field is never read as a valid time.
    pub fn clock_time(&self) -> Option<ClockTime> {
        if self.text.chars().count() < 4 {
            return None;
        }
        Some(ClockTime::new(self.hours?, self.minutes?))
    }

    /// `hours × 60 + minutes`, if the text is fully entered.
    pub fn total_minutes(&self) -> Option<i32> {
        self.clock_time().and_then(|time| time.total_minutes())
    }
}

/// Hours and minutes as typed, before range checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    /// Hours component.
    pub hours: u32,
    /// Minutes component.
    pub minutes: u32,
}

impl ClockTime {
    /// Create a clock time from its components.
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Build a clock time from a minute count, wrapping hours at 24.
    ///
    /// Returns `None` for negative input.
    pub fn from_minutes(minutes: i32) -> Option<Self> {
        let minutes = u32::try_from(minutes).ok()?;
        Some(Self::new((minutes / 60) % 24, minutes % 60))
    }

    /// Returns `true` for `00:00` through `23:59`.
    pub fn is_valid(&self) -> bool {
        self.hours < 24 && self.minutes < 60
    }

    /// `hours × 60 + minutes`, or `None` if that overflows.
    pub fn total_minutes(&self) -> Option<i32> {
        let total = self.hours.checked_mul(60)?.checked_add(self.minutes)?;
        i32::try_from(total).ok()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

// =============================================================================
// Time mode
// =============================================================================

/// What a time field measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    /// A time of day.
    #[default]
    Time,
    /// A duration counted from zero.
    Interval,
}

impl TimeMode {
    /// The minute a picker should start on.
    ///
    /// A set value is used as is. When unset, time-of-day pickers start at
    /// the current wall-clock minute of `now` and interval pickers start at
    /// zero.
    pub fn picker_start_minutes<Tz: TimeZone>(self, value: Option<i32>, now: &DateTime<Tz>) -> i32 {
        match (value, self) {
            (Some(minutes), _) => minutes,
            (None, TimeMode::Time) => current_minutes(now),
            (None, TimeMode::Interval) => 0,
        }
    }
}

/// The wall-clock minute of `now`, for "Now" shortcuts.
pub fn current_minutes<Tz: TimeZone>(now: &DateTime<Tz>) -> i32 {
    let minutes = timestamp_to_minutes(now);
    tracing::trace!(target: targets::TIME, minutes, "resolved current minute");
    minutes
}

// =============================================================================
// Time strategy
// =============================================================================

/// Strategy for `HH:MM` time fields.
///
/// Accepts digits and `:`, caps typing at five characters, and inserts the
/// colon automatically once a third character arrives without one.
///
/// # Example
///
/// ```
/// use fieldwork::time::{ClockTime, TimeStrategy};
/// use fieldwork::validation::FieldStrategy;
///
/// let strategy = TimeStrategy::new();
///
/// assert_eq!(strategy.fixup("123"), Some("12:3".to_string()));
/// assert_eq!(strategy.parse("12:34"), Some(ClockTime::new(12, 34)));
/// assert!(!strategy.validate(&ClockTime::new(24, 0)).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeStrategy {
    mode: TimeMode,
}

impl TimeStrategy {
    /// Longest text a time field accepts (`HH:MM`).
    pub const MAX_LENGTH: usize = 5;

    /// The message reported for an out-of-range time.
    pub const INVALID_TIME: &'static str = "No valid time.\n(00:00 - 23:59)";

    /// Create a time-of-day strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strategy for the given mode.
    pub fn with_mode(mode: TimeMode) -> Self {
        Self { mode }
    }

    /// Get the mode.
    pub fn mode(&self) -> TimeMode {
        self.mode
    }
}

impl FieldStrategy for TimeStrategy {
    type Value = ClockTime;

    fn allows_character(&self, c: char) -> bool {
        c.is_ascii_digit() || c == ':'
    }

    fn parse(&self, text: &str) -> Option<ClockTime> {
        TimeText::new(text).clock_time()
    }

    fn validate(&self, value: &ClockTime) -> ValidationResult {
        if value.is_valid() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(Self::INVALID_TIME.to_string())
        }
    }

    fn format(&self, value: &ClockTime) -> String {
        value.to_string()
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Time
    }

    fn max_input_length(&self) -> Option<usize> {
        Some(Self::MAX_LENGTH)
    }

    fn fixup(&self, text: &str) -> Option<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() == 3 && chars[1] != ':' && chars[2] != ':' {
            let mut fixed = String::with_capacity(4);
            fixed.extend(&chars[..2]);
            fixed.push(':');
            fixed.push(chars[2]);
            return Some(fixed);
        }
        None
    }
}
