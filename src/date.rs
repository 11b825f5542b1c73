//! Date arguments for the query API.
//!
//! Every date-accepting operation takes `impl Into<DateInput>` and converts it
//! with [`DateInput::normalize`] before comparing. Callers can pass a
//! [`NaiveDateTime`], a [`NaiveDate`], a `DateTime<Utc>`, or a calendar tuple:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `(2024, 6, 15)` | midnight at the start of the day |
//! | `(2024, 6, 15, 9)` | 09:00 |
//! | `(2024, 6, 15, 9, 30)` | 09:30 |
//!
//! No timezone adjustment is ever applied: a `DateTime<Utc>` contributes its
//! naive UTC value, and message timestamps are compared as stored.
//!
//! # Examples
//!
//! ```
//! use chatlog::date::DateInput;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatlog::Result<()> {
//! let from_tuple = DateInput::from((2024, 6, 15, 9, 30)).normalize()?;
//! let expected = NaiveDate::from_ymd_opt(2024, 6, 15)
//!     .unwrap()
//!     .and_hms_opt(9, 30, 0)
//!     .unwrap();
//! assert_eq!(from_tuple, expected);
//!
//! // Impossible dates are reported, not clamped
//! assert!(DateInput::from((2024, 2, 30)).normalize().is_err());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::error::{ChatlogError, Result};

/// A date argument, either an exact timestamp or calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// An already constructed date-time value.
    Timestamp(NaiveDateTime),

    /// Calendar fields; a missing hour or minute means `0`.
    Calendar {
        year: i32,
        month: u32,
        day: u32,
        hour: Option<u32>,
        minute: Option<u32>,
    },
}

impl DateInput {
    /// Creates a calendar date at midnight.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        DateInput::Calendar {
            year,
            month,
            day,
            hour: None,
            minute: None,
        }
    }

    /// Creates a calendar date with an hour and minute.
    pub fn ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        DateInput::Calendar {
            year,
            month,
            day,
            hour: Some(hour),
            minute: Some(minute),
        }
    }

    /// Converts the input into the date-time value used for comparisons.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlogError::InvalidDate`] for calendar fields that do not
    /// name a real date and time, or for a minute given without an hour.
    pub fn normalize(&self) -> Result<NaiveDateTime> {
        match *self {
            DateInput::Timestamp(ts) => Ok(ts),
            DateInput::Calendar {
                year,
                month,
                day,
                hour,
                minute,
            } => {
                if hour.is_none() && minute.is_some() {
                    return Err(ChatlogError::invalid_date(
                        self.to_string(),
                        "minute given without an hour",
                    ));
                }
                let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                    ChatlogError::invalid_date(self.to_string(), "no such calendar date")
                })?;
                date.and_hms_opt(hour.unwrap_or(0), minute.unwrap_or(0), 0)
                    .ok_or_else(|| {
                        ChatlogError::invalid_date(self.to_string(), "hour or minute out of range")
                    })
            }
        }
    }
}

/// Normalizes a `sent_between` pair into inclusive bounds.
///
/// Without an `end`, the window covers the 24 hours starting at `start`: the
/// calendar day when `start` has no time component.
pub fn window(start: &DateInput, end: Option<&DateInput>) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let start_ts = start.normalize()?;
    let end_ts = match end {
        Some(end) => end.normalize()?,
        None => start_ts
            .checked_add_signed(Duration::hours(24))
            .ok_or_else(|| ChatlogError::invalid_date(start.to_string(), "window end out of range"))?,
    };
    Ok((start_ts, end_ts))
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateInput::Timestamp(ts) => write!(f, "{}", ts),
            DateInput::Calendar {
                year,
                month,
                day,
                hour,
                minute,
            } => {
                write!(f, "({}, {}, {}", year, month, day)?;
                if let Some(hour) = hour {
                    write!(f, ", {}", hour)?;
                }
                if let Some(minute) = minute {
                    write!(f, ", {}", minute)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(ts: NaiveDateTime) -> Self {
        DateInput::Timestamp(ts)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Timestamp(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(ts: DateTime<Utc>) -> Self {
        DateInput::Timestamp(ts.naive_utc())
    }
}

impl From<(i32, u32, u32)> for DateInput {
    fn from((year, month, day): (i32, u32, u32)) -> Self {
        DateInput::ymd(year, month, day)
    }
}

impl From<(i32, u32, u32, u32)> for DateInput {
    fn from((year, month, day, hour): (i32, u32, u32, u32)) -> Self {
        DateInput::Calendar {
            year,
            month,
            day,
            hour: Some(hour),
            minute: None,
        }
    }
}

impl From<(i32, u32, u32, u32, u32)> for DateInput {
    fn from((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> Self {
        DateInput::ymd_hm(year, month, day, hour, minute)
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

impl FromStr for DateInput {
    type Err = ChatlogError;

    /// Parses `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DDTHH:MM[:SS]`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date.into());
        }
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(DateInput::Timestamp)
            .ok_or_else(|| ChatlogError::invalid_date(s, "expected YYYY-MM-DD[ HH:MM[:SS]]"))
    }
}
