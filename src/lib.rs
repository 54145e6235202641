//! Wall-clock calendar dates with locale-aware formatting and calendar arithmetic.
//!
//! [`CalendarDate`] is a plain six-field record with no timezone. Construction never
//! validates; [`CalendarDate::is_valid`] (or [`DatetimeAdapter::is_valid`]) is the
//! explicit check. [`CalendarAdapter`] combines calendar math, locale naming and
//! formatting, and a generic date parser behind the [`DatetimeAdapter`] trait.

mod adapter;
pub mod calendar;
mod consts;
mod format;
mod locale;
mod parse;
mod prelude;
mod types;

pub use adapter::{
    AdapterConfig, AdapterError, CalendarAdapter, DatetimeAdapter, ListenerId, LocaleListener,
};
pub use consts::*;
pub use format::{DateTimeFormats, DisplayFormats, FormatSpec, ParseFormats};
pub use locale::{
    BuiltinLocaleFormatter, FormatPart, FormatPartKind, LocaleError, LocaleFormatter,
    strip_directionality_characters,
};
pub use parse::{ParseInput, from_timestamp_millis, parse_datetime};
pub use types::{DayPeriod, FieldStyle, NameStyle, StyleError, Weekday};
pub use unic_langid::LanguageIdentifier;

use crate::prelude::*;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A calendar date and time-of-day, always read as wall-clock fields.
///
/// Fields are signed and unchecked so that out-of-range values (month 13, day 0,
/// hour 24) can be represented; they roll over when projected onto the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(
    fmt = "{}-{:02}-{:02}T{:02}:{:02}:{:02}",
    "IsoYear(*year)",
    month,
    day,
    hour,
    minute,
    second
)]
pub struct CalendarDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

/// Error returned when a string is not in canonical `CalendarDate` form.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid number: {_0}")]
    InvalidNumber(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Year rendered the way ISO 8601 expects: four digits, signed outside 0..=9999.
struct IsoYear(i32);

impl fmt::Display for IsoYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            y if y < 0 => write!(f, "-{:04}", y.unsigned_abs()),
            y if y > 9999 => write!(f, "+{y}"),
            y => write!(f, "{y:04}"),
        }
    }
}

impl CalendarDate {
    /// Creates a date at midnight. Never validates.
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self::with_time(year, month, day, 0, 0, 0)
    }

    /// Creates a date with a time-of-day. Never validates.
    pub const fn with_time(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Current UTC wall-clock date and time.
    pub fn now() -> Self {
        let seconds = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
            Err(before) => -i64::try_from(before.duration().as_secs()).unwrap_or(i64::MAX),
        };
        calendar::from_seconds(seconds)
    }

    /// Whether the fields survive a round trip through the calendar unchanged
    /// (year, month and day only; time-of-day overflow shows up as a day change).
    pub fn is_valid(&self) -> bool {
        let projected = calendar::normalize(self);
        projected.year == self.year && projected.month == self.month && projected.day == self.day
    }

    /// Same calendar day with the time-of-day reset to midnight
    pub const fn date_part(&self) -> Self {
        Self::new(self.year, self.month, self.day)
    }

    /// Canonical ISO 8601 text, `YYYY-MM-DDTHH:MM:SS`
    pub fn to_iso8601(&self) -> String {
        self.to_string()
    }
}

impl From<(i32, i32, i32)> for CalendarDate {
    fn from((year, month, day): (i32, i32, i32)) -> Self {
        Self::new(year, month, day)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses the canonical form written by `Display` (`YYYY-MM-DDTHH:MM:SS`)
    /// or a bare `YYYY-MM-DD`. Fields are taken as-is, without validation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (date_text, time_text) = match trimmed.split_once(DATE_TIME_SEPARATOR) {
            Some((date, time)) => (date, Some(time)),
            None => (trimmed, None),
        };

        // A leading sign belongs to the year, not to the separator split.
        let (sign, unsigned) = match date_text.as_bytes().first() {
            Some(b'-') => (-1, &date_text[1..]),
            Some(b'+') => (1, &date_text[1..]),
            _ => (1, date_text),
        };
        let parts: Vec<&str> = unsigned.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        };
        let year = sign * Self::parse_field(year)?;
        let month = Self::parse_field(month)?;
        let day = Self::parse_field(day)?;

        let Some(time_text) = time_text else {
            return Ok(Self::new(year, month, day));
        };
        let parts: Vec<&str> = time_text.split(TIME_SEPARATOR).collect();
        let (hour, minute, second) = match parts.as_slice() {
            [h, m] => (Self::parse_field(h)?, Self::parse_field(m)?, 0),
            [h, m, s] => (
                Self::parse_field(h)?,
                Self::parse_field(m)?,
                Self::parse_field(s)?,
            ),
            _ => return Err(ParseError::InvalidFormat(trimmed.to_owned())),
        };
        Ok(Self::with_time(year, month, day, hour, minute, second))
    }
}

impl CalendarDate {
    fn parse_field(s: &str) -> Result<i32, ParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidNumber(s.to_owned()));
        }
        s.parse::<i32>()
            .map_err(|_| ParseError::InvalidNumber(s.to_owned()))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_fields_compare_equal() {
        let a = CalendarDate::with_time(1991, 8, 15, 10, 30, 0);
        let b = CalendarDate::with_time(1991, 8, 15, 10, 30, 0);
        assert_eq!(a, b);
        assert_ne!(a, CalendarDate::with_time(1991, 8, 15, 10, 30, 1));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = CalendarDate::new(2020, 2, 29);
        #[allow(clippy::clone_on_copy)]
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.day = 1;
        copy.hour = 12;
        assert_eq!(original, CalendarDate::new(2020, 2, 29));
        assert_ne!(copy, original);
    }

    #[test]
    fn test_construction_never_validates() {
        let date = CalendarDate::new(2021, 13, 40);
        assert_eq!(date.month, 13);
        assert_eq!(date.day, 40);
        assert!(!date.is_valid());
    }

    #[test]
    fn test_is_valid() {
        assert!(CalendarDate::new(2020, 2, 29).is_valid());
        assert!(!CalendarDate::new(2021, 2, 29).is_valid());
        assert!(!CalendarDate::new(2021, 4, 31).is_valid());
        assert!(!CalendarDate::new(2021, 0, 10).is_valid());
        // Hour 24 pushes the projection onto the next day
        assert!(!CalendarDate::with_time(2021, 5, 5, 24, 0, 0).is_valid());
        assert!(CalendarDate::with_time(2021, 5, 5, 23, 59, 59).is_valid());
    }

    #[test]
    fn test_february_30_is_never_valid() {
        for year in [1900, 2000, 2019, 2020, 2021, 2024, -4, 0] {
            assert!(
                !CalendarDate::new(year, 2, 30).is_valid(),
                "{year}-02-30 should be invalid"
            );
        }
    }

    #[test]
    fn test_display() {
        let date = CalendarDate::with_time(1991, 8, 15, 9, 5, 3);
        assert_eq!(date.to_string(), "1991-08-15T09:05:03");
        assert_eq!(
            CalendarDate::new(33, 1, 2).to_string(),
            "0033-01-02T00:00:00"
        );
        assert_eq!(
            CalendarDate::new(-44, 3, 15).to_string(),
            "-0044-03-15T00:00:00"
        );
        assert_eq!(
            CalendarDate::new(12000, 1, 1).to_string(),
            "+12000-01-01T00:00:00"
        );
    }

    #[test]
    fn test_from_str() {
        let date: CalendarDate = "1991-08-15T09:05:03".parse().unwrap();
        assert_eq!(date, CalendarDate::with_time(1991, 8, 15, 9, 5, 3));

        let date: CalendarDate = "1991-08-15".parse().unwrap();
        assert_eq!(date, CalendarDate::new(1991, 8, 15));

        let date: CalendarDate = "-0044-03-15T00:00".parse().unwrap();
        assert_eq!(date, CalendarDate::new(-44, 3, 15));

        let date: CalendarDate = "+12000-01-01T00:00:00".parse().unwrap();
        assert_eq!(date.year, 12000);
    }

    #[test]
    fn test_from_str_errors() {
        assert!(matches!(
            "".parse::<CalendarDate>(),
            Err(ParseError::EmptyInput)
        ));
        assert!(matches!(
            "1991-08".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1991-AA-15".parse::<CalendarDate>(),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "1991-08-15T10".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_str_keeps_out_of_range_fields() {
        let date: CalendarDate = "2021-02-30".parse().unwrap();
        assert_eq!(date, CalendarDate::new(2021, 2, 30));
        assert!(!date.is_valid());
    }

    #[test]
    fn test_date_part() {
        let date = CalendarDate::with_time(2022, 6, 1, 18, 45, 12);
        assert_eq!(date.date_part(), CalendarDate::new(2022, 6, 1));
    }

    #[test]
    fn test_now_is_valid() {
        assert!(CalendarDate::now().is_valid());
    }

    #[test]
    fn test_from_tuple() {
        let date: CalendarDate = (2023, 2, 1).into();
        assert_eq!(date, CalendarDate::new(2023, 2, 1));
    }

    #[test]
    fn test_serde_string_format() {
        let date = CalendarDate::with_time(1991, 8, 15, 10, 0, 0);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""1991-08-15T10:00:00""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);

        let result: Result<CalendarDate, _> = serde_json::from_str(r#""yesterday""#);
        assert!(result.is_err());
    }
}
