use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DEFAULT_RANGE_DELIMITER;
use crate::types::{FieldStyle, NameStyle};

/// Options describing how a date is rendered.
///
/// Mirrors the option bag of a locale date formatter: each recognized field picks a
/// display width, `hour12` forces a 12- or 24-hour clock, and anything else is kept
/// in `extra` and handed to the [`LocaleFormatter`](crate::LocaleFormatter) untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<NameStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<NameStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<FieldStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<FieldStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<FieldStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<FieldStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<FieldStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<FieldStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour12: Option<bool>,
    /// Options this crate does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FormatSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric year, month and day
    pub fn numeric_date() -> Self {
        Self::new()
            .year(FieldStyle::Numeric)
            .month(FieldStyle::Numeric)
            .day(FieldStyle::Numeric)
    }

    #[must_use]
    pub fn weekday(mut self, style: NameStyle) -> Self {
        self.weekday = Some(style);
        self
    }

    #[must_use]
    pub fn era(mut self, style: NameStyle) -> Self {
        self.era = Some(style);
        self
    }

    #[must_use]
    pub fn year(mut self, style: FieldStyle) -> Self {
        self.year = Some(style);
        self
    }

    #[must_use]
    pub fn month(mut self, style: FieldStyle) -> Self {
        self.month = Some(style);
        self
    }

    #[must_use]
    pub fn day(mut self, style: FieldStyle) -> Self {
        self.day = Some(style);
        self
    }

    #[must_use]
    pub fn hour(mut self, style: FieldStyle) -> Self {
        self.hour = Some(style);
        self
    }

    #[must_use]
    pub fn minute(mut self, style: FieldStyle) -> Self {
        self.minute = Some(style);
        self
    }

    #[must_use]
    pub fn second(mut self, style: FieldStyle) -> Self {
        self.second = Some(style);
        self
    }

    #[must_use]
    pub fn hour12(mut self, hour12: bool) -> Self {
        self.hour12 = Some(hour12);
        self
    }

    /// Adds an option this crate passes through without interpreting
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub const fn has_date_fields(&self) -> bool {
        self.weekday.is_some() || self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    pub const fn has_time_fields(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }
}

/// Formats used when rendering dates for input fields and screen readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayFormats {
    pub date_input: FormatSpec,
    pub date_time_input: FormatSpec,
    pub date_a11y_label: FormatSpec,
    pub date_time_a11y_label: FormatSpec,
}

impl Default for DisplayFormats {
    fn default() -> Self {
        Self {
            date_input: FormatSpec::numeric_date(),
            date_time_input: FormatSpec::numeric_date()
                .hour(FieldStyle::TwoDigit)
                .minute(FieldStyle::TwoDigit),
            date_a11y_label: FormatSpec::new()
                .year(FieldStyle::Numeric)
                .month(FieldStyle::Long)
                .day(FieldStyle::Numeric),
            date_time_a11y_label: FormatSpec::new()
                .year(FieldStyle::Numeric)
                .month(FieldStyle::Long)
                .day(FieldStyle::Numeric)
                .hour(FieldStyle::Numeric)
                .minute(FieldStyle::Numeric),
        }
    }
}

/// Formats the parser may use as hints. The generic parser is free to ignore them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseFormats {
    pub date_input: Option<FormatSpec>,
    pub date_time_input: Option<FormatSpec>,
}

/// Display and parse formats handed to date input controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateTimeFormats {
    pub display: DisplayFormats,
    pub parse: ParseFormats,
    pub range_delimiter: String,
}

impl Default for DateTimeFormats {
    fn default() -> Self {
        Self {
            display: DisplayFormats::default(),
            parse: ParseFormats::default(),
            range_delimiter: DEFAULT_RANGE_DELIMITER.to_owned(),
        }
    }
}
