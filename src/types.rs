use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Error returned when a display-width keyword is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown display style: {0}")]
pub struct StyleError(pub String);

/// Display width for a single date or time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum FieldStyle {
    /// `8`, `1991`
    #[display(fmt = "numeric")]
    #[serde(rename = "numeric")]
    Numeric,
    /// `08`, `91`
    #[display(fmt = "2-digit")]
    #[serde(rename = "2-digit")]
    TwoDigit,
    /// `Aug`
    #[display(fmt = "short")]
    #[serde(rename = "short")]
    Short,
    /// `August`
    #[display(fmt = "long")]
    #[serde(rename = "long")]
    Long,
    /// `A`
    #[display(fmt = "narrow")]
    #[serde(rename = "narrow")]
    Narrow,
}

impl FieldStyle {
    /// Whether the field is rendered as a word rather than digits
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Short | Self::Long | Self::Narrow)
    }

    /// Name width this style maps to, if textual
    pub const fn name_style(self) -> Option<NameStyle> {
        match self {
            Self::Short => Some(NameStyle::Short),
            Self::Long => Some(NameStyle::Long),
            Self::Narrow => Some(NameStyle::Narrow),
            Self::Numeric | Self::TwoDigit => None,
        }
    }
}

impl FromStr for FieldStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "numeric" => Ok(Self::Numeric),
            "2-digit" => Ok(Self::TwoDigit),
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            "narrow" => Ok(Self::Narrow),
            other => Err(StyleError(other.to_owned())),
        }
    }
}

/// Display width for localized names (months, weekdays, eras).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    #[default]
    #[display(fmt = "long")]
    Long,
    #[display(fmt = "short")]
    Short,
    #[display(fmt = "narrow")]
    Narrow,
}

impl FromStr for NameStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            "narrow" => Ok(Self::Narrow),
            other => Err(StyleError(other.to_owned())),
        }
    }
}

impl From<NameStyle> for FieldStyle {
    fn from(style: NameStyle) -> Self {
        match style {
            NameStyle::Long => Self::Long,
            NameStyle::Short => Self::Short,
            NameStyle::Narrow => Self::Narrow,
        }
    }
}

/// Day of the week, in the Sunday-first order the adapter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// From the adapter's 1-based numbering (1 = Sunday .. 7 = Saturday)
    pub const fn from_day_of_week(day_of_week: i32) -> Option<Self> {
        if day_of_week >= 1 && day_of_week <= 7 {
            Some(Self::ALL[(day_of_week - 1) as usize])
        } else {
            None
        }
    }

    /// 0 = Sunday .. 6 = Saturday
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Morning or afternoon half of a 12-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Am,
    Pm,
}

impl DayPeriod {
    pub const fn of_hour(hour: i32) -> Self {
        if hour.rem_euclid(24) < 12 { Self::Am } else { Self::Pm }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_style_from_str() {
        assert_eq!("numeric".parse::<FieldStyle>(), Ok(FieldStyle::Numeric));
        assert_eq!("2-digit".parse::<FieldStyle>(), Ok(FieldStyle::TwoDigit));
        assert_eq!(" long ".parse::<FieldStyle>(), Ok(FieldStyle::Long));
        assert_eq!(
            "wide".parse::<FieldStyle>(),
            Err(StyleError("wide".to_owned()))
        );
    }

    #[test]
    fn test_field_style_display_matches_keywords() {
        for style in [
            FieldStyle::Numeric,
            FieldStyle::TwoDigit,
            FieldStyle::Short,
            FieldStyle::Long,
            FieldStyle::Narrow,
        ] {
            assert_eq!(style.to_string().parse::<FieldStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_field_style_serde() {
        let json = serde_json::to_string(&FieldStyle::TwoDigit).unwrap();
        assert_eq!(json, r#""2-digit""#);
        let parsed: FieldStyle = serde_json::from_str(r#""narrow""#).unwrap();
        assert_eq!(parsed, FieldStyle::Narrow);
    }

    #[test]
    fn test_textual_styles() {
        assert!(!FieldStyle::Numeric.is_textual());
        assert!(!FieldStyle::TwoDigit.is_textual());
        assert!(FieldStyle::Short.is_textual());
        assert_eq!(FieldStyle::Long.name_style(), Some(NameStyle::Long));
        assert_eq!(FieldStyle::TwoDigit.name_style(), None);
        assert_eq!(FieldStyle::from(NameStyle::Narrow), FieldStyle::Narrow);
    }

    #[test]
    fn test_name_style() {
        assert_eq!(NameStyle::default(), NameStyle::Long);
        assert_eq!("short".parse::<NameStyle>(), Ok(NameStyle::Short));
        assert!("numeric".parse::<NameStyle>().is_err());
        assert_eq!(
            serde_json::to_string(&NameStyle::Narrow).unwrap(),
            r#""narrow""#
        );
    }

    #[test]
    fn test_weekday_from_day_of_week() {
        assert_eq!(Weekday::from_day_of_week(1), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_day_of_week(7), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_day_of_week(0), None);
        assert_eq!(Weekday::from_day_of_week(8), None);
        assert_eq!(Weekday::Thursday.index(), 4);
        assert_eq!(Weekday::Monday.to_string(), "Monday");
    }

    #[test]
    fn test_day_period_of_hour() {
        assert_eq!(DayPeriod::of_hour(0), DayPeriod::Am);
        assert_eq!(DayPeriod::of_hour(11), DayPeriod::Am);
        assert_eq!(DayPeriod::of_hour(12), DayPeriod::Pm);
        assert_eq!(DayPeriod::of_hour(23), DayPeriod::Pm);
    }
}
