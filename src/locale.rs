//! Locale-aware rendering of calendar fields.
//!
//! [`LocaleFormatter`] is the seam to whatever locale database the host has. The
//! crate ships [`BuiltinLocaleFormatter`], a small table-driven implementation,
//! and the helpers here build month, weekday, date and day-period name lists on
//! top of any formatter.

use std::sync::LazyLock;

use fluent_langneg::{NegotiationStrategy, negotiate_languages};
use regex::Regex;
use tracing::debug;
use unic_langid::LanguageIdentifier;

use crate::consts::{
    AM_DAY_PERIOD_DEFAULT, DEFAULT_LOCALE, LEFT_TO_RIGHT_MARK, MAX_DAYS_IN_MONTH,
    MONTHS_IN_YEAR, PM_DAY_PERIOD_DEFAULT, REFERENCE_YEAR, RIGHT_TO_LEFT_MARK,
};
use crate::format::FormatSpec;
use crate::types::{DayPeriod, FieldStyle, NameStyle, Weekday};
use crate::CalendarDate;

/// Error raised by a [`LocaleFormatter`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    /// The formatter does not implement this operation
    #[error("Locale formatter does not support {0}")]
    Unsupported(&'static str),

    /// The formatter cannot render this year
    #[error("Year {0} is outside the range this formatter can render")]
    YearOutOfRange(i32),

    /// Formatter-specific failure
    #[error("Locale formatting failed: {0}")]
    Failed(String),
}

/// What a piece of formatted output represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatPartKind {
    Weekday,
    Era,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    DayPeriod,
    Literal,
}

/// One labelled piece of formatted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPart {
    pub kind: FormatPartKind,
    pub value: String,
}

impl FormatPart {
    pub fn new(kind: FormatPartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    fn literal(value: impl Into<String>) -> Self {
        Self::new(FormatPartKind::Literal, value)
    }
}

/// Locale database used to turn calendar fields into text.
///
/// Implementations render the fields of `date` as given, with no timezone applied.
/// The adapter rolls out-of-range fields over before calling in.
pub trait LocaleFormatter {
    /// Renders `date` as a single string.
    fn format(
        &self,
        locale: &LanguageIdentifier,
        date: &CalendarDate,
        spec: &FormatSpec,
    ) -> Result<String, LocaleError>;

    /// Renders `date` as labelled parts. Not every locale database can do this.
    fn format_to_parts(
        &self,
        _locale: &LanguageIdentifier,
        _date: &CalendarDate,
        _spec: &FormatSpec,
    ) -> Result<Vec<FormatPart>, LocaleError> {
        Err(LocaleError::Unsupported("format_to_parts"))
    }

    /// Renders an integer with the locale's digits, zero-padded to `min_digits`.
    fn format_number(&self, locale: &LanguageIdentifier, value: i64, min_digits: usize) -> String;
}

impl<T: LocaleFormatter + ?Sized> LocaleFormatter for &T {
    fn format(
        &self,
        locale: &LanguageIdentifier,
        date: &CalendarDate,
        spec: &FormatSpec,
    ) -> Result<String, LocaleError> {
        (**self).format(locale, date, spec)
    }

    fn format_to_parts(
        &self,
        locale: &LanguageIdentifier,
        date: &CalendarDate,
        spec: &FormatSpec,
    ) -> Result<Vec<FormatPart>, LocaleError> {
        (**self).format_to_parts(locale, date, spec)
    }

    fn format_number(&self, locale: &LanguageIdentifier, value: i64, min_digits: usize) -> String {
        (**self).format_number(locale, value, min_digits)
    }
}

/// Removes left-to-right and right-to-left marks from locale output
pub fn strip_directionality_characters(text: &str) -> String {
    text.chars()
        .filter(|c| *c != LEFT_TO_RIGHT_MARK && *c != RIGHT_TO_LEFT_MARK)
        .collect()
}

// --- built-in locale tables ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericOrder {
    MonthDayYear,
    DayMonthYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextLayout {
    /// `Aug 15, 1991`
    MonthFirst,
    /// `15. August 1991`, `15 de agosto de 1991`
    DayFirst {
        day_suffix: &'static str,
        joiner: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digits {
    Latin,
    ArabicIndic,
}

#[derive(Debug)]
struct LocaleData {
    tag: &'static str,
    /// long, short, narrow
    months: [[&'static str; 12]; 3],
    /// long, short, narrow; Sunday first
    weekdays: [[&'static str; 7]; 3],
    /// before, after the epoch of the era
    eras: [&'static str; 2],
    day_periods: [&'static str; 2],
    hour12: bool,
    numeric_order: NumericOrder,
    numeric_separator: &'static str,
    text_layout: TextLayout,
    digits: Digits,
}

const EN_MONTHS: [[&str; 12]; 3] = [
    [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
    ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
];

const EN_WEEKDAYS: [[&str; 7]; 3] = [
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"],
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    ["S", "M", "T", "W", "T", "F", "S"],
];

const AR_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر",
    "أكتوبر", "نوفمبر", "ديسمبر",
];

const AR_WEEKDAYS: [&str; 7] = [
    "الأحد", "الاثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت",
];

static LOCALES: [LocaleData; 6] = [
    LocaleData {
        tag: "en-US",
        months: EN_MONTHS,
        weekdays: EN_WEEKDAYS,
        eras: ["BC", "AD"],
        day_periods: ["AM", "PM"],
        hour12: true,
        numeric_order: NumericOrder::MonthDayYear,
        numeric_separator: "/",
        text_layout: TextLayout::MonthFirst,
        digits: Digits::Latin,
    },
    LocaleData {
        tag: "en-GB",
        months: EN_MONTHS,
        weekdays: EN_WEEKDAYS,
        eras: ["BC", "AD"],
        day_periods: ["am", "pm"],
        hour12: false,
        numeric_order: NumericOrder::DayMonthYear,
        numeric_separator: "/",
        text_layout: TextLayout::DayFirst {
            day_suffix: "",
            joiner: " ",
        },
        digits: Digits::Latin,
    },
    LocaleData {
        tag: "de-DE",
        months: [
            [
                "Januar",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ],
            [
                "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.",
                "Nov.", "Dez.",
            ],
            ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
        ],
        weekdays: [
            ["Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag"],
            ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
            ["S", "M", "D", "M", "D", "F", "S"],
        ],
        eras: ["v. Chr.", "n. Chr."],
        day_periods: ["AM", "PM"],
        hour12: false,
        numeric_order: NumericOrder::DayMonthYear,
        numeric_separator: ".",
        text_layout: TextLayout::DayFirst {
            day_suffix: ".",
            joiner: " ",
        },
        digits: Digits::Latin,
    },
    LocaleData {
        tag: "fr-FR",
        months: [
            [
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ],
            [
                "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
                "nov.", "déc.",
            ],
            ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
        ],
        weekdays: [
            ["dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"],
            ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
            ["D", "L", "M", "M", "J", "V", "S"],
        ],
        eras: ["av. J.-C.", "ap. J.-C."],
        day_periods: ["AM", "PM"],
        hour12: false,
        numeric_order: NumericOrder::DayMonthYear,
        numeric_separator: "/",
        text_layout: TextLayout::DayFirst {
            day_suffix: "",
            joiner: " ",
        },
        digits: Digits::Latin,
    },
    LocaleData {
        tag: "es-ES",
        months: [
            [
                "enero",
                "febrero",
                "marzo",
                "abril",
                "mayo",
                "junio",
                "julio",
                "agosto",
                "septiembre",
                "octubre",
                "noviembre",
                "diciembre",
            ],
            ["ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic"],
            ["E", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
        ],
        weekdays: [
            ["domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado"],
            ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
            ["D", "L", "M", "X", "J", "V", "S"],
        ],
        eras: ["a. C.", "d. C."],
        day_periods: ["a. m.", "p. m."],
        hour12: false,
        numeric_order: NumericOrder::DayMonthYear,
        numeric_separator: "/",
        text_layout: TextLayout::DayFirst {
            day_suffix: "",
            joiner: " de ",
        },
        digits: Digits::Latin,
    },
    LocaleData {
        tag: "ar-EG",
        months: [
            AR_MONTHS,
            AR_MONTHS,
            ["ي", "ف", "م", "أ", "و", "ن", "ل", "غ", "س", "ك", "ب", "د"],
        ],
        weekdays: [
            AR_WEEKDAYS,
            AR_WEEKDAYS,
            ["ح", "ن", "ث", "ر", "خ", "ج", "س"],
        ],
        eras: ["ق.م", "م"],
        day_periods: ["ص", "م"],
        hour12: true,
        numeric_order: NumericOrder::DayMonthYear,
        numeric_separator: "\u{200F}/",
        text_layout: TextLayout::DayFirst {
            day_suffix: "",
            joiner: " ",
        },
        digits: Digits::ArabicIndic,
    },
];

/// Table entry keyed by its parsed tag, for language negotiation
struct Supported {
    id: LanguageIdentifier,
    data: &'static LocaleData,
}

impl AsRef<LanguageIdentifier> for Supported {
    fn as_ref(&self) -> &LanguageIdentifier {
        &self.id
    }
}

impl PartialEq for Supported {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

static SUPPORTED: LazyLock<Vec<Supported>> = LazyLock::new(|| {
    LOCALES
        .iter()
        .filter_map(|data| {
            Some(Supported {
                id: data.tag.parse().ok()?,
                data,
            })
        })
        .collect()
});

/// Best table entry for `locale`: exact tag, then same language and script,
/// then any region of the same language.
fn negotiate(locale: &LanguageIdentifier) -> Option<&'static LocaleData> {
    negotiate_languages(
        &[locale],
        SUPPORTED.as_slice(),
        None,
        NegotiationStrategy::Filtering,
    )
    .first()
    .map(|supported| supported.data)
}

/// Table-driven locale database covering English (US and UK), German, French,
/// Spanish and Arabic. Unknown locales resolve by language, then to the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinLocaleFormatter {
    fallback: LanguageIdentifier,
}

impl Default for BuiltinLocaleFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinLocaleFormatter {
    pub fn new() -> Self {
        Self::with_fallback(DEFAULT_LOCALE.parse().unwrap_or_default())
    }

    /// Uses `fallback` for locales the tables do not cover
    pub const fn with_fallback(fallback: LanguageIdentifier) -> Self {
        Self { fallback }
    }

    /// Locale tags the tables cover
    pub fn supported_locales() -> impl Iterator<Item = &'static str> {
        LOCALES.iter().map(|data| data.tag)
    }

    fn resolve(&self, locale: &LanguageIdentifier) -> &'static LocaleData {
        if let Some(data) = negotiate(locale) {
            return data;
        }
        debug!(%locale, fallback = %self.fallback, "locale not in tables, falling back");
        negotiate(&self.fallback).unwrap_or(&LOCALES[0])
    }
}

const fn name_index(style: NameStyle) -> usize {
    match style {
        NameStyle::Long => 0,
        NameStyle::Short => 1,
        NameStyle::Narrow => 2,
    }
}

fn localize_digits(data: &LocaleData, text: String) -> String {
    match data.digits {
        Digits::Latin => text,
        Digits::ArabicIndic => text
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .and_then(|d| char::from_u32(0x0660 + d))
                    .unwrap_or(c)
            })
            .collect(),
    }
}

fn render_number(data: &LocaleData, value: i64, min_digits: usize) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let body = format!("{sign}{:0min_digits$}", value.unsigned_abs());
    localize_digits(data, body)
}

fn numeric_field(data: &LocaleData, value: i32, style: FieldStyle) -> String {
    let width = if style == FieldStyle::TwoDigit { 2 } else { 1 };
    render_number(data, i64::from(value), width)
}

fn render_parts(data: &LocaleData, date: &CalendarDate, spec: &FormatSpec) -> Vec<FormatPart> {
    // No fields at all means a plain numeric date
    let (year_style, month_style, day_style) = if spec.has_date_fields() || spec.has_time_fields()
    {
        (spec.year, spec.month, spec.day)
    } else {
        (
            Some(FieldStyle::Numeric),
            Some(FieldStyle::Numeric),
            Some(FieldStyle::Numeric),
        )
    };

    let year = year_style.map(|style| {
        let value = match style {
            FieldStyle::TwoDigit => {
                return render_number(data, i64::from(date.year.rem_euclid(100)), 2);
            }
            _ if spec.era.is_some() && date.year <= 0 => 1 - i64::from(date.year),
            _ => i64::from(date.year),
        };
        render_number(data, value, 1)
    });
    let month_index = usize::try_from((date.month - 1).rem_euclid(MONTHS_IN_YEAR)).unwrap_or(0);
    let month = month_style.map(|style| match style.name_style() {
        Some(name) => data.months[name_index(name)][month_index].to_owned(),
        None => numeric_field(data, date.month, style),
    });
    let day = day_style.map(|style| numeric_field(data, date.day, style));

    let mut date_parts = Vec::new();
    match (month_style.is_some_and(FieldStyle::is_textual), data.text_layout) {
        (true, TextLayout::MonthFirst) => {
            date_parts.extend(month.map(|m| FormatPart::new(FormatPartKind::Month, m)));
            if let Some(d) = day {
                date_parts.push(FormatPart::literal(" "));
                date_parts.push(FormatPart::new(FormatPartKind::Day, d));
            }
            if let Some(y) = year {
                let separator = if date_parts.len() > 1 { ", " } else { " " };
                date_parts.push(FormatPart::literal(separator));
                date_parts.push(FormatPart::new(FormatPartKind::Year, y));
            }
        }
        (true, TextLayout::DayFirst { day_suffix, joiner }) => {
            if let Some(d) = day {
                date_parts.push(FormatPart::new(FormatPartKind::Day, d));
                date_parts.push(FormatPart::literal(format!("{day_suffix}{joiner}")));
            }
            date_parts.extend(month.map(|m| FormatPart::new(FormatPartKind::Month, m)));
            if let Some(y) = year {
                date_parts.push(FormatPart::literal(joiner));
                date_parts.push(FormatPart::new(FormatPartKind::Year, y));
            }
        }
        (false, _) => {
            let ordered = match data.numeric_order {
                NumericOrder::MonthDayYear => [
                    (FormatPartKind::Month, month),
                    (FormatPartKind::Day, day),
                    (FormatPartKind::Year, year),
                ],
                NumericOrder::DayMonthYear => [
                    (FormatPartKind::Day, day),
                    (FormatPartKind::Month, month),
                    (FormatPartKind::Year, year),
                ],
            };
            for (kind, value) in ordered {
                let Some(value) = value else { continue };
                if !date_parts.is_empty() {
                    date_parts.push(FormatPart::literal(data.numeric_separator));
                }
                date_parts.push(FormatPart::new(kind, value));
            }
        }
    }

    if let Some(style) = spec.weekday {
        let weekday = Weekday::from_day_of_week(crate::calendar::day_of_week(date))
            .unwrap_or(Weekday::Sunday);
        let name = data.weekdays[name_index(style)][weekday.index()];
        let mut prefixed = vec![FormatPart::new(FormatPartKind::Weekday, name)];
        if !date_parts.is_empty() {
            prefixed.push(FormatPart::literal(", "));
        }
        prefixed.append(&mut date_parts);
        date_parts = prefixed;
    }

    if spec.era.is_some() {
        if !date_parts.is_empty() {
            date_parts.push(FormatPart::literal(" "));
        }
        let era = data.eras[usize::from(date.year > 0)];
        date_parts.push(FormatPart::new(FormatPartKind::Era, era));
    }

    let time_parts = render_time(data, date, spec);
    if !date_parts.is_empty() && !time_parts.is_empty() {
        date_parts.push(FormatPart::literal(", "));
    }
    date_parts.extend(time_parts);
    date_parts
}

fn render_time(data: &LocaleData, date: &CalendarDate, spec: &FormatSpec) -> Vec<FormatPart> {
    let hour12 = spec.hour12.unwrap_or(data.hour12);
    let mut parts = Vec::new();

    if let Some(style) = spec.hour {
        let value = if hour12 {
            match date.hour.rem_euclid(12) {
                0 => 12,
                h => h,
            }
        } else {
            date.hour
        };
        let width = if style == FieldStyle::TwoDigit || !hour12 { 2 } else { 1 };
        parts.push(FormatPart::new(
            FormatPartKind::Hour,
            render_number(data, i64::from(value), width),
        ));
    }
    for (kind, style, value) in [
        (FormatPartKind::Minute, spec.minute, date.minute),
        (FormatPartKind::Second, spec.second, date.second),
    ] {
        let Some(style) = style else { continue };
        let width = if style == FieldStyle::TwoDigit || !parts.is_empty() { 2 } else { 1 };
        if !parts.is_empty() {
            parts.push(FormatPart::literal(":"));
        }
        parts.push(FormatPart::new(
            kind,
            render_number(data, i64::from(value), width),
        ));
    }

    if spec.hour.is_some() && hour12 {
        let period = match DayPeriod::of_hour(date.hour) {
            DayPeriod::Am => data.day_periods[0],
            DayPeriod::Pm => data.day_periods[1],
        };
        parts.push(FormatPart::literal(" "));
        parts.push(FormatPart::new(FormatPartKind::DayPeriod, period));
    }
    parts
}

impl LocaleFormatter for BuiltinLocaleFormatter {
    fn format(
        &self,
        locale: &LanguageIdentifier,
        date: &CalendarDate,
        spec: &FormatSpec,
    ) -> Result<String, LocaleError> {
        let parts = self.format_to_parts(locale, date, spec)?;
        Ok(parts.into_iter().map(|part| part.value).collect())
    }

    fn format_to_parts(
        &self,
        locale: &LanguageIdentifier,
        date: &CalendarDate,
        spec: &FormatSpec,
    ) -> Result<Vec<FormatPart>, LocaleError> {
        Ok(render_parts(self.resolve(locale), date, spec))
    }

    fn format_number(&self, locale: &LanguageIdentifier, value: i64, min_digits: usize) -> String {
        render_number(self.resolve(locale), value, min_digits)
    }
}

// --- name lists built on any formatter ---

fn format_stripped<F: LocaleFormatter + ?Sized>(
    formatter: &F,
    locale: &LanguageIdentifier,
    date: &CalendarDate,
    spec: &FormatSpec,
) -> Result<String, LocaleError> {
    formatter
        .format(locale, date, spec)
        .map(|text| strip_directionality_characters(&text))
}

/// Twelve month names, January first
pub(crate) fn month_names<F: LocaleFormatter + ?Sized>(
    formatter: &F,
    locale: &LanguageIdentifier,
    style: NameStyle,
) -> Result<Vec<String>, LocaleError> {
    let spec = FormatSpec::new().month(style.into());
    (1..=MONTHS_IN_YEAR)
        .map(|month| CalendarDate::new(REFERENCE_YEAR, month, 1))
        .map(|date| format_stripped(formatter, locale, &date, &spec))
        .collect()
}

/// Seven weekday names, Sunday first
pub(crate) fn day_of_week_names<F: LocaleFormatter + ?Sized>(
    formatter: &F,
    locale: &LanguageIdentifier,
    style: NameStyle,
) -> Result<Vec<String>, LocaleError> {
    let spec = FormatSpec::new().weekday(style);
    // January 1st of the reference year is a Sunday
    (1..=7)
        .map(|day| CalendarDate::new(REFERENCE_YEAR, 1, day))
        .map(|date| format_stripped(formatter, locale, &date, &spec))
        .collect()
}

/// Thirty-one day-of-month labels
pub(crate) fn date_names<F: LocaleFormatter + ?Sized>(
    formatter: &F,
    locale: &LanguageIdentifier,
) -> Result<Vec<String>, LocaleError> {
    let spec = FormatSpec::new().day(FieldStyle::Numeric);
    (1..=MAX_DAYS_IN_MONTH)
        .map(|day| CalendarDate::new(REFERENCE_YEAR, 1, day))
        .map(|date| format_stripped(formatter, locale, &date, &spec))
        .collect()
}

static DAY_PERIOD_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\p{L}+\.*)+").ok());

/// Locale labels for the morning and afternoon halves of a 12-hour clock.
///
/// Reads the day-period part of formatted output when the formatter can split it
/// into parts, otherwise picks the first run of letters out of the plain output,
/// and finally settles for `AM`/`PM`.
pub(crate) fn day_period_names<F: LocaleFormatter + ?Sized>(
    formatter: &F,
    locale: &LanguageIdentifier,
) -> (String, String) {
    let defaults = (
        AM_DAY_PERIOD_DEFAULT.to_owned(),
        PM_DAY_PERIOD_DEFAULT.to_owned(),
    );
    let spec = FormatSpec::new()
        .hour(FieldStyle::Numeric)
        .minute(FieldStyle::Numeric)
        .hour12(true);
    let morning = CalendarDate::with_time(2020, 1, 1, 6, 0, 0);
    let afternoon = CalendarDate::with_time(2020, 1, 1, 16, 0, 0);

    let from_parts = |date: &CalendarDate| -> Result<String, LocaleError> {
        formatter
            .format_to_parts(locale, date, &spec)?
            .into_iter()
            .find(|part| part.kind == FormatPartKind::DayPeriod)
            .map(|part| part.value)
            .ok_or_else(|| LocaleError::Failed("no day period in output".to_owned()))
    };

    match from_parts(&morning).and_then(|am| Ok((am, from_parts(&afternoon)?))) {
        Ok((am, pm)) if !am.is_empty() && !pm.is_empty() => return (am, pm),
        Ok(_) => return defaults,
        Err(err) => debug!(%locale, error = %err, "day periods not available as parts"),
    }

    let Some(pattern) = DAY_PERIOD_PATTERN.as_ref() else {
        return defaults;
    };
    let from_text = |date: &CalendarDate| {
        formatter
            .format(locale, date, &spec)
            .ok()
            .and_then(|text| pattern.find(&text).map(|m| m.as_str().to_owned()))
    };
    match (from_text(&morning), from_text(&afternoon)) {
        (Some(am), Some(pm)) => (am, pm),
        _ => {
            debug!(%locale, "no day period found in formatted output, using defaults");
            defaults
        }
    }
}
