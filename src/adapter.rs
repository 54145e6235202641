use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};
use unic_langid::LanguageIdentifier;

use crate::calendar;
use crate::consts::{DAYS_IN_WEEK, DEFAULT_LOCALE, MAX_RENDERABLE_YEAR, MIN_RENDERABLE_YEAR};
use crate::format::{DateTimeFormats, FormatSpec};
use crate::locale::{self, BuiltinLocaleFormatter, LocaleError, LocaleFormatter};
use crate::parse::ParseInput;
use crate::types::{FieldStyle, NameStyle};
use crate::CalendarDate;

/// Error type for adapter operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// Asked to format a date whose fields do not survive a calendar round trip.
    #[error("Cannot format invalid date: {0}")]
    InvalidDate(CalendarDate),

    /// Locale tag could not be parsed as a BCP 47 language identifier.
    #[error("Invalid locale identifier: {0}")]
    InvalidLocale(String),

    /// First day of week must be 0 (Sunday) through 6 (Saturday).
    #[error("Invalid first day of week: {0} (must be 0-6)")]
    InvalidFirstDayOfWeek(u8),

    /// Error from the locale formatter.
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// Adapter configuration, usually built in code or read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdapterConfig {
    /// BCP 47 tag, e.g. `en-US`
    pub locale: String,
    /// Locale the built-in formatter uses for tags it does not know
    pub fallback_locale: String,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u8,
    /// Clamp years into 1..=9999 before formatting, for locale engines that cannot
    /// render years outside that range
    pub limited_year_range: bool,
    pub formats: DateTimeFormats,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_owned(),
            fallback_locale: DEFAULT_LOCALE.to_owned(),
            first_day_of_week: 0,
            limited_year_range: false,
            formats: DateTimeFormats::default(),
        }
    }
}

impl AdapterConfig {
    pub fn for_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }
}

/// Handle returned by [`CalendarAdapter::on_locale_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback run after the adapter's locale changes
pub type LocaleListener = Box<dyn Fn(&LanguageIdentifier) + Send + Sync>;

/// Date operations a date or time input control needs, independent of the
/// concrete date type.
pub trait DatetimeAdapter {
    type Date: Clone;

    fn locale(&self) -> &LanguageIdentifier;
    fn formats(&self) -> &DateTimeFormats;

    fn year(&self, date: &Self::Date) -> i32;
    /// 1 = January
    fn month(&self, date: &Self::Date) -> i32;
    /// Day of the month
    fn date(&self, date: &Self::Date) -> i32;
    fn hours(&self, date: &Self::Date) -> i32;
    fn minutes(&self, date: &Self::Date) -> i32;
    fn seconds(&self, date: &Self::Date) -> i32;
    /// 1 = Sunday .. 7 = Saturday
    fn day_of_week(&self, date: &Self::Date) -> i32;
    /// ISO 8601 week of the year
    fn week_number(&self, date: &Self::Date) -> i32;

    fn month_names(&self, style: NameStyle) -> Result<Vec<String>, AdapterError>;
    /// Sunday first
    fn day_of_week_names(&self, style: NameStyle) -> Result<Vec<String>, AdapterError>;
    /// Labels for days 1 through 31
    fn date_names(&self) -> Result<Vec<String>, AdapterError>;
    fn day_period_names(&self) -> (String, String);
    /// Localized year number. Unlike `format`, does not reject invalid dates.
    fn year_name(&self, date: &Self::Date) -> Result<String, AdapterError>;
    fn week_name(&self, date: &Self::Date) -> String;
    /// Labels for hours 0 through 23, shown on a 12-hour dial when `meridian` is set
    fn hour_names(&self, meridian: bool, two_digit: bool) -> Vec<String>;
    fn minute_names(&self, two_digit: bool) -> Vec<String>;
    fn second_names(&self, two_digit: bool) -> Vec<String>;

    /// 0 = Sunday .. 6 = Saturday
    fn first_day_of_week(&self) -> u8;
    fn days_in_month(&self, date: &Self::Date) -> i32;
    /// Rows a month grid needs when weeks start on `first_day_of_week`
    fn weeks_in_month(&self, year: i32, month: i32, first_day_of_week: u8) -> i32;

    fn create_date(&self, year: i32, month: i32, day: i32) -> Self::Date;
    fn today(&self) -> Self::Date;
    /// `None` when the input does not describe a date
    fn parse<'a>(&self, input: impl Into<ParseInput<'a>>) -> Option<Self::Date>;
    fn format(&self, date: &Self::Date, spec: &FormatSpec) -> Result<String, AdapterError>;

    fn add_calendar_years(&self, date: &Self::Date, years: i32) -> Self::Date;
    fn add_calendar_months(&self, date: &Self::Date, months: i32) -> Self::Date;
    fn add_calendar_days(&self, date: &Self::Date, days: i32) -> Self::Date;
    fn set_hours(&self, date: &Self::Date, hours: i32) -> Self::Date;
    fn set_minutes(&self, date: &Self::Date, minutes: i32) -> Self::Date;
    fn set_seconds(&self, date: &Self::Date, seconds: i32) -> Self::Date;

    fn clone_date(&self, date: &Self::Date) -> Self::Date {
        date.clone()
    }
    fn is_valid(&self, date: &Self::Date) -> bool;
    fn is_between(&self, date: &Self::Date, start: &Self::Date, end: &Self::Date) -> bool;
    /// Same calendar day, ignoring time-of-day
    fn dates_equal(&self, a: &Self::Date, b: &Self::Date) -> bool;
    /// Same calendar day and time-of-day
    fn date_times_equal(&self, a: &Self::Date, b: &Self::Date) -> bool;
    fn to_iso8601(&self, date: &Self::Date) -> String;

    /// Whether `spec` renders a 12-hour clock with a day period
    fn is_time_format_includes_day_period(&self, spec: &FormatSpec) -> bool;
    fn is_time_format_includes_hours(&self, spec: &FormatSpec) -> bool {
        spec.hour.is_some()
    }
    fn is_time_format_includes_minutes(&self, spec: &FormatSpec) -> bool {
        spec.minute.is_some()
    }
    fn is_time_format_includes_seconds(&self, spec: &FormatSpec) -> bool {
        spec.second.is_some()
    }
}

/// [`DatetimeAdapter`] over [`CalendarDate`], rendering through a [`LocaleFormatter`].
pub struct CalendarAdapter<F = BuiltinLocaleFormatter> {
    locale: LanguageIdentifier,
    formatter: F,
    first_day_of_week: u8,
    limited_year_range: bool,
    formats: DateTimeFormats,
    locale_version: u64,
    next_listener: u64,
    listeners: Vec<(ListenerId, LocaleListener)>,
}

impl<F: fmt::Debug> fmt::Debug for CalendarAdapter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarAdapter")
            .field("locale", &self.locale.to_string())
            .field("formatter", &self.formatter)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("limited_year_range", &self.limited_year_range)
            .field("locale_version", &self.locale_version)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

fn parse_locale(tag: &str) -> Result<LanguageIdentifier, AdapterError> {
    tag.parse()
        .map_err(|_| AdapterError::InvalidLocale(tag.to_owned()))
}

impl CalendarAdapter<BuiltinLocaleFormatter> {
    /// Adapter backed by the built-in locale tables
    ///
    /// # Errors
    /// Returns `AdapterError::InvalidLocale` or `AdapterError::InvalidFirstDayOfWeek`
    /// if the configuration is malformed.
    pub fn new(config: AdapterConfig) -> Result<Self, AdapterError> {
        let fallback = parse_locale(&config.fallback_locale)?;
        Self::with_formatter(config, BuiltinLocaleFormatter::with_fallback(fallback))
    }

    /// Default configuration in the given locale
    ///
    /// # Errors
    /// Returns `AdapterError::InvalidLocale` if `locale` is not a valid tag.
    pub fn for_locale(locale: &str) -> Result<Self, AdapterError> {
        Self::new(AdapterConfig::for_locale(locale))
    }
}

impl<F: LocaleFormatter> CalendarAdapter<F> {
    /// Adapter rendering through `formatter`
    ///
    /// # Errors
    /// Returns `AdapterError::InvalidLocale` or `AdapterError::InvalidFirstDayOfWeek`
    /// if the configuration is malformed.
    pub fn with_formatter(config: AdapterConfig, formatter: F) -> Result<Self, AdapterError> {
        if i32::from(config.first_day_of_week) >= DAYS_IN_WEEK {
            return Err(AdapterError::InvalidFirstDayOfWeek(config.first_day_of_week));
        }
        Ok(Self {
            locale: parse_locale(&config.locale)?,
            formatter,
            first_day_of_week: config.first_day_of_week,
            limited_year_range: config.limited_year_range,
            formats: config.formats,
            locale_version: 0,
            next_listener: 0,
            listeners: Vec::new(),
        })
    }

    pub const fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Switches locale and notifies every registered listener.
    ///
    /// # Errors
    /// Returns `AdapterError::InvalidLocale` if `tag` is not a valid tag; the
    /// current locale is kept and no listener runs.
    pub fn set_locale(&mut self, tag: &str) -> Result<(), AdapterError> {
        let locale = parse_locale(tag)?;
        info!(from = %self.locale, to = %locale, "locale changed");
        self.locale = locale;
        self.locale_version += 1;
        for (_, listener) in &self.listeners {
            listener(&self.locale);
        }
        Ok(())
    }

    /// Number of locale changes since construction. Consumers that cache names can
    /// compare this instead of registering a listener.
    pub const fn locale_version(&self) -> u64 {
        self.locale_version
    }

    pub fn on_locale_change(
        &mut self,
        listener: impl Fn(&LanguageIdentifier) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered
    pub fn remove_locale_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Overrides the first day of the week
    ///
    /// # Errors
    /// Returns `AdapterError::InvalidFirstDayOfWeek` if `day` is not 0-6.
    pub fn set_first_day_of_week(&mut self, day: u8) -> Result<(), AdapterError> {
        if i32::from(day) >= DAYS_IN_WEEK {
            return Err(AdapterError::InvalidFirstDayOfWeek(day));
        }
        self.first_day_of_week = day;
        Ok(())
    }

    pub const fn has_limited_year_range(&self) -> bool {
        self.limited_year_range
    }

    /// Years the locale engine might choke on are pulled into 1..=9999
    fn clamp_year(&self, date: &CalendarDate) -> CalendarDate {
        if !self.limited_year_range
            || (MIN_RENDERABLE_YEAR..=MAX_RENDERABLE_YEAR).contains(&date.year)
        {
            return *date;
        }
        let year = date.year.clamp(MIN_RENDERABLE_YEAR, MAX_RENDERABLE_YEAR);
        trace!(from = date.year, to = year, "clamping year before formatting");
        CalendarDate { year, ..*date }
    }

    /// Rolls out-of-range fields over, applies year clamping and strips bidi marks
    fn render(&self, date: &CalendarDate, spec: &FormatSpec) -> Result<String, AdapterError> {
        let date = self.clamp_year(&calendar::normalize(date));
        let text = self.formatter.format(&self.locale, &date, spec)?;
        Ok(locale::strip_directionality_characters(&text))
    }

    fn localized_numbers(
        &self,
        count: i32,
        two_digit: bool,
        label: impl Fn(i32) -> i32,
    ) -> Vec<String> {
        let width = if two_digit { 2 } else { 1 };
        (0..count)
            .map(|value| {
                self.formatter
                    .format_number(&self.locale, i64::from(label(value)), width)
            })
            .collect()
    }
}

impl<F: LocaleFormatter> DatetimeAdapter for CalendarAdapter<F> {
    type Date = CalendarDate;

    fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    fn formats(&self) -> &DateTimeFormats {
        &self.formats
    }

    fn year(&self, date: &CalendarDate) -> i32 {
        date.year
    }

    fn month(&self, date: &CalendarDate) -> i32 {
        date.month
    }

    fn date(&self, date: &CalendarDate) -> i32 {
        date.day
    }

    fn hours(&self, date: &CalendarDate) -> i32 {
        date.hour
    }

    fn minutes(&self, date: &CalendarDate) -> i32 {
        date.minute
    }

    fn seconds(&self, date: &CalendarDate) -> i32 {
        date.second
    }

    fn day_of_week(&self, date: &CalendarDate) -> i32 {
        calendar::day_of_week(date)
    }

    fn week_number(&self, date: &CalendarDate) -> i32 {
        calendar::week_number(date)
    }

    fn month_names(&self, style: NameStyle) -> Result<Vec<String>, AdapterError> {
        Ok(locale::month_names(&self.formatter, &self.locale, style)?)
    }

    fn day_of_week_names(&self, style: NameStyle) -> Result<Vec<String>, AdapterError> {
        Ok(locale::day_of_week_names(
            &self.formatter,
            &self.locale,
            style,
        )?)
    }

    fn date_names(&self) -> Result<Vec<String>, AdapterError> {
        Ok(locale::date_names(&self.formatter, &self.locale)?)
    }

    fn day_period_names(&self) -> (String, String) {
        locale::day_period_names(&self.formatter, &self.locale)
    }

    fn year_name(&self, date: &CalendarDate) -> Result<String, AdapterError> {
        self.render(date, &FormatSpec::new().year(FieldStyle::Numeric))
    }

    fn week_name(&self, date: &CalendarDate) -> String {
        self.formatter
            .format_number(&self.locale, i64::from(self.week_number(date)), 1)
    }

    fn hour_names(&self, meridian: bool, two_digit: bool) -> Vec<String> {
        self.localized_numbers(24, two_digit, |hour| match (meridian, hour) {
            (true, 0 | 12) => 12,
            (true, h) => h % 12,
            (false, h) => h,
        })
    }

    fn minute_names(&self, two_digit: bool) -> Vec<String> {
        self.localized_numbers(60, two_digit, |minute| minute)
    }

    fn second_names(&self, two_digit: bool) -> Vec<String> {
        self.localized_numbers(60, two_digit, |second| second)
    }

    /// Locale data does not say reliably which day starts the week, so this is
    /// whatever the configuration says (Sunday unless overridden).
    fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }

    fn days_in_month(&self, date: &CalendarDate) -> i32 {
        calendar::days_in_month(date)
    }

    fn weeks_in_month(&self, year: i32, month: i32, first_day_of_week: u8) -> i32 {
        calendar::weeks_in_month(year, month, i32::from(first_day_of_week))
    }

    fn create_date(&self, year: i32, month: i32, day: i32) -> CalendarDate {
        CalendarDate::new(year, month, day)
    }

    /// Current UTC wall-clock date and time
    fn today(&self) -> CalendarDate {
        CalendarDate::now()
    }

    fn parse<'a>(&self, input: impl Into<ParseInput<'a>>) -> Option<CalendarDate> {
        input.into().parse()
    }

    fn format(&self, date: &CalendarDate, spec: &FormatSpec) -> Result<String, AdapterError> {
        if !self.is_valid(date) {
            warn!(%date, "refusing to format invalid date");
            return Err(AdapterError::InvalidDate(*date));
        }
        self.render(date, spec)
    }

    fn add_calendar_years(&self, date: &CalendarDate, years: i32) -> CalendarDate {
        calendar::add_years(date, years)
    }

    fn add_calendar_months(&self, date: &CalendarDate, months: i32) -> CalendarDate {
        calendar::add_months(date, months)
    }

    fn add_calendar_days(&self, date: &CalendarDate, days: i32) -> CalendarDate {
        calendar::add_days(date, days)
    }

    fn set_hours(&self, date: &CalendarDate, hours: i32) -> CalendarDate {
        calendar::set_hours(date, hours)
    }

    fn set_minutes(&self, date: &CalendarDate, minutes: i32) -> CalendarDate {
        calendar::set_minutes(date, minutes)
    }

    fn set_seconds(&self, date: &CalendarDate, seconds: i32) -> CalendarDate {
        calendar::set_seconds(date, seconds)
    }

    fn is_valid(&self, date: &CalendarDate) -> bool {
        date.is_valid()
    }

    fn is_between(&self, date: &CalendarDate, start: &CalendarDate, end: &CalendarDate) -> bool {
        calendar::is_between(date, start, end)
    }

    fn dates_equal(&self, a: &CalendarDate, b: &CalendarDate) -> bool {
        a.date_part().to_iso8601() == b.date_part().to_iso8601()
    }

    fn date_times_equal(&self, a: &CalendarDate, b: &CalendarDate) -> bool {
        a.to_iso8601() == b.to_iso8601()
    }

    fn to_iso8601(&self, date: &CalendarDate) -> String {
        date.to_iso8601()
    }

    fn is_time_format_includes_day_period(&self, spec: &FormatSpec) -> bool {
        if let Some(hour12) = spec.hour12 {
            return hour12;
        }
        // A format already on a 12-hour clock renders the same with hour12 forced on
        let sample = self.create_date(2020, 1, 1);
        match (
            self.format(&sample, spec),
            self.format(&sample, &spec.clone().hour12(true)),
        ) {
            (Ok(plain), Ok(twelve_hour)) => plain == twelve_hour,
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "could not check time format for a day period");
                false
            }
        }
    }
}
