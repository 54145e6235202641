/// Smallest year some locale engines can render (inclusive)
pub const MIN_RENDERABLE_YEAR: i32 = 1;
/// Largest year some locale engines can render (inclusive)
pub const MAX_RENDERABLE_YEAR: i32 = 9999;

/// Number of months in a year
pub const MONTHS_IN_YEAR: i32 = 12;
/// Number of days in a week
pub const DAYS_IN_WEEK: i32 = 7;
/// Largest day-of-month in any month
pub const MAX_DAYS_IN_MONTH: i32 = 31;

/// Month number for January
pub const JANUARY: i32 = 1;
/// Month number for February
pub const FEBRUARY: i32 = 2;
/// Month number for December
pub const DECEMBER: i32 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub(crate) const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
pub(crate) const MILLIS_PER_SECOND: i64 = 1000;

/// Non-leap year used when enumerating localized month, weekday and date names.
/// January 1st 2017 is a Sunday, so `REFERENCE_YEAR-01-(i+1)` walks Sunday..Saturday.
pub const REFERENCE_YEAR: i32 = 2017;

/// Day-period label used when the locale gives us nothing better
pub const AM_DAY_PERIOD_DEFAULT: &str = "AM";
/// Day-period label used when the locale gives us nothing better
pub const PM_DAY_PERIOD_DEFAULT: &str = "PM";

/// Left-to-right mark some locale engines insert into formatted dates
pub const LEFT_TO_RIGHT_MARK: char = '\u{200E}';
/// Right-to-left mark some locale engines insert into formatted dates
pub const RIGHT_TO_LEFT_MARK: char = '\u{200F}';

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Date/time separator (ISO 8601 format)
pub const DATE_TIME_SEPARATOR: char = 'T';
/// Time component separator (ISO 8601 format)
pub const TIME_SEPARATOR: char = ':';

/// Locale used when none is configured or the configured one is unknown
pub const DEFAULT_LOCALE: &str = "en-US";
/// Delimiter placed between the two ends of a rendered date range
pub const DEFAULT_RANGE_DELIMITER: &str = " - ";
