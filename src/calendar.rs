//! Calendar arithmetic on [`CalendarDate`] values.
//!
//! Every function here works on the proleptic Gregorian calendar with no timezone:
//! dates are projected onto a linear count of seconds since 1970-01-01T00:00:00,
//! shifted, and projected back. Out-of-range fields roll over during projection.

use crate::CalendarDate;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_IN_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE, MONTHS_IN_YEAR, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE,
};

/// Days from 0000-03-01 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;
const YEARS_PER_ERA: i64 = 400;
/// 1970-01-01 was a Thursday
const EPOCH_WEEKDAY: i64 = 4;

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in `month` of `year`. `month` may be out of range; it is folded into
/// the right year first.
pub fn month_length(year: i32, month: i32) -> i32 {
    let (year, month) = fold_month(i64::from(year), i64::from(month));
    let (year, month) = (saturate(year), saturate(month));

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days since 1970-01-01 for a civil date with `month` in 1..=12.
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
pub fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - (YEARS_PER_ERA - 1) } / YEARS_PER_ERA;
    let yoe = y - era * YEARS_PER_ERA; // [0, 399]
    let doy = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + day - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * DAYS_PER_ERA + doe - UNIX_EPOCH_DAYS
}

/// Civil (year, month, day) for a count of days since 1970-01-01.
pub fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = if z >= 0 { z } else { z - (DAYS_PER_ERA - 1) } / DAYS_PER_ERA;
    let doe = z - era * DAYS_PER_ERA; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365; // [0, 399]
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let day = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let month = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = yoe + era * YEARS_PER_ERA;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// Seconds since 1970-01-01T00:00:00 for the wall-clock fields of `date`.
pub fn to_seconds(date: &CalendarDate) -> i64 {
    let (year, month) = fold_month(i64::from(date.year), i64::from(date.month));
    let days = days_from_civil(year, month, 1) + i64::from(date.day) - 1;
    days * SECONDS_PER_DAY
        + i64::from(date.hour) * SECONDS_PER_HOUR
        + i64::from(date.minute) * SECONDS_PER_MINUTE
        + i64::from(date.second)
}

/// Inverse of [`to_seconds`]: always produces in-range fields.
pub fn from_seconds(seconds: i64) -> CalendarDate {
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let rest = seconds.rem_euclid(SECONDS_PER_DAY);
    let (year, month, day) = civil_from_days(days);
    CalendarDate::with_time(
        saturate(year),
        saturate(month),
        saturate(day),
        saturate(rest / SECONDS_PER_HOUR),
        saturate(rest % SECONDS_PER_HOUR / SECONDS_PER_MINUTE),
        saturate(rest % SECONDS_PER_MINUTE),
    )
}

/// Rolls every out-of-range field of `date` into its neighbours.
pub fn normalize(date: &CalendarDate) -> CalendarDate {
    from_seconds(to_seconds(date))
}

/// Number of days in the (normalized) month of `date`
pub fn days_in_month(date: &CalendarDate) -> i32 {
    let date = normalize(date);
    month_length(date.year, date.month)
}

/// Moves `date` by `days` whole days, carrying across months and years.
pub fn add_days(date: &CalendarDate, days: i32) -> CalendarDate {
    from_seconds(to_seconds(date) + i64::from(days) * SECONDS_PER_DAY)
}

/// Moves `date` by `months` months. If the target month is shorter than the
/// day-of-month, the result sticks to the target month's last day.
pub fn add_months(date: &CalendarDate, months: i32) -> CalendarDate {
    let date = normalize(date);
    let (year, month) = fold_month(
        i64::from(date.year),
        i64::from(date.month) + i64::from(months),
    );
    let (year, month) = (saturate(year), saturate(month));
    CalendarDate {
        year,
        month,
        day: date.day.min(month_length(year, month)),
        ..date
    }
}

pub fn add_years(date: &CalendarDate, years: i32) -> CalendarDate {
    add_months(date, years.saturating_mul(MONTHS_IN_YEAR))
}

/// Replaces the hour, letting values outside 0..=23 roll into other days.
pub fn set_hours(date: &CalendarDate, hours: i32) -> CalendarDate {
    normalize(&CalendarDate { hour: hours, ..*date })
}

pub fn set_minutes(date: &CalendarDate, minutes: i32) -> CalendarDate {
    normalize(&CalendarDate {
        minute: minutes,
        ..*date
    })
}

pub fn set_seconds(date: &CalendarDate, seconds: i32) -> CalendarDate {
    normalize(&CalendarDate {
        second: seconds,
        ..*date
    })
}

/// Day of the week, 1 = Sunday .. 7 = Saturday
pub fn day_of_week(date: &CalendarDate) -> i32 {
    weekday_index(epoch_days(date)) + 1
}

/// ISO 8601 week of the year: the week that holds this date's Thursday,
/// counted from the week that holds January 4th of that Thursday's year.
pub fn week_number(date: &CalendarDate) -> i32 {
    let days = epoch_days(date);
    // Monday = 0 .. Sunday = 6
    let iso_weekday = (days + EPOCH_WEEKDAY - 1).rem_euclid(i64::from(DAYS_IN_WEEK));
    let thursday = days - iso_weekday + 3;
    let (year, _, _) = civil_from_days(thursday);
    let first_of_year = days_from_civil(year, i64::from(JANUARY), 1);
    saturate((thursday - first_of_year) / i64::from(DAYS_IN_WEEK) + 1)
}

/// Rows a month grid needs when weeks start on `first_day_of_week`
/// (0 = Sunday .. 6 = Saturday).
pub fn weeks_in_month(year: i32, month: i32, first_day_of_week: i32) -> i32 {
    let (y, m) = fold_month(i64::from(year), i64::from(month));
    let first_weekday = weekday_index(days_from_civil(y, m, 1));
    let offset = (first_weekday - first_day_of_week).rem_euclid(DAYS_IN_WEEK);
    let used = offset + month_length(year, month);
    (used + DAYS_IN_WEEK - 1) / DAYS_IN_WEEK
}

/// Strictly after `start` and strictly before `end`, to the second.
pub fn is_between(date: &CalendarDate, start: &CalendarDate, end: &CalendarDate) -> bool {
    let at = to_seconds(date);
    at > to_seconds(start) && at < to_seconds(end)
}

fn epoch_days(date: &CalendarDate) -> i64 {
    to_seconds(date).div_euclid(SECONDS_PER_DAY)
}

/// 0 = Sunday .. 6 = Saturday
fn weekday_index(days: i64) -> i32 {
    saturate((days + EPOCH_WEEKDAY).rem_euclid(i64::from(DAYS_IN_WEEK)))
}

/// Folds a possibly out-of-range month into (year, 1..=12).
fn fold_month(year: i64, month: i64) -> (i64, i64) {
    let months_in_year = i64::from(MONTHS_IN_YEAR);
    let total = year * months_in_year + (month - 1);
    (
        total.div_euclid(months_in_year),
        total.rem_euclid(months_in_year) + 1,
    )
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
