//! Free-form date parsing.
//!
//! Accepts ISO 8601 text, the loose forms people and other programs commonly write
//! (`Aug 15, 1991`, `15 August 1991 10:30 PM`, `Thu, 15 Aug 1991 10:00:00 GMT`,
//! `08/15/1991`), and millisecond timestamps. Anything else yields `None`: a value
//! that cannot be parsed is treated as absent, never as an error.
//!
//! Explicit UTC offsets are folded into the wall-clock fields so the result reads as
//! UTC; text without an offset is taken as wall-clock time as written.

use crate::calendar::{self, month_length};
use crate::consts::{MILLIS_PER_SECOND, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::CalendarDate;

/// Largest timestamp magnitude accepted, one hundred million days either side of the epoch
const MAX_TIMESTAMP_MILLIS: i64 = 8_640_000_000_000_000;

const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const WEEKDAY_PREFIXES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Something the adapter can turn into a [`CalendarDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseInput<'a> {
    /// Already a date; parsing returns a copy
    Date(CalendarDate),
    /// Milliseconds since 1970-01-01T00:00:00 UTC
    Timestamp(i64),
    /// Free-form text
    Text(&'a str),
}

impl From<CalendarDate> for ParseInput<'_> {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

impl From<&CalendarDate> for ParseInput<'_> {
    fn from(date: &CalendarDate) -> Self {
        Self::Date(*date)
    }
}

impl From<i64> for ParseInput<'_> {
    fn from(millis: i64) -> Self {
        Self::Timestamp(millis)
    }
}

impl<'a> From<&'a str> for ParseInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for ParseInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl ParseInput<'_> {
    pub fn parse(self) -> Option<CalendarDate> {
        match self {
            Self::Date(date) => Some(date),
            Self::Timestamp(millis) => from_timestamp_millis(millis),
            Self::Text(text) => parse_datetime(text),
        }
    }
}

/// Wall-clock UTC fields for a millisecond timestamp, or `None` when out of range.
pub fn from_timestamp_millis(millis: i64) -> Option<CalendarDate> {
    if millis.unsigned_abs() > MAX_TIMESTAMP_MILLIS.unsigned_abs() {
        return None;
    }
    Some(calendar::from_seconds(millis.div_euclid(MILLIS_PER_SECOND)))
}

/// Parses free-form date text. See the module docs for accepted forms.
pub fn parse_datetime(text: &str) -> Option<CalendarDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_iso(trimmed).or_else(|| parse_loose(trimmed))
}

/// Fields collected by either parser before validation
#[derive(Debug, Default)]
struct Fields {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    /// Seconds east of UTC
    offset: Option<i64>,
}

impl Fields {
    fn build(self) -> Option<CalendarDate> {
        if !(1..=12).contains(&self.month)
            || !(0..=24).contains(&self.hour)
            || !(0..=59).contains(&self.minute)
            || !(0..=59).contains(&self.second)
            || (self.hour == 24 && (self.minute, self.second) != (0, 0))
        {
            return None;
        }
        let year = i32::try_from(self.year).ok()?;
        let month = i32::try_from(self.month).ok()?;
        if !(1..=i64::from(month_length(year, month))).contains(&self.day) {
            return None;
        }

        let date = CalendarDate::with_time(
            year,
            month,
            i32::try_from(self.day).ok()?,
            i32::try_from(self.hour).ok()?,
            i32::try_from(self.minute).ok()?,
            i32::try_from(self.second).ok()?,
        );
        let seconds = calendar::to_seconds(&date) - self.offset.unwrap_or(0);
        Some(calendar::from_seconds(seconds))
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    const fn is_done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Exactly `count` ASCII digits
    fn digits(&mut self, count: usize) -> Option<i64> {
        let end = self.pos.checked_add(count)?;
        let slice = self.bytes.get(self.pos..end)?;
        if !slice.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos = end;
        Some(
            slice
                .iter()
                .fold(0, |acc, digit| acc * 10 + i64::from(digit - b'0')),
        )
    }

    /// One or more ASCII digits, discarded
    fn skip_digits(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos > start
    }
}

/// `YYYY[-MM[-DD]][(T| )HH:MM[:SS[.fff]][Z|±HH:MM|±HHMM]]`, with `±YYYYYY` years
fn parse_iso(text: &str) -> Option<CalendarDate> {
    let mut scan = Scanner::new(text);
    let mut fields = Fields {
        month: 1,
        day: 1,
        ..Fields::default()
    };

    fields.year = if scan.eat(b'+') {
        scan.digits(6)?
    } else if scan.eat(b'-') {
        -scan.digits(6)?
    } else {
        scan.digits(4)?
    };
    if scan.eat(b'-') {
        fields.month = scan.digits(2)?;
        if scan.eat(b'-') {
            fields.day = scan.digits(2)?;
        }
    }
    if scan.is_done() {
        return fields.build();
    }

    if !(scan.eat(b'T') || scan.eat(b't') || scan.eat(b' ')) {
        return None;
    }
    fields.hour = scan.digits(2)?;
    if !scan.eat(b':') {
        return None;
    }
    fields.minute = scan.digits(2)?;
    if scan.eat(b':') {
        fields.second = scan.digits(2)?;
        if scan.eat(b'.') && !scan.skip_digits() {
            return None;
        }
    }

    if scan.eat(b'Z') || scan.eat(b'z') {
        fields.offset = Some(0);
    } else if let Some(sign) = scan.peek().filter(|b| matches!(*b, b'+' | b'-')) {
        scan.pos += 1;
        let hours = scan.digits(2)?;
        scan.eat(b':');
        let minutes = scan.digits(2)?;
        let magnitude = hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE;
        fields.offset = Some(if sign == b'-' { -magnitude } else { magnitude });
    }

    if scan.is_done() { fields.build() } else { None }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Loose, token-based parsing for the non-ISO forms
fn parse_loose(text: &str) -> Option<CalendarDate> {
    let text = strip_comments(text)?;
    let mut fields = Fields::default();
    let mut month_name: Option<i64> = None;
    let mut numeric_date: Option<[(i64, usize); 3]> = None;
    let mut numbers: Vec<(i64, usize)> = Vec::new();
    let mut time: Option<(i64, i64, i64)> = None;
    let mut meridiem: Option<Meridiem> = None;

    for token in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let lower = token.to_ascii_lowercase();

        if lower.contains(':') {
            let (clock, suffix) = split_meridiem(&lower);
            time = Some(parse_clock(clock)?);
            meridiem = suffix.or(meridiem);
        } else if let Some(found) = parse_meridiem(&lower) {
            meridiem = Some(found);
        } else if let Some(zone) = lower
            .strip_prefix("gmt")
            .or_else(|| lower.strip_prefix("utc"))
        {
            fields.offset = Some(if zone.is_empty() { 0 } else { parse_offset(zone)? });
        } else if lower == "z" {
            fields.offset = Some(0);
        } else if (lower.starts_with('+') || lower.starts_with('-')) && time.is_some() {
            fields.offset = Some(parse_offset(&lower)?);
        } else if lower.contains(['/', '-']) {
            numeric_date = Some(parse_numeric_date(&lower)?);
        } else if lower.bytes().all(|b| b.is_ascii_digit()) {
            numbers.push((lower.parse().ok()?, lower.len()));
        } else if lower.len() >= 3 && lower.bytes().all(|b| b.is_ascii_alphabetic() || b == b'.') {
            let prefix = &lower[..3];
            if let Some(index) = MONTH_PREFIXES.iter().position(|m| *m == prefix) {
                month_name = Some(i64::try_from(index).ok()? + 1);
            } else if !WEEKDAY_PREFIXES.contains(&prefix) {
                return None;
            }
        } else {
            return None;
        }
    }

    match (numeric_date, month_name) {
        (Some(parts), None) if numbers.is_empty() => {
            let [(first, first_len), (second, _), (third, third_len)] = parts;
            if first_len >= 3 {
                (fields.year, fields.month, fields.day) = (first, second, third);
            } else {
                (fields.month, fields.day, fields.year) =
                    (first, second, expand_year(third, third_len));
            }
        }
        (None, Some(month)) => {
            fields.month = month;
            match numbers.as_slice() {
                [(first, first_len), (second, second_len)] => {
                    if *first > 31 || *first_len >= 3 {
                        (fields.year, fields.day) = (*first, *second);
                    } else {
                        (fields.day, fields.year) = (*first, expand_year(*second, *second_len));
                    }
                }
                [(year, len)] if *year > 31 || *len >= 3 => {
                    (fields.year, fields.day) = (*year, 1);
                }
                _ => return None,
            }
        }
        _ => return None,
    }

    if let Some((hour, minute, second)) = time {
        fields.hour = match (meridiem, hour) {
            (None, h) => h,
            (Some(_), h) if !(1..=12).contains(&h) => return None,
            (Some(Meridiem::Am), 12) => 0,
            (Some(Meridiem::Pm), h) if h < 12 => h + 12,
            (Some(_), h) => h,
        };
        fields.minute = minute;
        fields.second = second;
    } else if meridiem.is_some() {
        return None;
    }

    fields.build()
}

/// Drops parenthesized comments such as `(Central European Summer Time)`
fn strip_comments(text: &str) -> Option<String> {
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    (depth == 0).then_some(out)
}

fn parse_meridiem(token: &str) -> Option<Meridiem> {
    match token {
        "am" | "a.m." => Some(Meridiem::Am),
        "pm" | "p.m." => Some(Meridiem::Pm),
        _ => None,
    }
}

/// `10:30pm` → (`10:30`, Pm)
fn split_meridiem(token: &str) -> (&str, Option<Meridiem>) {
    for suffix in ["a.m.", "p.m.", "am", "pm"] {
        if let Some(clock) = token.strip_suffix(suffix) {
            return (clock, parse_meridiem(suffix));
        }
    }
    (token, None)
}

/// `H:MM` or `H:MM:SS`
fn parse_clock(clock: &str) -> Option<(i64, i64, i64)> {
    let parts: Vec<&str> = clock.split(':').collect();
    let number = |s: &str| -> Option<i64> {
        if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    };
    match parts.as_slice() {
        [h, m] => Some((number(h)?, number(m)?, 0)),
        [h, m, s] => Some((number(h)?, number(m)?, number(s)?)),
        _ => None,
    }
}

/// `+0200`, `-05:30`, `+2`
fn parse_offset(zone: &str) -> Option<i64> {
    let (sign, rest) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i64>().ok()?, 0),
        4 => (digits[..2].parse::<i64>().ok()?, digits[2..].parse::<i64>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    let magnitude = hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE;
    Some(sign * magnitude)
}

/// `08/15/1991`, `1991/08/15`, `8-15-91`: three numbers with their digit counts
fn parse_numeric_date(token: &str) -> Option<[(i64, usize); 3]> {
    let separator = if token.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = token.split(separator).collect();
    let [a, b, c] = parts.as_slice() else {
        return None;
    };
    let number = |s: &str| -> Option<(i64, usize)> {
        if s.is_empty() || s.len() > 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some((s.parse().ok()?, s.len()))
    };
    Some([number(a)?, number(b)?, number(c)?])
}

/// Two-digit years: 00-49 → 2000s, 50-99 → 1900s
fn expand_year(year: i64, digits: usize) -> i64 {
    match (digits, year) {
        (1 | 2, 0..=49) => 2000 + year,
        (1 | 2, _) => 1900 + year,
        _ => year,
    }
}
