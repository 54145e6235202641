use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wallclock_adapter::{
    AdapterConfig, AdapterError, CalendarAdapter, CalendarDate, DatetimeAdapter, FieldStyle,
    FormatSpec, LanguageIdentifier, LocaleError, LocaleFormatter, NameStyle,
};

fn adapter(tag: &str) -> CalendarAdapter {
    CalendarAdapter::for_locale(tag).unwrap()
}

/// Renders `H:MM <period>` and nothing else, with no parts support
#[derive(Debug)]
struct ClockOnlyFormatter {
    am: &'static str,
    pm: &'static str,
}

impl LocaleFormatter for ClockOnlyFormatter {
    fn format(
        &self,
        _locale: &LanguageIdentifier,
        date: &CalendarDate,
        _spec: &FormatSpec,
    ) -> Result<String, LocaleError> {
        let period = if date.hour < 12 { self.am } else { self.pm };
        Ok(format!("{}:{:02} {period}", date.hour, date.minute))
    }

    fn format_number(&self, _locale: &LanguageIdentifier, value: i64, min_digits: usize) -> String {
        format!("{value:0min_digits$}")
    }
}

/// Steps through every day of a month the way a calendar grid would
fn month_grid<A: DatetimeAdapter>(adapter: &A, year: i32, month: i32) -> Vec<Vec<i32>> {
    let first = adapter.create_date(year, month, 1);
    let offset = (adapter.day_of_week(&first) - 1 - i32::from(adapter.first_day_of_week()))
        .rem_euclid(7);
    let mut rows = vec![vec![0; 7]];
    let mut cursor = first.clone();
    for _ in 0..adapter.days_in_month(&first) {
        let cell = usize::try_from(offset + adapter.date(&cursor) - 1).unwrap();
        if cell / 7 == rows.len() {
            rows.push(vec![0; 7]);
        }
        rows[cell / 7][cell % 7] = adapter.date(&cursor);
        cursor = adapter.add_calendar_days(&cursor, 1);
    }
    rows
}

#[test]
fn month_grid_matches_weeks_in_month() {
    struct TestCase {
        year: i32,
        month: i32,
        first_day: u8,
        rows: i32,
    }

    let test_cases = [
        // February 2023 starts on a Wednesday
        TestCase {
            year: 2023,
            month: 2,
            first_day: 0,
            rows: 5,
        },
        // February 2015 starts on a Sunday and fits in four rows
        TestCase {
            year: 2015,
            month: 2,
            first_day: 0,
            rows: 4,
        },
        TestCase {
            year: 2015,
            month: 2,
            first_day: 1,
            rows: 5,
        },
        // August 2020 starts on a Saturday
        TestCase {
            year: 2020,
            month: 8,
            first_day: 0,
            rows: 6,
        },
    ];

    for case in test_cases {
        let mut adapter = adapter("en-US");
        adapter.set_first_day_of_week(case.first_day).unwrap();
        let grid = month_grid(&adapter, case.year, case.month);
        assert_eq!(
            i32::try_from(grid.len()).unwrap(),
            case.rows,
            "{}-{:02} starting on {}",
            case.year,
            case.month,
            case.first_day
        );
        assert_eq!(
            adapter.weeks_in_month(case.year, case.month, case.first_day),
            case.rows
        );
    }
}

#[test]
fn day_of_week_cycles_through_a_year() {
    let adapter = adapter("en-US");
    let mut date = adapter.create_date(2024, 1, 1);
    let mut expected = adapter.day_of_week(&date);
    for _ in 0..366 {
        let day = adapter.day_of_week(&date);
        assert!((1..=7).contains(&day));
        assert_eq!(day, expected);
        expected = expected % 7 + 1;
        date = adapter.add_calendar_days(&date, 1);
    }
    assert_eq!(date, CalendarDate::new(2025, 1, 1));
}

#[test]
fn add_months_round_trips_unless_clamped() {
    let adapter = adapter("en-US");
    for month in 1..=12 {
        for day in [1, 15, 28] {
            let date = CalendarDate::with_time(2019, month, day, 10, 20, 30);
            for n in [-25, -1, 1, 7, 12, 40] {
                let there = adapter.add_calendar_months(&date, n);
                assert_eq!(adapter.add_calendar_months(&there, -n), date);
            }
        }
    }

    let jan31 = adapter.create_date(2020, 1, 31);
    let feb = adapter.add_calendar_months(&jan31, 1);
    assert_eq!(feb, CalendarDate::new(2020, 2, 29));
    assert_eq!(
        adapter.add_calendar_months(&feb, -1),
        CalendarDate::new(2020, 1, 29)
    );
    assert_eq!(
        adapter.add_calendar_years(&CalendarDate::new(2020, 2, 29), 1),
        CalendarDate::new(2021, 2, 28)
    );
}

#[test]
fn week_numbers_across_year_boundaries() {
    let adapter = adapter("en-US");
    assert_eq!(adapter.week_number(&CalendarDate::new(2021, 1, 1)), 53);
    assert_eq!(adapter.week_number(&CalendarDate::new(2021, 1, 4)), 1);
    assert_eq!(adapter.week_number(&CalendarDate::new(2019, 12, 30)), 1);
    assert_eq!(adapter.week_name(&CalendarDate::new(2021, 1, 1)), "53");
}

#[test]
fn validity_and_format() {
    let adapter = adapter("en-US");
    for year in [-400, 0, 1900, 2000, 2021, 2024] {
        let date = adapter.create_date(year, 2, 30);
        assert!(!adapter.is_valid(&date));
        assert!(matches!(
            adapter.format(&date, &FormatSpec::numeric_date()),
            Err(AdapterError::InvalidDate(_))
        ));
    }
    assert_eq!(adapter.days_in_month(&CalendarDate::new(2020, 2, 1)), 29);
    assert_eq!(adapter.days_in_month(&CalendarDate::new(2021, 2, 1)), 28);
}

#[test]
fn format_rolls_over_time_fields() {
    let adapter = adapter("en-US");
    let spec = FormatSpec::new()
        .hour(FieldStyle::Numeric)
        .minute(FieldStyle::TwoDigit);
    let date = adapter.create_date(2021, 5, 5);
    let date = CalendarDate {
        hour: 10,
        minute: 60,
        ..date
    };
    assert!(adapter.is_valid(&date));
    assert_eq!(adapter.format(&date, &spec).unwrap(), "11:00 AM");
    assert_eq!(
        adapter.year_name(&CalendarDate::new(2021, 2, 30)).unwrap(),
        "2021"
    );
}

#[test]
fn parse_follows_the_input_kind() {
    let adapter = adapter("en-US");
    assert_eq!(adapter.parse("not a date"), None);

    let parsed = adapter.parse("2021-03-04T05:06:07").unwrap();
    assert_eq!(
        (
            adapter.year(&parsed),
            adapter.month(&parsed),
            adapter.date(&parsed),
            adapter.hours(&parsed),
            adapter.minutes(&parsed),
            adapter.seconds(&parsed)
        ),
        (2021, 3, 4, 5, 6, 7)
    );

    let source = CalendarDate::new(1999, 12, 31);
    let copy = adapter.parse(&source).unwrap();
    assert_eq!(copy, source);

    assert_eq!(adapter.parse(0_i64), Some(CalendarDate::new(1970, 1, 1)));
    let text = String::from("Aug 15, 1991");
    assert_eq!(adapter.parse(&text), Some(CalendarDate::new(1991, 8, 15)));
}

#[test]
fn clone_is_independent() {
    let adapter = adapter("en-US");
    let original = adapter.create_date(2022, 6, 1);
    let mut copy = adapter.clone_date(&original);
    assert_eq!(copy, original);
    copy.month = 7;
    assert_ne!(copy, original);
    assert_eq!(original.month, 6);
}

#[test]
fn limited_year_range_is_opt_in() {
    let spec = FormatSpec::new().year(FieldStyle::Numeric);
    let limited = CalendarAdapter::new(AdapterConfig {
        limited_year_range: true,
        ..AdapterConfig::default()
    })
    .unwrap();
    let unlimited = adapter("en-US");

    let future = CalendarDate::new(12000, 1, 1);
    assert_eq!(limited.format(&future, &spec).unwrap(), "9999");
    assert_eq!(unlimited.format(&future, &spec).unwrap(), "12000");
    assert_eq!(
        limited.format(&CalendarDate::new(0, 1, 1), &spec).unwrap(),
        "1"
    );
}

#[test]
fn arabic_output_is_stripped() {
    let adapter = adapter("ar-EG");
    let date = CalendarDate::with_time(2021, 10, 5, 15, 4, 0);
    let formats = adapter.formats().clone();
    for spec in [
        &formats.display.date_input,
        &formats.display.date_time_input,
        &formats.display.date_a11y_label,
    ] {
        let text = adapter.format(&date, spec).unwrap();
        assert!(!text.contains('\u{200F}'), "{text:?}");
        assert!(!text.contains('\u{200E}'), "{text:?}");
    }
}

#[test]
fn day_periods_without_parts_support() {
    let config = AdapterConfig::for_locale("de-DE");
    let adapter = CalendarAdapter::with_formatter(
        config.clone(),
        ClockOnlyFormatter {
            am: "vorm.",
            pm: "nachm.",
        },
    )
    .unwrap();
    assert_eq!(
        adapter.day_period_names(),
        ("vorm.".to_owned(), "nachm.".to_owned())
    );

    let letterless = CalendarAdapter::with_formatter(config, ClockOnlyFormatter { am: "", pm: "" })
        .unwrap();
    assert_eq!(
        letterless.day_period_names(),
        ("AM".to_owned(), "PM".to_owned())
    );
}

#[test]
fn locale_listeners() {
    let mut adapter = adapter("en-US");
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&first);
    let first_id = adapter.on_locale_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = Arc::clone(&second);
    adapter.on_locale_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    adapter.set_locale("fr-FR").unwrap();
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
    assert_eq!(adapter.month_names(NameStyle::Long).unwrap()[7], "août");

    assert!(adapter.remove_locale_listener(first_id));
    adapter.set_locale("es-ES").unwrap();
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 2);
    assert_eq!(adapter.locale_version(), 2);
    assert_eq!(
        adapter.day_of_week_names(NameStyle::Short).unwrap()[3],
        "mié"
    );
}

#[test]
fn first_day_of_week_is_configured_not_derived() {
    assert_eq!(adapter("de-DE").first_day_of_week(), 0);
    let config: AdapterConfig =
        serde_json::from_str(r#"{"locale":"de-DE","firstDayOfWeek":1}"#).unwrap();
    assert_eq!(CalendarAdapter::new(config).unwrap().first_day_of_week(), 1);
}

#[test]
fn equality_and_canonical_text() {
    let adapter = adapter("en-US");
    let a = CalendarDate::with_time(2021, 7, 4, 9, 0, 0);
    let b = CalendarDate::with_time(2021, 7, 4, 21, 0, 0);
    assert!(adapter.dates_equal(&a, &b));
    assert!(!adapter.date_times_equal(&a, &b));
    assert_eq!(adapter.to_iso8601(&a), "2021-07-04T09:00:00");
    assert!(adapter.is_between(&a, &CalendarDate::new(2021, 7, 4), &b));
    assert!(!adapter.is_between(&a, &a, &b));
}
