//! Occurrence expansion for form-shaped recurrence settings.

use chrono::NaiveDate;
use workhours_recur::{ExpansionEnd, RecurError, RecurrenceConfig, RecurrencePeriod};

struct ExpansionCase {
    name: &'static str,
    period: RecurrencePeriod,
    interval: i64,
    count: i64,
    timezone: (&'static str, f64),
    start: &'static str,
    limit: u16,
    expected: &'static [&'static str],
}

fn expansion_cases() -> Vec<ExpansionCase> {
    vec![
        ExpansionCase {
            name: "monthly_from_month_end_lands_on_last_day",
            period: RecurrencePeriod::Month,
            interval: 1,
            count: 4,
            timezone: ("UTC", 0.0),
            start: "2024-01-31",
            limit: 100,
            expected: &["2024-01-31", "2024-02-29", "2024-03-31", "2024-04-30"],
        },
        ExpansionCase {
            name: "yearly_from_leap_day",
            period: RecurrencePeriod::Year,
            interval: 1,
            count: 3,
            timezone: ("Asia/Tokyo", 9.0),
            start: "2024-02-29",
            limit: 100,
            expected: &["2024-02-29", "2025-02-28", "2026-02-28"],
        },
        ExpansionCase {
            name: "weekly_every_two_three_times",
            period: RecurrencePeriod::Week,
            interval: 2,
            count: 3,
            timezone: ("UTC", 0.0),
            start: "2019-07-22",
            limit: 100,
            expected: &["2019-07-22", "2019-08-05", "2019-08-19"],
        },
        ExpansionCase {
            name: "monthly_unbounded_capped_by_limit",
            period: RecurrencePeriod::Month,
            interval: 1,
            count: -1,
            timezone: ("Europe/Berlin", 1.0),
            start: "2024-01-15",
            limit: 4,
            expected: &["2024-01-15", "2024-02-15", "2024-03-15", "2024-04-15"],
        },
        ExpansionCase {
            name: "quarterly_across_dst",
            period: RecurrencePeriod::Month,
            interval: 3,
            count: 4,
            timezone: ("America/New_York", -5.0),
            start: "2023-01-10",
            limit: 100,
            expected: &["2023-01-10", "2023-04-10", "2023-07-10", "2023-10-10"],
        },
        ExpansionCase {
            name: "yearly_once",
            period: RecurrencePeriod::Year,
            interval: 1,
            count: 1,
            timezone: ("Asia/Shanghai", 8.0),
            start: "2020-10-01",
            limit: 100,
            expected: &["2020-10-01"],
        },
        ExpansionCase {
            name: "yearly_every_five_fixed_offset_fallback",
            period: RecurrencePeriod::Year,
            interval: 5,
            count: 3,
            timezone: ("Pacific Standard Time", -8.0),
            start: "2000-06-30",
            limit: 100,
            expected: &["2000-06-30", "2005-06-30", "2010-06-30"],
        },
        ExpansionCase {
            name: "limit_below_count",
            period: RecurrencePeriod::Week,
            interval: 1,
            count: 10,
            timezone: ("UTC", 0.0),
            start: "2021-03-01",
            limit: 2,
            expected: &["2021-03-01", "2021-03-08"],
        },
    ]
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test_log::test]
fn expansion_cases_match() {
    for case in expansion_cases() {
        let mut config = RecurrenceConfig::new();
        config.set_enabled(true);
        config.set_period(case.period);
        config.set_interval(case.interval).unwrap();
        config.set_count(case.count).unwrap();
        config.set_timezone(case.timezone.0, case.timezone.1);

        let got = config
            .occurrences(parse_date(case.start), case.limit)
            .unwrap_or_else(|err| panic!("{}: {err}", case.name));
        let expected: Vec<NaiveDate> = case.expected.iter().map(|s| parse_date(s)).collect();

        assert_eq!(got, expected, "case {}", case.name);
    }
}

#[test]
fn unresolvable_timezone_fails_expansion() {
    let mut config = RecurrenceConfig::new();
    config.set_enabled(true);
    config.set_timezone("Nowhere/Special", 5.5);

    let err = config
        .occurrences(parse_date("2022-01-01"), 10)
        .unwrap_err();
    assert!(matches!(err, RecurError::UnknownTimezone(_)));
}

#[test]
fn nan_offset_is_not_utc() {
    let mut config = RecurrenceConfig::new();
    config.set_enabled(true);
    config.set_timezone("Bogus", f64::NAN);

    assert_eq!(config.timezone().utc_offset_minutes(), None);
    let err = config
        .occurrences(parse_date("2022-01-01"), 10)
        .unwrap_err();
    assert!(matches!(err, RecurError::UnknownTimezone(_)));
}

#[test_log::test]
fn expansion_reports_why_it_stopped() {
    let mut config = RecurrenceConfig::new();
    config.set_enabled(true);
    config.set_period(RecurrencePeriod::Year);
    config.set_interval(5).unwrap();

    let near_ceiling = config.expand(parse_date("9999-12-31"), 100).unwrap();
    assert_eq!(near_ceiling.dates, vec![parse_date("9999-12-31")]);
    assert_eq!(near_ceiling.end, ExpansionEnd::CalendarEnd);

    let capped = config.expand(parse_date("2024-06-01"), 3).unwrap();
    assert_eq!(capped.dates.len(), 3);
    assert_eq!(capped.end, ExpansionEnd::Limit);

    config.set_count(2).unwrap();
    let finished = config.expand(parse_date("2024-06-01"), 3).unwrap();
    assert_eq!(
        finished.dates,
        vec![parse_date("2024-06-01"), parse_date("2029-06-01")]
    );
    assert_eq!(finished.end, ExpansionEnd::Complete);
}

#[test]
fn disabled_config_ignores_timezone() {
    let mut config = RecurrenceConfig::new();
    config.set_timezone("Nowhere/Special", 5.5);

    let dates = config.occurrences(parse_date("2022-01-01"), 10).unwrap();
    assert_eq!(dates, vec![parse_date("2022-01-01")]);
}
