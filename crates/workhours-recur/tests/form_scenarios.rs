//! Edit sequences an excluded-date form produces, checked against the summary
//! and the stored state.

use workhours_recur::{
    AllowedRange, Preset, RecurError, RecurrenceConfig, RecurrencePeriod, RepeatCount,
    ValidationError,
};

#[test_log::test]
fn fresh_form_reads_no_end() {
    let config = RecurrenceConfig::new();
    assert_eq!(config.describe(), "No End");
    assert_eq!(config.to_rrule(), None);
}

#[test_log::test]
fn enabling_monthly_every_two() {
    let mut config = RecurrenceConfig::new();
    config.set_enabled(true);
    config.set_period(RecurrencePeriod::Month);
    config.set_interval(2).unwrap();

    assert_eq!(config.interval_clause().as_deref(), Some("Each 2 Months"));
    assert_eq!(config.describe(), "Each 2 Months");
}

#[test]
fn every_count_edit_is_accepted_or_rejected_without_side_effects() {
    let mut config = RecurrenceConfig::new();
    for n in -20..=20 {
        let before = config.count();
        let accepted = config.set_count(n).is_ok();
        assert_eq!(accepted, n == -1 || (1..=10).contains(&n), "count {n}");
        if accepted {
            assert_eq!(config.count().as_raw(), n);
        } else {
            assert_eq!(config.count(), before);
        }
    }
}

#[test]
fn every_interval_edit_is_accepted_or_rejected_without_side_effects() {
    let mut config = RecurrenceConfig::new();
    for n in -10..=10 {
        let before = config.interval();
        match config.set_interval(n) {
            Ok(()) => {
                assert!((1..=5).contains(&n), "interval {n}");
                assert_eq!(i64::from(config.interval().get()), n);
            }
            Err(err) => {
                assert_eq!(
                    err,
                    ValidationError::OutOfRange {
                        field: "interval",
                        value: n,
                        bound: AllowedRange::new(1, 5),
                    }
                );
                assert_eq!(config.interval(), before);
            }
        }
    }
}

#[test]
fn disabling_hides_period_but_keeps_it() {
    let mut config = RecurrenceConfig::new();
    config.set_enabled(true);
    config.set_period(RecurrencePeriod::Year);
    config.set_enabled(false);
    assert_eq!(config.period(), None);

    config.set_enabled(true);
    assert_eq!(config.period(), Some(RecurrencePeriod::Year));
}

#[test]
fn timezone_picker_change() {
    let mut config = RecurrenceConfig::new();
    config.set_timezone("America/New_York", -5.0);
    assert_eq!(config.timezone().utc_offset_minutes(), Some(-300));
}

#[test]
fn preset_catalog_entry_from_json() {
    let preset: Preset = serde_json::from_str(
        r#"{"name": "Year-end freeze", "period": "year", "interval": 1, "count": 3}"#,
    )
    .unwrap();

    let mut config = RecurrenceConfig::new();
    config.apply_preset(&preset);

    assert_eq!(config.name(), "Year-end freeze");
    assert_eq!(config.count(), RepeatCount::Times(3));
    assert_eq!(config.describe(), "Each 1 Year, 3 Times");
}

#[test]
fn preset_catalog_entry_with_bad_interval_is_rejected() {
    let result = serde_json::from_str::<Preset>(
        r#"{"name": "Too sparse", "period": "month", "interval": 9, "count": -1}"#,
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("interval value 9 is out of range"));
}

#[test]
fn preset_with_unknown_period_is_rejected() {
    let settings = workhours_core::config::PresetSettings {
        name: "Daily".to_string(),
        period: "day".to_string(),
        interval: 1,
        count: 1,
    };
    assert!(matches!(
        Preset::try_from(&settings),
        Err(RecurError::UnknownPeriod(_))
    ));
}
