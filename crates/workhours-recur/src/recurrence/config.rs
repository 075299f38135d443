//! The recurrence configuration record driven by an excluded-date form.

use workhours_core::config::RecurrenceDefaults;

use super::{BaseTimezone, Preset, RecurrencePeriod, RepeatCount, RepeatInterval, pluralize};
use crate::error::ValidationError;

/// Summary shown when the count is unbounded.
const NO_END: &str = "No End";

/// Repeat settings of one excluded date.
///
/// Every mutation goes through a setter. Rejected edits return an error and
/// leave the record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecurrenceConfig {
    enabled: bool,
    period: RecurrencePeriod,
    interval: RepeatInterval,
    count: RepeatCount,
    name: String,
    timezone: BaseTimezone,
}

impl RecurrenceConfig {
    /// Creates a configuration with default repeat settings: disabled,
    /// weekly, interval 1, no end, UTC.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a default configuration using the configured base timezone.
    #[must_use]
    pub fn from_defaults(defaults: &RecurrenceDefaults) -> Self {
        Self {
            timezone: BaseTimezone::new(defaults.timezone.clone(), defaults.utc_offset_hours),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the repeat period, or `None` while repetition is disabled.
    #[must_use]
    pub fn period(&self) -> Option<RecurrencePeriod> {
        self.enabled.then_some(self.period)
    }

    #[must_use]
    pub const fn interval(&self) -> RepeatInterval {
        self.interval
    }

    #[must_use]
    pub const fn count(&self) -> RepeatCount {
        self.count
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn timezone(&self) -> &BaseTimezone {
        &self.timezone
    }

    /// ## Summary
    /// Sets the repeat count. `-1` means no end.
    ///
    /// ## Errors
    /// Returns `ValidationError::OutOfRange` unless `n` is `-1` or in `1..=10`.
    pub fn set_count(&mut self, n: i64) -> Result<(), ValidationError> {
        self.count = RepeatCount::from_raw(n)?;
        Ok(())
    }

    pub fn set_period(&mut self, period: RecurrencePeriod) {
        self.period = period;
    }

    /// ## Summary
    /// Sets the repeat interval.
    ///
    /// ## Errors
    /// Returns `ValidationError::OutOfRange` unless `n` is in `1..=5`.
    pub fn set_interval(&mut self, n: i64) -> Result<(), ValidationError> {
        self.interval = RepeatInterval::from_raw(n)?;
        Ok(())
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Stores the picker's timezone; the offset is kept in minutes.
    pub fn set_timezone(&mut self, name: impl Into<String>, offset_hours: f64) {
        self.timezone = BaseTimezone::new(name, offset_hours);
    }

    /// ## Summary
    /// Sets the free-text label.
    ///
    /// ## Errors
    /// Returns `ValidationError::ControlCharacter` if `name` contains one.
    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Copies a preset's name and repeat settings and turns repetition on.
    ///
    /// Presets are validated when built, so applying one cannot fail.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.name = preset.name().to_string();
        self.period = preset.period();
        self.interval = preset.interval();
        self.count = preset.count();
        self.enabled = true;
    }

    /// Returns `"N Time"` or `"N Times"`, or `None` when the count is unbounded.
    #[must_use]
    pub fn count_clause(&self) -> Option<String> {
        self.count.times().map(|n| {
            let n = i64::from(n);
            format!("{n} {}", pluralize("Time", n))
        })
    }

    /// Returns `"Each N Period(s)"`, or `None` while repetition is disabled.
    #[must_use]
    pub fn interval_clause(&self) -> Option<String> {
        let period = self.period()?;
        let n = i64::from(self.interval.get());
        Some(format!("Each {n} {}", pluralize(period.name(), n)))
    }

    /// ## Summary
    /// Builds the human-readable summary, e.g. `"Each 2 Weeks, 3 Times"`.
    ///
    /// The interval clause appears only while repetition is enabled and the
    /// count clause only for a finite count. `"No End"` stands in when
    /// neither applies.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.interval_clause(), self.count_clause()) {
            (Some(interval), Some(count)) => format!("{interval}, {count}"),
            (Some(clause), None) | (None, Some(clause)) => clause,
            (None, None) => NO_END.to_string(),
        }
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    match name.chars().position(char::is_control) {
        Some(position) => Err(ValidationError::ControlCharacter {
            field: "name",
            position,
        }),
        None => Ok(()),
    }
}
