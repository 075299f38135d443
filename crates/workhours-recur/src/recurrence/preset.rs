//! Named recurrence bundles fed in from a preset catalog.

use serde::Deserialize;
use workhours_core::config::PresetSettings;

use super::config::validate_name;
use super::{RecurrencePeriod, RepeatCount, RepeatInterval};
use crate::error::{RecurError, ValidationError};

/// A validated `{name, period, interval, count}` bundle.
///
/// Only constructible through validation, so applying one to a
/// [`RecurrenceConfig`](super::RecurrenceConfig) never fails halfway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PresetSettings")]
pub struct Preset {
    name: String,
    period: RecurrencePeriod,
    interval: RepeatInterval,
    count: RepeatCount,
}

impl Preset {
    /// ## Summary
    /// Builds a preset from raw form values.
    ///
    /// ## Errors
    /// Returns the first `ValidationError` among name, interval and count.
    pub fn new(
        name: impl Into<String>,
        period: RecurrencePeriod,
        interval: i64,
        count: i64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            period,
            interval: RepeatInterval::from_raw(interval)?,
            count: RepeatCount::from_raw(count)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn period(&self) -> RecurrencePeriod {
        self.period
    }

    #[must_use]
    pub const fn interval(&self) -> RepeatInterval {
        self.interval
    }

    #[must_use]
    pub const fn count(&self) -> RepeatCount {
        self.count
    }
}

impl TryFrom<&PresetSettings> for Preset {
    type Error = RecurError;

    fn try_from(settings: &PresetSettings) -> Result<Self, Self::Error> {
        let period = settings.period.parse::<RecurrencePeriod>()?;
        Ok(Self::new(
            settings.name.clone(),
            period,
            settings.interval,
            settings.count,
        )?)
    }
}

impl TryFrom<PresetSettings> for Preset {
    type Error = RecurError;

    fn try_from(settings: PresetSettings) -> Result<Self, Self::Error> {
        Self::try_from(&settings)
    }
}
