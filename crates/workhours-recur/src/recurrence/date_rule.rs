//! Holiday-style excluded dates whose Gregorian date moves from year to year.

use chrono::{Datelike, NaiveDate, Weekday};
use workhours_core::config::DateRuleSettings;

use super::config::validate_name;
use super::dynamic::{
    MONTH_OF_YEAR, WEEK_OF_MONTH, checked_u8, next_occurrence_by_month, next_occurrence_by_year,
    weekday_from_number,
};
use super::lunar::{LunarDate, LunarError, MAX_LUNAR_YEAR, MIN_LUNAR_YEAR};
use super::lunar::{lunar_to_solar, solar_to_lunar};
use crate::error::{AllowedRange, RecurError, RecurResult, ValidationError};

const WEEKDAY_NUMBER: AllowedRange = AllowedRange::new(0, 7);
const LUNAR_DAY: AllowedRange = AllowedRange::new(1, 30);

/// A date defined by a rule rather than a fixed day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// The `week`-th `weekday` of `month`, or of every month when `month`
    /// is `None`.
    NthWeekday {
        month: Option<u8>,
        week: u8,
        weekday: Weekday,
    },
    /// A fixed day of the Chinese lunar calendar.
    Lunar { month: u8, day: u8, leap: bool },
}

impl DateRule {
    /// ## Summary
    /// The `week`-th weekday numbered `weekday` (1 is Monday, 0 or 7 is
    /// Sunday) of `month`, or of every month.
    ///
    /// ## Errors
    /// Returns `ValidationError::OutOfRange` for a month outside `1..=12`, a
    /// week outside `1..=5` or an unknown weekday number.
    pub fn nth_weekday(month: Option<i64>, week: i64, weekday: i64) -> Result<Self, ValidationError> {
        let month = month
            .map(|m| checked_u8("month", m, MONTH_OF_YEAR))
            .transpose()?;
        let week = checked_u8("week", week, WEEK_OF_MONTH)?;
        let weekday = weekday_from_number(weekday).ok_or(ValidationError::OutOfRange {
            field: "weekday",
            value: weekday,
            bound: WEEKDAY_NUMBER,
        })?;
        Ok(Self::NthWeekday {
            month,
            week,
            weekday,
        })
    }

    /// ## Summary
    /// Day `day` of lunar month `month`, in the leap month when `leap` is set.
    ///
    /// ## Errors
    /// Returns `ValidationError::OutOfRange` for a month outside `1..=12` or a
    /// day outside `1..=30`.
    pub fn lunar(month: i64, day: i64, leap: bool) -> Result<Self, ValidationError> {
        Ok(Self::Lunar {
            month: checked_u8("month", month, MONTH_OF_YEAR)?,
            day: checked_u8("day", day, LUNAR_DAY)?,
            leap,
        })
    }

    /// ## Summary
    /// Finds the first date on or after `from` the rule falls on.
    ///
    /// Lunar rules skip years in which the day does not exist, such as the
    /// 30th of a 29-day month or a leap month the year lacks. `Ok(None)`
    /// means no date was found within the search span or the lunar table.
    ///
    /// ## Errors
    /// Returns `RecurError::Lunar` if the lunar table cannot be read for a
    /// covered year.
    pub fn next_occurrence(&self, from: NaiveDate) -> RecurResult<Option<NaiveDate>> {
        match *self {
            Self::NthWeekday {
                month: Some(month),
                week,
                weekday,
            } => Ok(next_occurrence_by_year(
                i64::from(month),
                i64::from(week),
                weekday,
                from,
            )?),
            Self::NthWeekday {
                month: None,
                week,
                weekday,
            } => Ok(next_occurrence_by_month(i64::from(week), weekday, from)?),
            Self::Lunar { month, day, leap } => next_lunar_occurrence(month, day, leap, from),
        }
    }
}

fn next_lunar_occurrence(
    month: u8,
    day: u8,
    leap: bool,
    from: NaiveDate,
) -> RecurResult<Option<NaiveDate>> {
    let first_year = match solar_to_lunar(from) {
        Ok(lunar) => lunar.year(),
        Err(_) if from.year() < MIN_LUNAR_YEAR => MIN_LUNAR_YEAR,
        Err(_) => return Ok(None),
    };

    for year in first_year..=MAX_LUNAR_YEAR {
        let date = if leap {
            LunarDate::leap(year, month, day)
        } else {
            LunarDate::new(year, month, day)
        };
        match lunar_to_solar(date) {
            Ok(solar) if solar >= from => return Ok(Some(solar)),
            Ok(_) | Err(LunarError::NoLeapMonth { .. } | LunarError::DayOutOfRange { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(None)
}

/// A validated date rule with the name it is listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDateRule {
    name: String,
    rule: DateRule,
}

impl NamedDateRule {
    /// ## Errors
    /// Returns `ValidationError::ControlCharacter` if the name contains a
    /// control character.
    pub fn new(name: impl Into<String>, rule: DateRule) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, rule })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn rule(&self) -> DateRule {
        self.rule
    }
}

impl TryFrom<&DateRuleSettings> for NamedDateRule {
    type Error = RecurError;

    fn try_from(settings: &DateRuleSettings) -> Result<Self, Self::Error> {
        let required = |field: &str, value: Option<i64>| {
            value.ok_or_else(|| {
                RecurError::InvalidDateRule(format!("'{}' is missing {field}", settings.name))
            })
        };

        let rule = match settings.kind.as_str() {
            "nth_weekday" => DateRule::nth_weekday(
                settings.month,
                required("week", settings.week)?,
                required("weekday", settings.weekday)?,
            )?,
            "lunar" => DateRule::lunar(
                required("month", settings.month)?,
                required("day", settings.day)?,
                settings.leap,
            )?,
            other => {
                return Err(RecurError::InvalidDateRule(format!(
                    "'{}' has unknown kind '{other}'",
                    settings.name
                )));
            }
        };
        Ok(Self::new(settings.name.clone(), rule)?)
    }
}
