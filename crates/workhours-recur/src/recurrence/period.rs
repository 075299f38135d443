//! Repeat period values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecurError;

/// Unit of a repeating schedule.
///
/// Ordinals start at 1 (`Week`) and are stable; naming goes through
/// [`RecurrencePeriod::name`], never through declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePeriod {
    #[default]
    Week,
    Month,
    Year,
}

impl RecurrencePeriod {
    pub const ALL: [Self; 3] = [Self::Week, Self::Month, Self::Year];

    /// Returns the 1-based ordinal.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Week => 1,
            Self::Month => 2,
            Self::Year => 3,
        }
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(Self::Week),
            2 => Some(Self::Month),
            3 => Some(Self::Year),
            _ => None,
        }
    }

    /// Returns the singular display name used in summaries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }

    /// Returns the RFC 5545 `FREQ` value.
    #[must_use]
    pub const fn frequency(self) -> &'static str {
        match self {
            Self::Week => "WEEKLY",
            Self::Month => "MONTHLY",
            Self::Year => "YEARLY",
        }
    }
}

impl fmt::Display for RecurrencePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a period word, ignoring case and surrounding whitespace. Accepts
/// the unit (`week`) or its RRULE frequency word (`weekly`).
impl FromStr for RecurrencePeriod {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            _ => Err(RecurError::UnknownPeriod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_round_trip() {
        for period in RecurrencePeriod::ALL {
            assert_eq!(RecurrencePeriod::from_ordinal(period.ordinal()), Some(period));
        }
        assert_eq!(RecurrencePeriod::from_ordinal(0), None);
        assert_eq!(RecurrencePeriod::from_ordinal(4), None);
    }

    #[test]
    fn names_do_not_depend_on_order() {
        assert_eq!(RecurrencePeriod::Week.name(), "Week");
        assert_eq!(RecurrencePeriod::Month.name(), "Month");
        assert_eq!(RecurrencePeriod::Year.name(), "Year");
        assert_eq!(RecurrencePeriod::Month.to_string(), "Month");
    }

    #[test]
    fn parse_period() {
        assert_eq!("week".parse::<RecurrencePeriod>().unwrap(), RecurrencePeriod::Week);
        assert_eq!(" Month ".parse::<RecurrencePeriod>().unwrap(), RecurrencePeriod::Month);
        assert_eq!("YEARLY".parse::<RecurrencePeriod>().unwrap(), RecurrencePeriod::Year);
        assert!(matches!(
            "day".parse::<RecurrencePeriod>(),
            Err(RecurError::UnknownPeriod(p)) if p == "day"
        ));
    }

    #[test]
    fn parse_accepts_frequency_words() {
        for period in RecurrencePeriod::ALL {
            assert_eq!(period.frequency().parse::<RecurrencePeriod>().unwrap(), period);
        }
        assert_eq!("weekly".parse::<RecurrencePeriod>().unwrap(), RecurrencePeriod::Week);
        assert_eq!("Monthly".parse::<RecurrencePeriod>().unwrap(), RecurrencePeriod::Month);
        assert!("fortnightly".parse::<RecurrencePeriod>().is_err());
    }

    #[test]
    fn default_is_week() {
        assert_eq!(RecurrencePeriod::default(), RecurrencePeriod::Week);
    }
}
