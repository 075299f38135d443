use std::fmt;

use thiserror::Error;

use crate::recurrence::lunar::LunarError;

/// Values a validated field accepts: the inclusive range `min..=max`, plus an
/// optional sentinel outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedRange {
    pub min: i64,
    pub max: i64,
    pub sentinel: Option<i64>,
}

impl AllowedRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            sentinel: None,
        }
    }

    #[must_use]
    pub const fn with_sentinel(self, sentinel: i64) -> Self {
        Self {
            sentinel: Some(sentinel),
            ..self
        }
    }

    /// Returns `true` if `value` is the sentinel or lies within `min..=max`.
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        if let Some(sentinel) = self.sentinel {
            if value == sentinel {
                return true;
            }
        }
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for AllowedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)?;
        if let Some(sentinel) = self.sentinel {
            write!(f, " or {sentinel}")?;
        }
        Ok(())
    }
}

/// Rejected edit to a recurrence configuration.
///
/// Validation never corrects the input; the caller decides whether to drop
/// the edit or surface it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} value {value} is out of range, expected {bound}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        bound: AllowedRange,
    },

    #[error("{field} contains a control character at position {position}")]
    ControlCharacter { field: &'static str, position: usize },
}

/// Recurrence derivation and expansion errors
#[derive(Error, Debug)]
pub enum RecurError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown repeat period: {0}")]
    UnknownPeriod(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Start date {0} has no local time in the base timezone")]
    InvalidStart(chrono::NaiveDate),

    #[error("RRule error: {0}")]
    RRule(String),

    #[error("Invalid date rule: {0}")]
    InvalidDateRule(String),

    #[error(transparent)]
    Lunar(#[from] LunarError),
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_range_contains() {
        let range = AllowedRange::new(1, 5);
        assert!(range.contains(1));
        assert!(range.contains(5));
        assert!(!range.contains(0));
        assert!(!range.contains(6));
        assert!(!range.contains(-1));
    }

    #[test]
    fn allowed_range_sentinel() {
        let range = AllowedRange::new(1, 10).with_sentinel(-1);
        assert!(range.contains(-1));
        assert!(!range.contains(0));
        assert!(!range.contains(-2));
        assert_eq!(range.to_string(), "[1, 10] or -1");
    }

    #[test]
    fn out_of_range_message() {
        let err = ValidationError::OutOfRange {
            field: "interval",
            value: 7,
            bound: AllowedRange::new(1, 5),
        };
        assert_eq!(
            err.to_string(),
            "interval value 7 is out of range, expected [1, 5]"
        );
    }
}
