//! Range-checked repeat interval and repeat count.

use std::fmt;

use workhours_core::constants::{
    MAX_REPEAT_COUNT, MAX_REPEAT_INTERVAL, MIN_REPEAT_COUNT, MIN_REPEAT_INTERVAL,
    UNBOUNDED_REPEAT_COUNT,
};

use crate::error::{AllowedRange, ValidationError};

/// "Every N periods", with N in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatInterval(u8);

impl RepeatInterval {
    pub const ALLOWED: AllowedRange = AllowedRange::new(MIN_REPEAT_INTERVAL, MAX_REPEAT_INTERVAL);

    /// ## Summary
    /// Validates a raw interval.
    ///
    /// ## Errors
    /// Returns `ValidationError::OutOfRange` for values outside `1..=5`.
    pub fn from_raw(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|_| Self::ALLOWED.contains(value))
            .map(Self)
            .ok_or(ValidationError::OutOfRange {
                field: "interval",
                value,
                bound: Self::ALLOWED,
            })
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for RepeatInterval {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for RepeatInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of occurrences, or no end at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepeatCount {
    /// Repeats forever ("No End"). Raw value `-1`.
    #[default]
    Unbounded,
    /// Repeats a fixed number of times, `1..=10`.
    Times(u8),
}

impl RepeatCount {
    pub const ALLOWED: AllowedRange =
        AllowedRange::new(MIN_REPEAT_COUNT, MAX_REPEAT_COUNT).with_sentinel(UNBOUNDED_REPEAT_COUNT);

    /// ## Summary
    /// Validates a raw count. `-1` means unbounded; `0` is rejected.
    ///
    /// ## Errors
    /// Returns `ValidationError::OutOfRange` for anything but `-1` or `1..=10`.
    pub fn from_raw(value: i64) -> Result<Self, ValidationError> {
        if value == UNBOUNDED_REPEAT_COUNT {
            return Ok(Self::Unbounded);
        }
        u8::try_from(value)
            .ok()
            .filter(|_| Self::ALLOWED.contains(value))
            .map(Self::Times)
            .ok_or(ValidationError::OutOfRange {
                field: "count",
                value,
                bound: Self::ALLOWED,
            })
    }

    #[must_use]
    pub fn as_raw(self) -> i64 {
        match self {
            Self::Unbounded => UNBOUNDED_REPEAT_COUNT,
            Self::Times(n) => i64::from(n),
        }
    }

    /// Returns the finite count, if any.
    #[must_use]
    pub const fn times(self) -> Option<u8> {
        match self {
            Self::Unbounded => None,
            Self::Times(n) => Some(n),
        }
    }
}
