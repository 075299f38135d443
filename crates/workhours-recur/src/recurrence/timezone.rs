//! Base timezone for occurrence computation.

use std::str::FromStr;

use chrono_tz::Tz;

use crate::error::{RecurError, RecurResult};

/// Offsets of a day or more are not UTC offsets.
const MAX_OFFSET_HOURS: f64 = 24.0;

/// Timezone as reported by a timezone picker: a name plus its UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTimezone {
    name: String,
    utc_offset_minutes: Option<i32>,
}

impl BaseTimezone {
    /// Creates a timezone from a picker's `(name, offset_hours)` pair.
    ///
    /// Fractional hours (e.g. `5.5`) round to the nearest minute. A NaN,
    /// infinite or day-sized offset is kept as unknown, so only the name can
    /// resolve the zone.
    #[must_use]
    pub fn new(name: impl Into<String>, offset_hours: f64) -> Self {
        Self {
            name: name.into(),
            utc_offset_minutes: hours_to_minutes(offset_hours),
        }
    }

    #[must_use]
    pub fn utc() -> Self {
        Self {
            name: "UTC".to_string(),
            utc_offset_minutes: Some(0),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offset in minutes, `None` if the picker reported an unusable value.
    #[must_use]
    pub const fn utc_offset_minutes(&self) -> Option<i32> {
        self.utc_offset_minutes
    }

    /// ## Summary
    /// Resolves the timezone to an IANA zone.
    ///
    /// The name is tried first. Names the IANA database does not know fall
    /// back to the fixed `Etc/GMT` zone matching the offset, which only exists
    /// for whole-hour offsets.
    ///
    /// ## Errors
    /// Returns `RecurError::UnknownTimezone` if neither the name nor the
    /// offset maps to a zone.
    pub fn resolve(&self) -> RecurResult<Tz> {
        if let Ok(tz) = Tz::from_str(self.name.trim()) {
            return Ok(tz);
        }

        self.utc_offset_minutes
            .and_then(fixed_offset_zone)
            .ok_or_else(|| match self.utc_offset_minutes {
                Some(minutes) => RecurError::UnknownTimezone(format!(
                    "{} (UTC offset {minutes} minutes)",
                    self.name
                )),
                None => RecurError::UnknownTimezone(format!("{} (no usable UTC offset)", self.name)),
            })
    }
}

impl Default for BaseTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "offset is bounded to a day before the cast"
)]
fn hours_to_minutes(offset_hours: f64) -> Option<i32> {
    (offset_hours.is_finite() && offset_hours.abs() < MAX_OFFSET_HOURS)
        .then(|| (offset_hours * 60.0).round() as i32)
}

/// Maps a whole-hour offset to its `Etc/GMT` zone.
///
/// The `Etc` zones invert the sign: UTC-5 is `Etc/GMT+5`.
fn fixed_offset_zone(utc_offset_minutes: i32) -> Option<Tz> {
    if utc_offset_minutes % 60 != 0 {
        return None;
    }
    let hours = utc_offset_minutes / 60;
    let name = match hours {
        0 => "Etc/UTC".to_string(),
        h if h < 0 => format!("Etc/GMT+{}", -h),
        h => format!("Etc/GMT-{h}"),
    };
    Tz::from_str(&name).ok()
}
