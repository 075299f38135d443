//! RFC 5545 rule derivation and occurrence expansion using the `rrule` crate.

use chrono::{Datelike, NaiveDate, TimeZone};
use rrule::{RRule, Tz as RRuleTz, Unvalidated};

use super::{RecurrenceConfig, RecurrencePeriod};
use crate::error::{RecurError, RecurResult};

/// Local hour each occurrence is anchored at. Midday keeps the date stable
/// across DST transitions, which happen at night.
const ANCHOR_HOUR: u32 = 12;

/// Every month has at least this many days.
const SHORTEST_MONTH: u32 = 28;

/// Why an expansion stopped producing dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionEnd {
    /// All occurrences were produced: the finite count was reached, or
    /// repeat is disabled.
    Complete,
    /// The requested limit was reached before the rule ran out.
    Limit,
    /// The rule ran past the last representable year (9999) before reaching
    /// its count or the limit.
    CalendarEnd,
}

/// Dates produced by [`RecurrenceConfig::expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub dates: Vec<NaiveDate>,
    pub end: ExpansionEnd,
}

impl RecurrenceConfig {
    /// ## Summary
    /// Derives the RRULE value, e.g. `FREQ=WEEKLY;INTERVAL=2;COUNT=3`.
    ///
    /// Returns `None` while repetition is disabled. An unbounded count emits
    /// no `COUNT` part.
    #[must_use]
    pub fn to_rrule(&self) -> Option<String> {
        let period = self.period()?;
        let mut rule = format!("FREQ={};INTERVAL={}", period.frequency(), self.interval());
        if let Some(n) = self.count().times() {
            rule.push_str(&format!(";COUNT={n}"));
        }
        Some(rule)
    }

    /// ## Summary
    /// Expands the configured recurrence starting at `start`; the dates of
    /// [`expand`](Self::expand).
    ///
    /// ## Errors
    /// Same as [`expand`](Self::expand).
    pub fn occurrences(&self, start: NaiveDate, limit: u16) -> RecurResult<Vec<NaiveDate>> {
        Ok(self.expand(start, limit)?.dates)
    }

    /// ## Summary
    /// Expands the configured recurrence starting at `start` and reports why
    /// it stopped.
    ///
    /// Dates are computed in the base timezone. A disabled configuration
    /// yields `start` alone. At most `limit` dates are returned, which is what
    /// bounds an unbounded count. A monthly rule starting after the 28th
    /// falls on the last day of shorter months, and a yearly rule starting on
    /// February 29 falls on February 28 in common years.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The base timezone cannot be resolved
    /// - `start` has no local time in the base timezone
    /// - The derived rule is rejected by the `rrule` crate
    ///
    /// ## Side Effects
    ///
    /// None - expansion happens in memory.
    pub fn expand(&self, start: NaiveDate, limit: u16) -> RecurResult<Expansion> {
        if limit == 0 {
            return Ok(Expansion {
                dates: Vec::new(),
                end: ExpansionEnd::Limit,
            });
        }
        let (Some(period), Some(mut rule_text)) = (self.period(), self.to_rrule()) else {
            tracing::trace!(%start, "Repeat disabled, single occurrence");
            return Ok(Expansion {
                dates: vec![start],
                end: ExpansionEnd::Complete,
            });
        };
        if let Some(parts) = month_end_parts(period, start) {
            rule_text.push_str(&parts);
        }

        let tz = self.timezone().resolve()?;
        let local_start = start
            .and_hms_opt(ANCHOR_HOUR, 0, 0)
            .ok_or(RecurError::InvalidStart(start))?;
        let dt_start = tz
            .from_local_datetime(&local_start)
            .earliest()
            .ok_or(RecurError::InvalidStart(start))?
            .with_timezone(&RRuleTz::Tz(tz));

        let rrule = rule_text
            .parse::<RRule<Unvalidated>>()
            .map_err(|err| RecurError::RRule(err.to_string()))?;
        let rrule_set = rrule
            .build(dt_start)
            .map_err(|err| RecurError::RRule(err.to_string()))?;

        let result = rrule_set.all(limit);
        let end = expansion_end(self.count().times(), result.dates.len(), limit);
        tracing::trace!(
            rrule = %rule_text,
            tz = %tz,
            occurrences = result.dates.len(),
            end = ?end,
            "Expanded recurrence"
        );

        Ok(Expansion {
            dates: result.dates.iter().map(chrono::DateTime::date_naive).collect(),
            end,
        })
    }
}

/// Extra RRULE parts that pin a late-month start to the end of shorter
/// months, e.g. `;BYMONTHDAY=28,29,30,31;BYSETPOS=-1` for the 31st.
fn month_end_parts(period: RecurrencePeriod, start: NaiveDate) -> Option<String> {
    match period {
        RecurrencePeriod::Month if start.day() > SHORTEST_MONTH => {
            let days = (SHORTEST_MONTH..=start.day())
                .map(|day| day.to_string())
                .collect::<Vec<_>>()
                .join(",");
            Some(format!(";BYMONTHDAY={days};BYSETPOS=-1"))
        }
        RecurrencePeriod::Year if start.month() == 2 && start.day() == 29 => {
            Some(";BYMONTH=2;BYMONTHDAY=28,29;BYSETPOS=-1".to_string())
        }
        RecurrencePeriod::Week | RecurrencePeriod::Month | RecurrencePeriod::Year => None,
    }
}

fn expansion_end(count: Option<u8>, produced: usize, limit: u16) -> ExpansionEnd {
    if count.is_some_and(|n| produced == usize::from(n)) {
        ExpansionEnd::Complete
    } else if produced >= usize::from(limit) {
        ExpansionEnd::Limit
    } else {
        ExpansionEnd::CalendarEnd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecurrencePeriod;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rrule_text() {
        let mut config = RecurrenceConfig::new();
        assert_eq!(config.to_rrule(), None);

        config.set_enabled(true);
        assert_eq!(config.to_rrule().as_deref(), Some("FREQ=WEEKLY;INTERVAL=1"));

        config.set_interval(2).unwrap();
        config.set_count(3).unwrap();
        assert_eq!(
            config.to_rrule().as_deref(),
            Some("FREQ=WEEKLY;INTERVAL=2;COUNT=3")
        );

        config.set_period(RecurrencePeriod::Year);
        config.set_count(-1).unwrap();
        assert_eq!(config.to_rrule().as_deref(), Some("FREQ=YEARLY;INTERVAL=2"));
    }

    #[test]
    fn disabled_yields_start_only() {
        let config = RecurrenceConfig::new();
        let dates = config.occurrences(date(2019, 7, 22), 10).unwrap();
        assert_eq!(dates, vec![date(2019, 7, 22)]);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let mut config = RecurrenceConfig::new();
        config.set_enabled(true);
        assert!(config.occurrences(date(2019, 7, 22), 0).unwrap().is_empty());
        assert_eq!(config.expand(date(2019, 7, 22), 0).unwrap().end, ExpansionEnd::Limit);
    }

    #[test]
    fn month_end_parts_only_for_late_starts() {
        assert_eq!(month_end_parts(RecurrencePeriod::Month, date(2024, 1, 28)), None);
        assert_eq!(
            month_end_parts(RecurrencePeriod::Month, date(2024, 1, 30)).as_deref(),
            Some(";BYMONTHDAY=28,29,30;BYSETPOS=-1")
        );
        assert_eq!(
            month_end_parts(RecurrencePeriod::Year, date(2024, 2, 29)).as_deref(),
            Some(";BYMONTH=2;BYMONTHDAY=28,29;BYSETPOS=-1")
        );
        assert_eq!(month_end_parts(RecurrencePeriod::Year, date(2024, 1, 31)), None);
        assert_eq!(month_end_parts(RecurrencePeriod::Week, date(2024, 1, 31)), None);
    }

    #[test]
    fn monthly_from_the_31st_keeps_every_month() {
        let mut config = RecurrenceConfig::new();
        config.set_enabled(true);
        config.set_period(RecurrencePeriod::Month);
        config.set_count(4).unwrap();

        let expansion = config.expand(date(2024, 1, 31), 10).unwrap();
        assert_eq!(
            expansion.dates,
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
        );
        assert_eq!(expansion.end, ExpansionEnd::Complete);
        // The rule text shown to users does not depend on the start date.
        assert_eq!(config.to_rrule().as_deref(), Some("FREQ=MONTHLY;INTERVAL=1;COUNT=4"));
    }

    #[test]
    fn monthly_from_the_30th_in_a_common_year() {
        let mut config = RecurrenceConfig::new();
        config.set_enabled(true);
        config.set_period(RecurrencePeriod::Month);
        config.set_count(3).unwrap();

        let dates = config.occurrences(date(2023, 1, 30), 10).unwrap();
        assert_eq!(dates, vec![date(2023, 1, 30), date(2023, 2, 28), date(2023, 3, 30)]);
    }

    #[test]
    fn yearly_from_leap_day_falls_back_to_february_28() {
        let mut config = RecurrenceConfig::new();
        config.set_enabled(true);
        config.set_period(RecurrencePeriod::Year);
        config.set_count(3).unwrap();

        let dates = config.occurrences(date(2024, 2, 29), 10).unwrap();
        assert_eq!(dates, vec![date(2024, 2, 29), date(2025, 2, 28), date(2026, 2, 28)]);
    }

    #[test]
    fn expansion_end_classification() {
        assert_eq!(expansion_end(Some(3), 3, 10), ExpansionEnd::Complete);
        assert_eq!(expansion_end(Some(3), 3, 3), ExpansionEnd::Complete);
        assert_eq!(expansion_end(Some(5), 3, 3), ExpansionEnd::Limit);
        assert_eq!(expansion_end(None, 4, 4), ExpansionEnd::Limit);
        assert_eq!(expansion_end(None, 1, 100), ExpansionEnd::CalendarEnd);
        assert_eq!(expansion_end(Some(5), 2, 100), ExpansionEnd::CalendarEnd);
    }

    #[test_log::test]
    fn unbounded_rule_reports_calendar_end() {
        let mut config = RecurrenceConfig::new();
        config.set_enabled(true);
        config.set_period(RecurrencePeriod::Year);
        config.set_interval(5).unwrap();

        let expansion = config.expand(date(9999, 12, 31), 100).unwrap();
        assert_eq!(expansion.dates, vec![date(9999, 12, 31)]);
        assert_eq!(expansion.end, ExpansionEnd::CalendarEnd);
    }

    #[test]
    fn disabled_expansion_is_complete() {
        let expansion = RecurrenceConfig::new().expand(date(2024, 5, 1), 10).unwrap();
        assert_eq!(expansion.end, ExpansionEnd::Complete);
        assert_eq!(expansion.dates, vec![date(2024, 5, 1)]);
    }
}
