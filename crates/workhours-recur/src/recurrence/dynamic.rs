//! Dynamic dates: dates defined as "the Nth weekday of a month", such as
//! "the third Wednesday of November".

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{AllowedRange, ValidationError};

pub(crate) const WEEK_OF_MONTH: AllowedRange = AllowedRange::new(1, 5);
pub(crate) const MONTH_OF_YEAR: AllowedRange = AllowedRange::new(1, 12);

/// Any twelve consecutive months contain a fifth occurrence of every weekday.
const MONTH_SEARCH_SPAN: u32 = 12;
/// Weekday/month patterns repeat every 400 Gregorian years.
const YEAR_SEARCH_SPAN: i32 = 400;

/// Maps a day number to a weekday: 1 is Monday, 6 is Saturday, and both 0 and
/// 7 are Sunday.
#[must_use]
pub const fn weekday_from_number(n: i64) -> Option<Weekday> {
    match n {
        0 | 7 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// ## Summary
/// Finds the first date on or after `from` that is the `week`-th `weekday`
/// of its month. Months without a `week`-th such weekday are skipped.
///
/// ## Errors
/// Returns `ValidationError::OutOfRange` if `week` is not in `1..=5`.
pub fn next_occurrence_by_month(
    week: i64,
    weekday: Weekday,
    from: NaiveDate,
) -> Result<Option<NaiveDate>, ValidationError> {
    let week = checked_u8("week", week, WEEK_OF_MONTH)?;

    let (mut year, mut month) = (from.year(), from.month());
    for _ in 0..=MONTH_SEARCH_SPAN {
        if let Some(date) = NaiveDate::from_weekday_of_month_opt(year, month, weekday, week) {
            if date >= from {
                return Ok(Some(date));
            }
        }
        (year, month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
    }
    Ok(None)
}

/// ## Summary
/// Finds the first date on or after `from` that is the `week`-th `weekday`
/// of `month`. Years without a match are skipped.
///
/// ## Errors
/// Returns `ValidationError::OutOfRange` if `month` is not in `1..=12` or
/// `week` is not in `1..=5`.
pub fn next_occurrence_by_year(
    month: i64,
    week: i64,
    weekday: Weekday,
    from: NaiveDate,
) -> Result<Option<NaiveDate>, ValidationError> {
    let month = u32::from(checked_u8("month", month, MONTH_OF_YEAR)?);
    let week = checked_u8("week", week, WEEK_OF_MONTH)?;

    let first_year = from.year();
    for year in first_year..=first_year.saturating_add(YEAR_SEARCH_SPAN) {
        if let Some(date) = NaiveDate::from_weekday_of_month_opt(year, month, weekday, week) {
            if date >= from {
                return Ok(Some(date));
            }
        }
    }
    Ok(None)
}

pub(crate) fn checked_u8(
    field: &'static str,
    value: i64,
    bound: AllowedRange,
) -> Result<u8, ValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|_| bound.contains(value))
        .ok_or(ValidationError::OutOfRange {
            field,
            value,
            bound,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_numbers() {
        assert_eq!(weekday_from_number(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_number(1), Some(Weekday::Mon));
        assert_eq!(weekday_from_number(5), Some(Weekday::Fri));
        assert_eq!(weekday_from_number(7), Some(Weekday::Sun));
        assert_eq!(weekday_from_number(8), None);
        assert_eq!(weekday_from_number(-1), None);
    }

    #[test]
    fn next_occurrence_by_month_cases() {
        let now = date(2019, 7, 22);
        let cases = [
            (1, Weekday::Mon, date(2019, 8, 5)),
            (5, Weekday::Mon, date(2019, 7, 29)),
            (1, Weekday::Fri, date(2019, 8, 2)),
            (3, Weekday::Wed, date(2019, 8, 21)),
        ];
        for (week, weekday, expected) in cases {
            assert_eq!(
                next_occurrence_by_month(week, weekday, now).unwrap(),
                Some(expected),
                "week {week} {weekday}"
            );
        }
    }

    #[test]
    fn next_occurrence_by_month_skips_short_months() {
        // Neither August nor September 2019 has a fifth Tuesday.
        let got = next_occurrence_by_month(5, Weekday::Tue, date(2019, 8, 1)).unwrap();
        assert_eq!(got, Some(date(2019, 10, 29)));
    }

    #[test]
    fn next_occurrence_by_year_cases() {
        let now = date(2019, 7, 22);
        let cases = [
            (1, 1, Weekday::Mon, date(2020, 1, 6)),
            (11, 3, Weekday::Wed, date(2019, 11, 20)),
            (5, 2, Weekday::Fri, date(2020, 5, 8)),
            (7, 1, Weekday::Mon, date(2020, 7, 6)),
            (7, 4, Weekday::Mon, date(2019, 7, 22)),
            (7, 4, Weekday::Tue, date(2019, 7, 23)),
            (7, 3, Weekday::Sun, date(2020, 7, 19)),
        ];
        for (month, week, weekday, expected) in cases {
            assert_eq!(
                next_occurrence_by_year(month, week, weekday, now).unwrap(),
                Some(expected),
                "month {month} week {week} {weekday}"
            );
        }
    }

    #[test]
    fn out_of_range_arguments() {
        let now = date(2019, 7, 22);
        assert!(matches!(
            next_occurrence_by_month(6, Weekday::Mon, now),
            Err(ValidationError::OutOfRange { field: "week", value: 6, .. })
        ));
        assert!(matches!(
            next_occurrence_by_year(13, 1, Weekday::Mon, now),
            Err(ValidationError::OutOfRange { field: "month", value: 13, .. })
        ));
        assert!(matches!(
            next_occurrence_by_year(1, 0, Weekday::Mon, now),
            Err(ValidationError::OutOfRange { field: "week", value: 0, .. })
        ));
    }
}
