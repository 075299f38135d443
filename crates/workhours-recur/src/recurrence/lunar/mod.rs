//! Conversion between Gregorian dates and the Chinese lunisolar calendar.
//!
//! Holidays such as the Spring Festival or the Mid-Autumn Festival are fixed
//! in the lunar calendar, so their Gregorian date moves every year. The
//! conversion is table-driven and covers lunar years 1900 through 2150.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

mod table;

use table::{FIRST_YEAR, LUNAR_YEARS};

/// First lunar year the calendar table covers.
pub const MIN_LUNAR_YEAR: i32 = FIRST_YEAR;
/// Last lunar year the calendar table covers.
pub const MAX_LUNAR_YEAR: i32 = 2150;

/// A lunar month has 29 or 30 days.
const SHORT_MONTH_DAYS: u8 = 29;

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];
const DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
const HEAVENLY_STEMS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];
const EARTHLY_BRANCHES: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];
const ZODIAC_ANIMALS: [char; 12] = [
    '鼠', '牛', '虎', '兔', '龙', '蛇', '马', '羊', '猴', '鸡', '狗', '猪',
];

/// Errors converting to or from the lunar calendar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LunarError {
    /// The lunar year is outside the calendar table.
    #[error("Lunar year {0} is outside {min}..={max}", min = MIN_LUNAR_YEAR, max = MAX_LUNAR_YEAR)]
    YearOutOfRange(i32),

    /// The solar date falls outside the calendar table.
    #[error("Date {0} is outside the lunar calendar table")]
    DateOutOfRange(NaiveDate),

    /// Lunar months are numbered 1 through 12.
    #[error("Lunar month {0} does not exist")]
    InvalidMonth(u8),

    /// The year has no leap month, or a different one.
    #[error("Lunar year {year} has no leap month {month}")]
    NoLeapMonth { year: i32, month: u8 },

    /// The day is past the end of the month.
    #[error("Lunar month {month} of {year} has {days} days, got day {day}")]
    DayOutOfRange {
        year: i32,
        month: u8,
        day: u8,
        days: u8,
    },
}

/// A date in the Chinese lunar calendar.
///
/// Ordering is chronological: a leap month sorts directly after the regular
/// month it repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LunarDate {
    year: i32,
    month: u8,
    leap: bool,
    day: u8,
}

impl LunarDate {
    /// A day in a regular (non-leap) month. Not checked against the calendar
    /// until converted.
    #[must_use]
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            leap: false,
            day,
        }
    }

    /// A day in the leap month that repeats `month`.
    #[must_use]
    pub const fn leap(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            leap: true,
            day,
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[must_use]
    pub const fn is_leap_month(&self) -> bool {
        self.leap
    }

    /// Month name such as `正月` or `闰六月`.
    #[must_use]
    pub fn month_name(&self) -> String {
        let name = MONTH_NAMES
            .get(usize::from(self.month).wrapping_sub(1))
            .copied()
            .unwrap_or("?");
        let prefix = if self.leap { "闰" } else { "" };
        format!("{prefix}{name}月")
    }

    /// Day name such as `初一`, `十五` or `廿九`.
    #[must_use]
    pub fn day_name(&self) -> String {
        let digit = |n: u8| DIGITS.get(usize::from(n)).copied().unwrap_or('?');
        match self.day {
            10 => "初十".to_string(),
            20 => "二十".to_string(),
            30 => "三十".to_string(),
            d @ 1..=9 => format!("初{}", digit(d)),
            d @ 11..=19 => format!("十{}", digit(d - 10)),
            d @ 21..=29 => format!("廿{}", digit(d - 20)),
            d => d.to_string(),
        }
    }
}

impl fmt::Display for LunarDate {
    /// Formats as `二〇二四年正月初一`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}年{}{}",
            year_name(self.year),
            self.month_name(),
            self.day_name()
        )
    }
}

/// Writes the year digit by digit: 2024 is `二〇二四`.
#[must_use]
pub fn year_name(year: i32) -> String {
    year.to_string()
        .chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|d| usize::try_from(d).ok())
                .and_then(|d| DIGITS.get(d).copied())
                .unwrap_or(c)
        })
        .collect()
}

/// Stem-branch name of the year, e.g. `甲辰` for 2024.
#[must_use]
pub fn sexagenary_name(year: i32) -> String {
    let stem = HEAVENLY_STEMS[cycle_index(year, HEAVENLY_STEMS.len())];
    let branch = EARTHLY_BRANCHES[cycle_index(year, EARTHLY_BRANCHES.len())];
    format!("{stem}{branch}")
}

/// Zodiac animal of the year, e.g. `龙` for 2024.
#[must_use]
pub fn zodiac_animal(year: i32) -> char {
    ZODIAC_ANIMALS[cycle_index(year, ZODIAC_ANIMALS.len())]
}

// Year 4 opened a sexagenary cycle (甲子).
fn cycle_index(year: i32, len: usize) -> usize {
    let len = i64::try_from(len).unwrap_or(1);
    usize::try_from((i64::from(year) - 4).rem_euclid(len)).unwrap_or(0)
}

/// ## Summary
/// Converts a lunar date to its Gregorian date.
///
/// ## Errors
/// Returns `LunarError` if the year is outside the table, the month does not
/// exist in that year, or the day is past the end of the month.
pub fn lunar_to_solar(date: LunarDate) -> Result<NaiveDate, LunarError> {
    if !(1..=12).contains(&date.month) {
        return Err(LunarError::InvalidMonth(date.month));
    }
    let months = month_spans(date.year).ok_or(LunarError::YearOutOfRange(date.year))?;
    let span = months
        .iter()
        .find(|span| span.month == date.month && span.leap == date.leap)
        .ok_or(LunarError::NoLeapMonth {
            year: date.year,
            month: date.month,
        })?;

    if date.day == 0 || date.day > span.days {
        return Err(LunarError::DayOutOfRange {
            year: date.year,
            month: date.month,
            day: date.day,
            days: span.days,
        });
    }
    span.start
        .checked_add_days(Days::new(u64::from(date.day - 1)))
        .ok_or(LunarError::YearOutOfRange(date.year))
}

/// ## Summary
/// Converts a Gregorian date to the lunar calendar.
///
/// ## Errors
/// Returns `LunarError::DateOutOfRange` for dates before the first lunar new
/// year of the table (1900-01-31) or after its last month.
pub fn solar_to_lunar(date: NaiveDate) -> Result<LunarDate, LunarError> {
    // A solar date belongs to the lunar year of the same number or the one
    // before it.
    for year in [date.year(), date.year() - 1] {
        let Some(months) = month_spans(year) else {
            continue;
        };
        let Some(span) = months.iter().rev().find(|span| span.start <= date) else {
            continue;
        };
        let offset = (date - span.start).num_days();
        if let Ok(day) = u8::try_from(offset + 1) {
            if day <= span.days {
                return Ok(LunarDate {
                    year,
                    month: span.month,
                    leap: span.leap,
                    day,
                });
            }
        }
    }
    Err(LunarError::DateOutOfRange(date))
}

/// ## Summary
/// Number of days from `from` to `to`, negative when `to` comes first.
///
/// ## Errors
/// Returns `LunarError` if either date cannot be converted.
pub fn days_between(from: LunarDate, to: LunarDate) -> Result<i64, LunarError> {
    Ok((lunar_to_solar(to)? - lunar_to_solar(from)?).num_days())
}

/// One lunar month of a year in the table.
#[derive(Debug, Clone, Copy)]
struct MonthSpan {
    month: u8,
    leap: bool,
    start: NaiveDate,
    days: u8,
}

fn year_row(year: i32) -> Option<&'static [u16]> {
    let index = usize::try_from(year.checked_sub(FIRST_YEAR)?).ok()?;
    LUNAR_YEARS.get(index).copied()
}

fn decode_start(year: i32, mmdd: u16) -> Option<NaiveDate> {
    let (year, mmdd) = if mmdd > 1231 {
        (year + 1, mmdd - 1200)
    } else {
        (year, mmdd)
    };
    NaiveDate::from_ymd_opt(year, u32::from(mmdd / 100), u32::from(mmdd % 100))
}

/// Months of a lunar year in calendar order.
///
/// The length of the last month of the last table year is unknown; it is
/// taken as 29 days.
fn month_spans(year: i32) -> Option<Vec<MonthSpan>> {
    let (&leap, starts) = year_row(year)?.split_first()?;
    let leap = u8::try_from(leap).ok()?;
    let starts = starts
        .iter()
        .map(|&mmdd| decode_start(year, mmdd))
        .collect::<Option<Vec<_>>>()?;
    let next_new_year = year_row(year + 1)
        .and_then(|row| row.get(1))
        .and_then(|&mmdd| decode_start(year + 1, mmdd));

    let mut months = Vec::with_capacity(starts.len());
    for (index, &start) in starts.iter().enumerate() {
        let position = u8::try_from(index).ok()?;
        let (month, is_leap) = if leap == 0 || position < leap {
            (position + 1, false)
        } else if position == leap {
            (leap, true)
        } else {
            (position, false)
        };
        let end = starts.get(index + 1).copied().or(next_new_year);
        let days = end
            .and_then(|end| u8::try_from((end - start).num_days()).ok())
            .unwrap_or(SHORT_MONTH_DAYS);
        months.push(MonthSpan {
            month,
            leap: is_leap,
            start,
            days,
        });
    }
    Some(months)
}
