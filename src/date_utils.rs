use chrono::{Datelike, Days, NaiveDate};

use crate::error::CalendarError;

/// Convert a proleptic Gregorian date to its Julian Day Number.
pub fn julian_day_number(year: i64, month: i64, day: i64) -> i64 {
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

pub fn date_to_jdn(date: NaiveDate) -> i64 {
    julian_day_number(
        i64::from(date.year()),
        i64::from(date.month()),
        i64::from(date.day()),
    )
}

/// Divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn check_month(month: u32) -> Result<(), CalendarError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CalendarError::InvalidMonth { month })
    }
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    check_month(month)?;
    Ok(match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    })
}

pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    check_month(month)?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearOutOfRange { year })
}

pub fn last_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    let last_day = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, last_day).ok_or(CalendarError::YearOutOfRange { year })
}

/// The Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

/// The Sunday on or after `date`.
pub fn week_end(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(
        6 - date.weekday().num_days_from_monday(),
    )))
}

/// Move `delta` months from (`year`, `month`), carrying into the year.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<(i32, u32), CalendarError> {
    check_month(month)?;
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let new_year = i32::try_from(index.div_euclid(12))
        .map_err(|_| CalendarError::YearOutOfRange { year })?;
    // rem_euclid(12) is always in 0..12
    let new_month = index.rem_euclid(12) as u32 + 1;
    Ok((new_year, new_month))
}
