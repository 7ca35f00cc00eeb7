use chrono::{Datelike, Days, NaiveDate};

/// Month lengths for the given Gregorian year, January first.
pub fn month_lengths(year: i32) -> [u32; 12] {
    let mut months = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
        months[1] += 1;
    }
    months
}

pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    if n >= 0 {
        date + Days::new(n as u64)
    } else {
        date - Days::new(n.unsigned_abs())
    }
}

/// Day of week with Monday = 0 .. Sunday = 6.
pub fn iso_weekday(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Signed whole-day distance from `start` to `to`.
pub fn days_from(start: NaiveDate, to: NaiveDate) -> i64 {
    (to - start).num_days()
}

/// The Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    add_days(date, -(iso_weekday(date) as i64))
}
