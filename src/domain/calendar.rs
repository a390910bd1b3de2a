//! Calendar ranges
//!
//! Inclusive `[start, end]` instants covering a local calendar day, month or
//! year. `end` is one millisecond before the next period starts, i.e.
//! `23:59:59.999` local time on the last day.

use chrono::{DateTime, Duration, Month, Months, NaiveDate, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Range covering `date` in `tz`.
pub fn day_range<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateRange> {
    span(tz, date, date.succ_opt()?)
}

/// Range covering `month` of `year` in `tz`.
pub fn month_range<Tz: TimeZone>(tz: &Tz, year: i32, month: Month) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    span(tz, first, next)
}

/// Range covering the calendar `year` in `tz`.
pub fn year_range<Tz: TimeZone>(tz: &Tz, year: i32) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let next = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    span(tz, first, next)
}

fn span<Tz: TimeZone>(tz: &Tz, first: NaiveDate, next: NaiveDate) -> Option<DateRange> {
    let start = start_of_day(tz, first)?;
    let end = start_of_day(tz, next)? - Duration::milliseconds(1);
    Some(DateRange { start, end })
}

/// First instant of `date` in `tz`.
///
/// An ambiguous midnight resolves to its earliest instant; a midnight
/// skipped by a DST jump resolves to the first valid minute after the gap.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    (0..=180)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                .earliest()
        })
        .map(|t| t.with_timezone(&Utc))
}
