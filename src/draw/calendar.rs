//! Mapping grid cells onto real calendar dates.
//!
//! The grid is right-aligned to the end of the year: column 52 is the week
//! containing December 31, and column 0 starts on the Sunday 52 weeks
//! before that.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

use super::{Grid, Point, WEEKS};
use crate::error::Error;

/// Years accepted by [`Year::new`].
pub const YEAR_RANGE: RangeInclusive<i32> = 2008..=2099;

/// Hour of day used as the base instant for every date.
const MIDDAY_HOUR: u32 = 12;

/// A validated target year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(i32);

impl Year {
    /// Validates `year` against [`YEAR_RANGE`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::YearOutOfRange`] for years outside the range.
    pub fn new(year: i32) -> Result<Self, Error> {
        if YEAR_RANGE.contains(&year) {
            Ok(Self(year))
        } else {
            Err(Error::YearOutOfRange(year))
        }
    }

    /// The year of `now`.
    #[must_use]
    pub fn current(now: DateTime<Utc>) -> Self {
        Self(now.year())
    }

    /// Returns the raw year number.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the 12:00 UTC instant of `date`.
#[must_use]
pub fn midday(date: NaiveDate) -> DateTime<Utc> {
    let noon = NaiveTime::from_hms_opt(MIDDAY_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(noon).and_utc()
}

/// Returns the Sunday that starts grid column 0 for `year`.
///
/// This is the last Sunday on or before December 31, moved back 52 weeks.
#[must_use]
pub fn anchor(year: Year) -> NaiveDate {
    let dec31 = NaiveDate::from_ymd_opt(year.get(), 12, 31).unwrap_or(NaiveDate::MAX);
    let since_sunday = u64::from(dec31.weekday().num_days_from_sunday());
    dec31 - Days::new(since_sunday) - Days::new(52 * 7)
}

/// Resolves the calendar date of a grid cell.
#[must_use]
pub fn cell_date(year: Year, point: Point) -> NaiveDate {
    let offset = (point.week * 7 + point.day) as u64;
    anchor(year) + Days::new(offset)
}

/// Dates of all lit cells, in grid scan order, restricted to `year` and to
/// dates whose midday instant is not after `now`.
#[must_use]
pub fn foreground_dates(grid: &Grid, year: Year, now: DateTime<Utc>) -> Vec<NaiveDate> {
    resolve(grid, year, now, true)
}

/// Dates of all unlit cells, filtered the same way as [`foreground_dates`].
#[must_use]
pub fn background_dates(grid: &Grid, year: Year, now: DateTime<Utc>) -> Vec<NaiveDate> {
    resolve(grid, year, now, false)
}

fn resolve(grid: &Grid, year: Year, now: DateTime<Utc>, lit: bool) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(WEEKS * super::ROWS);
    for point in grid.cells().filter(|p| grid.is_lit(*p) == lit) {
        let date = cell_date(year, point);
        if date.year() == year.get() && midday(date) <= now {
            dates.push(date);
        }
    }
    tracing::debug!(%year, lit, count = dates.len(), "resolved grid dates");
    dates
}
