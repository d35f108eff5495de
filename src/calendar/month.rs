use super::OutOfTimeError;
use std::fmt;
use time::{Date, Month};

const MONTHS_IN_YEAR: i64 = 12;

/// The month a calendar grid is anchored on, independent of any selected
/// date.
///
/// Only months whose entire 42-day grid (including the overflow days from
/// the adjacent months) is representable as a [`Date`] can be constructed,
/// i.e., the first and last representable years are excluded.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VisibleMonth {
    first: Date,
    last: Date,
}

impl VisibleMonth {
    pub const MIN_YEAR: i32 = Date::MIN.year() + 1;
    pub const MAX_YEAR: i32 = Date::MAX.year() - 1;

    pub fn new(year: i32, month: Month) -> Result<VisibleMonth, OutOfTimeError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(OutOfTimeError);
        }
        let first = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)?;
        let last = Date::from_calendar_date(year, month, month.length(year))
            .map_err(|_| OutOfTimeError)?;
        Ok(VisibleMonth { first, last })
    }

    /// Returns the month that `date` falls in
    pub fn containing(date: Date) -> Result<VisibleMonth, OutOfTimeError> {
        VisibleMonth::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        self.first.month()
    }

    pub fn first_day(&self) -> Date {
        self.first
    }

    pub fn last_day(&self) -> Date {
        self.last
    }

    /// Number of days in the month
    pub fn length(&self) -> u8 {
        self.last.day()
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.first..=self.last).contains(&date)
    }

    pub fn next(&self) -> Result<VisibleMonth, OutOfTimeError> {
        self.offset(1)
    }

    pub fn previous(&self) -> Result<VisibleMonth, OutOfTimeError> {
        self.offset(-1)
    }

    /// Returns the month `n` months after this one
    pub fn nth_next(&self, n: usize) -> Result<VisibleMonth, OutOfTimeError> {
        self.offset(i64::try_from(n).map_err(|_| OutOfTimeError)?)
    }

    fn offset(&self, delta: i64) -> Result<VisibleMonth, OutOfTimeError> {
        let index = i64::from(self.year()) * MONTHS_IN_YEAR
            + i64::from(u8::from(self.month()))
            - 1;
        let index = index.checked_add(delta).ok_or(OutOfTimeError)?;
        let year = i32::try_from(index.div_euclid(MONTHS_IN_YEAR)).map_err(|_| OutOfTimeError)?;
        let month = u8::try_from(index.rem_euclid(MONTHS_IN_YEAR) + 1)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(OutOfTimeError)?;
        VisibleMonth::new(year, month)
    }
}

impl fmt::Display for VisibleMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month(), self.year())
    }
}
