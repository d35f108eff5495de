mod grid;
mod month;
pub use self::grid::{generate_grid, generate_grids, Grid, GridCell, GRID_CELLS};
pub use self::month::VisibleMonth;
use std::num::NonZeroUsize;
use thiserror::Error;
use time::Weekday::{self, *};

/// Number of columns in a calendar grid
pub const DAYS_IN_WEEK: usize = 7;

const WEEKDAYS_FROM_SUNDAY: [Weekday; DAYS_IN_WEEK] =
    [Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday];

pub trait WeekdayExt {
    /// Number of days from Sunday, 0 through 6
    fn index0(&self) -> usize;

    /// Column of this weekday in a grid whose rows start on `first`
    fn column(&self, first: Weekday) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        usize::from(self.number_days_from_sunday())
    }

    fn column(&self, first: Weekday) -> usize {
        (self.index0() + DAYS_IN_WEEK - first.index0()) % DAYS_IN_WEEK
    }
}

/// Returns the weekdays in the order they appear as columns when rows start
/// on `first`
pub fn weekday_order(first: Weekday) -> [Weekday; DAYS_IN_WEEK] {
    std::array::from_fn(|i| WEEKDAYS_FROM_SUNDAY[(first.index0() + i) % DAYS_IN_WEEK])
}

/// Converts a numeric first-day-of-week setting (0 = Sunday through 6 =
/// Saturday) to a [`Weekday`]
pub fn first_weekday_from_index(index: u8) -> Result<Weekday, GridRequestError> {
    WEEKDAYS_FROM_SUNDAY
        .get(usize::from(index))
        .copied()
        .ok_or(GridRequestError::FirstWeekday(index))
}

/// Validates the number of months a picker shows side by side
pub fn month_count(qty: usize) -> Result<NonZeroUsize, GridRequestError> {
    NonZeroUsize::new(qty).ok_or(GridRequestError::MonthCount)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum GridRequestError {
    #[error("first day of week must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    FirstWeekday(u8),
    #[error("at least one month must be shown")]
    MonthCount,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_order_sunday() {
        assert_eq!(
            weekday_order(Sunday),
            [Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday]
        );
    }

    #[test]
    fn test_weekday_order_monday() {
        assert_eq!(
            weekday_order(Monday),
            [Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday]
        );
    }

    #[test]
    fn test_weekday_order_saturday() {
        assert_eq!(
            weekday_order(Saturday),
            [Saturday, Sunday, Monday, Tuesday, Wednesday, Thursday, Friday]
        );
    }

    #[test]
    fn test_column() {
        assert_eq!(Sunday.column(Sunday), 0);
        assert_eq!(Saturday.column(Sunday), 6);
        assert_eq!(Sunday.column(Monday), 6);
        assert_eq!(Monday.column(Monday), 0);
        assert_eq!(Friday.column(Saturday), 6);
    }

    #[test]
    fn test_first_weekday_from_index() {
        assert_eq!(first_weekday_from_index(0), Ok(Sunday));
        assert_eq!(first_weekday_from_index(1), Ok(Monday));
        assert_eq!(first_weekday_from_index(6), Ok(Saturday));
        assert_eq!(
            first_weekday_from_index(7),
            Err(GridRequestError::FirstWeekday(7))
        );
    }

    #[test]
    fn test_month_count() {
        assert_eq!(month_count(0), Err(GridRequestError::MonthCount));
        assert_eq!(month_count(3).map(NonZeroUsize::get), Ok(3));
    }
}
