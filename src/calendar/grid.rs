use super::{OutOfTimeError, VisibleMonth, WeekdayExt, DAYS_IN_WEEK};
use std::iter::successors;
use std::num::NonZeroUsize;
use time::{Date, Weekday};

/// Number of cells in a month grid: six rows of seven days
pub const GRID_CELLS: usize = 42;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridCell {
    pub date: Date,
    /// `true` if `date` lies outside the month the grid is anchored on
    pub is_overflow: bool,
}

/// A six-week block of consecutive days covering one month plus the
/// leading and trailing days needed to fill the first and last rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    month: VisibleMonth,
    first_weekday: Weekday,
    cells: [GridCell; GRID_CELLS],
}

impl Grid {
    pub fn month(&self) -> VisibleMonth {
        self.month
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub fn cells(&self) -> &[GridCell; GRID_CELLS] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridCell> {
        self.cells.iter()
    }

    /// Iterates over the rows of the grid, seven cells each
    pub fn weeks(&self) -> std::slice::ChunksExact<'_, GridCell> {
        self.cells.chunks_exact(DAYS_IN_WEEK)
    }

    /// Number of cells before the first day of the month
    pub fn leading_overflow(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_overflow).count()
    }

    /// Number of cells after the last day of the month
    pub fn trailing_overflow(&self) -> usize {
        self.cells.iter().rev().take_while(|c| c.is_overflow).count()
    }

    /// Returns the index of the cell showing `date`, if any
    pub fn position(&self, date: Date) -> Option<usize> {
        self.cells.iter().position(|c| c.date == date)
    }

    pub fn get(&self, date: Date) -> Option<GridCell> {
        self.position(date).and_then(|i| self.cells.get(i).copied())
    }
}

/// Lay out the grid for `month` with rows starting on `first_weekday`.
///
/// The result always holds exactly [`GRID_CELLS`] consecutive days: the
/// days of the previous month needed to reach the first day of the month,
/// every day of the month, then days of the following month up to the end of
/// the sixth row.
///
/// # Panics
///
/// Never for a [`VisibleMonth`], as those are restricted to months whose
/// overflow days are representable.
pub fn generate_grid(month: VisibleMonth, first_weekday: Weekday) -> Grid {
    let first = month.first_day();
    let leading = first.weekday().column(first_weekday);
    let start = iter_days_before(first)
        .nth(leading)
        .expect("leading overflow days should be representable");
    let mut days = iter_days_from(start);
    let cells = std::array::from_fn(|_| {
        let date = days
            .next()
            .expect("trailing overflow days should be representable");
        GridCell {
            date,
            is_overflow: !month.contains(date),
        }
    });
    Grid {
        month,
        first_weekday,
        cells,
    }
}

/// Lay out one grid for each of `qty` consecutive months starting at `month`.
///
/// Each grid is independent; a date in the overflow of one grid may appear
/// as a regular day of the next one.
pub fn generate_grids(
    month: VisibleMonth,
    first_weekday: Weekday,
    qty: NonZeroUsize,
) -> Result<Vec<Grid>, OutOfTimeError> {
    (0..qty.get())
        .map(|i| month.nth_next(i).map(|m| generate_grid(m, first_weekday)))
        .collect()
}

fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day())
}
