use crate::bounds::{DateBounds, DateFilter, NoExclusions};
use crate::calendar::{generate_grids, Grid, GridCell, OutOfTimeError, VisibleMonth};
use crate::selection::{Mode, RangeNotify, Selection, SelectionValue};
use std::num::NonZeroUsize;
use time::{Date, Weekday};
use tracing::{debug, trace, warn};

/// Everything a date picker's host owns: the month being browsed, the
/// current selection, and the rules for what may be selected.
///
/// Browsing never touches the selection, and selecting never moves the
/// visible month.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatePicker<F = NoExclusions> {
    today: Date,
    visible: VisibleMonth,
    selection: Selection,
    bounds: DateBounds<F>,
    first_weekday: Weekday,
    months: NonZeroUsize,
    notify: RangeNotify,
}

impl DatePicker {
    /// Create an empty picker showing the month containing `today`
    pub fn new(today: Date, mode: Mode) -> Result<DatePicker, OutOfTimeError> {
        Ok(DatePicker {
            today,
            visible: VisibleMonth::containing(today)?,
            selection: Selection::empty(mode),
            bounds: DateBounds::new(),
            first_weekday: Weekday::Sunday,
            months: NonZeroUsize::MIN,
            notify: RangeNotify::default(),
        })
    }
}

impl<F> DatePicker<F> {
    /// Start from an initial selection and show the month of its earliest
    /// date
    pub fn value(mut self, selection: Selection) -> Self {
        if let Some(month) = selection
            .earliest()
            .and_then(|d| VisibleMonth::containing(d).ok())
        {
            self.visible = month;
        }
        self.selection = selection;
        self
    }

    pub fn first_weekday(mut self, weekday: Weekday) -> Self {
        self.first_weekday = weekday;
        self
    }

    /// Number of consecutive months shown side by side
    pub fn months(mut self, qty: NonZeroUsize) -> Self {
        self.months = qty;
        self
    }

    pub fn notify(mut self, policy: RangeNotify) -> Self {
        self.notify = policy;
        self
    }

    /// Replace the bounds, dropping any already selected dates that they
    /// disable
    pub fn bounds<G: DateFilter>(self, bounds: DateBounds<G>) -> DatePicker<G> {
        let mut picker = DatePicker {
            today: self.today,
            visible: self.visible,
            selection: self.selection,
            bounds,
            first_weekday: self.first_weekday,
            months: self.months,
            notify: self.notify,
        };
        picker.evict_disabled();
        picker
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn visible_month(&self) -> VisibleMonth {
        self.visible
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> Mode {
        self.selection.mode()
    }

    pub fn date_bounds(&self) -> &DateBounds<F> {
        &self.bounds
    }

    pub fn week_start(&self) -> Weekday {
        self.first_weekday
    }

    pub fn month_count(&self) -> NonZeroUsize {
        self.months
    }

    /// The grids for every shown month
    pub fn grids(&self) -> Result<Vec<Grid>, OutOfTimeError> {
        generate_grids(self.visible, self.first_weekday, self.months)
    }

    /// The last of the shown months
    pub fn last_visible_month(&self) -> Result<VisibleMonth, OutOfTimeError> {
        self.visible.nth_next(self.months.get() - 1)
    }

    /// Returns `true` if `date` is a regular (non-overflow) day of one of the
    /// shown months
    pub fn is_shown(&self, date: Date) -> bool {
        self.last_visible_month()
            .is_ok_and(|last| self.visible.first_day() <= date && date <= last.last_day())
    }

    pub fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.show_month(self.visible.previous()?)
    }

    pub fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.show_month(self.visible.next()?)
    }

    /// Show the month containing `date`
    pub fn jump_to(&mut self, date: Date) -> Result<(), OutOfTimeError> {
        self.show_month(VisibleMonth::containing(date)?)
    }

    pub fn jump_to_today(&mut self) {
        if self.jump_to(self.today).is_err() {
            debug!(today = %self.today, "today's month cannot be shown");
        }
    }

    fn show_month(&mut self, month: VisibleMonth) -> Result<(), OutOfTimeError> {
        // All shown months must be representable, not just the first
        month.nth_next(self.months.get() - 1)?;
        trace!(from = %self.visible, to = %month, "changing visible month");
        self.visible = month;
        Ok(())
    }
}

impl<F: DateFilter> DatePicker<F> {
    pub fn is_disabled(&self, date: Date) -> bool {
        self.bounds.is_disabled(date)
    }

    /// Handle a click on a grid cell.
    ///
    /// Overflow and disabled cells are ignored.  Otherwise the selection is
    /// updated and the value to report to the host (if any, see
    /// [`RangeNotify`]) is returned.
    pub fn click(&mut self, cell: GridCell) -> Option<SelectionValue> {
        if cell.is_overflow {
            trace!(date = %cell.date, "ignoring click on overflow day");
            return None;
        }
        self.select(cell.date)
    }

    /// Select `date` as though its cell had been clicked, for dates coming
    /// from typed entry rather than the grid
    pub fn select(&mut self, date: Date) -> Option<SelectionValue> {
        if self.is_disabled(date) {
            debug!(%date, "ignoring selection of disabled date");
            return None;
        }
        self.selection = self.selection.next(date, false);
        debug!(%date, mode = %self.mode(), selection = ?self.selection, "selection changed");
        self.selection.notification(self.notify)
    }

    /// Empty the selection
    pub fn clear(&mut self) -> SelectionValue {
        self.selection = Selection::empty(self.mode());
        debug!(mode = %self.mode(), "selection cleared");
        self.selection.value()
    }

    /// Replace the bounds.  Selected dates that the new bounds disable are
    /// dropped, and the new value is returned if anything was.
    pub fn set_bounds(&mut self, bounds: DateBounds<F>) -> Option<SelectionValue> {
        self.bounds = bounds;
        self.evict_disabled()
    }

    fn evict_disabled(&mut self) -> Option<SelectionValue> {
        let bounds = &self.bounds;
        if self.selection.retain(|d| !bounds.is_disabled(d)) {
            warn!(selection = ?self.selection, "dropped disabled dates from selection");
            Some(self.selection.value())
        } else {
            None
        }
    }

    /// Everything a view needs to know to draw `cell`
    pub fn day_state(&self, cell: GridCell) -> DayState {
        let date = cell.date;
        let range = self.selection.range();
        DayState {
            selected: self.selection.contains(date),
            in_range: self.selection.in_range(date),
            range_start: self.selection.range_start() == Some(date),
            range_end: range.is_some_and(|r| r.end() == date),
            disabled: self.is_disabled(date),
            today: date == self.today,
            overflow: cell.is_overflow,
            first_of_month: date.day() == 1,
            last_of_month: is_last_day_of_month(date),
        }
    }
}

fn is_last_day_of_month(date: Date) -> bool {
    match date.next_day() {
        Some(tomorrow) => date.month() != tomorrow.month(),
        None => true,
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DayState {
    pub selected: bool,
    /// Within a complete range, endpoints included
    pub in_range: bool,
    pub range_start: bool,
    pub range_end: bool,
    pub disabled: bool,
    pub today: bool,
    pub overflow: bool,
    pub first_of_month: bool,
    pub last_of_month: bool,
}

impl DayState {
    /// Overflow and disabled days cannot be picked
    pub fn is_selectable(&self) -> bool {
        !self.overflow && !self.disabled
    }
}
