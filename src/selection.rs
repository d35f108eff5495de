//! Selection state and how clicks change it
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Date;

/// How clicks on dates update the selection
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// At most one date; each click replaces it
    #[default]
    Single,
    /// A start and end date picked with two clicks
    Range,
    /// Any number of dates; each click toggles one
    Multiple,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::Range => "range",
            Mode::Multiple => "multiple",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Mode, ParseModeError> {
        match s {
            "single" => Ok(Mode::Single),
            "range" => Ok(Mode::Range),
            "multiple" => Ok(Mode::Multiple),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid selection mode {0:?}; expected \"single\", \"range\", or \"multiple\"")]
pub struct ParseModeError(String);

/// An inclusive span of days with `start <= end`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Builds a range from two dates given in either order
    pub fn new(a: Date, b: Date) -> DateRange {
        DateRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RangeSelection {
    #[default]
    Empty,
    /// The start has been picked and the end is still to come
    Pending(Date),
    Complete(DateRange),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    Single(Option<Date>),
    Range(RangeSelection),
    Multiple(BTreeSet<Date>),
}

impl Selection {
    pub fn empty(mode: Mode) -> Selection {
        match mode {
            Mode::Single => Selection::Single(None),
            Mode::Range => Selection::Range(RangeSelection::Empty),
            Mode::Multiple => Selection::Multiple(BTreeSet::new()),
        }
    }

    /// Seed a selection from an initial value.
    ///
    /// In single mode only the first date is kept; in range mode the first
    /// two dates become the range, in chronological order.
    pub fn from_dates<I: IntoIterator<Item = Date>>(mode: Mode, dates: I) -> Selection {
        let mut dates = dates.into_iter();
        match mode {
            Mode::Single => Selection::Single(dates.next()),
            Mode::Range => Selection::Range(match (dates.next(), dates.next()) {
                (None, _) => RangeSelection::Empty,
                (Some(a), None) => RangeSelection::Pending(a),
                (Some(a), Some(b)) => RangeSelection::Complete(DateRange::new(a, b)),
            }),
            Mode::Multiple => Selection::Multiple(dates.collect()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Selection::Single(_) => Mode::Single,
            Selection::Range(_) => Mode::Range,
            Selection::Multiple(_) => Mode::Multiple,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(d) => d.is_none(),
            Selection::Range(r) => *r == RangeSelection::Empty,
            Selection::Multiple(set) => set.is_empty(),
        }
    }

    /// Returns `true` if `date` is one of the picked dates.  Days strictly
    /// inside a complete range are not "picked"; see [`Selection::in_range`].
    pub fn contains(&self, date: Date) -> bool {
        match self {
            Selection::Single(d) => *d == Some(date),
            Selection::Range(RangeSelection::Empty) => false,
            Selection::Range(RangeSelection::Pending(start)) => *start == date,
            Selection::Range(RangeSelection::Complete(r)) => r.start == date || r.end == date,
            Selection::Multiple(set) => set.contains(&date),
        }
    }

    /// Returns `true` if `date` lies within a complete range, endpoints
    /// included
    pub fn in_range(&self, date: Date) -> bool {
        self.range().is_some_and(|r| r.contains(date))
    }

    /// The complete range, if any
    pub fn range(&self) -> Option<DateRange> {
        match self {
            Selection::Range(RangeSelection::Complete(r)) => Some(*r),
            _ => None,
        }
    }

    /// The start of a pending or complete range
    pub fn range_start(&self) -> Option<Date> {
        match self {
            Selection::Range(RangeSelection::Pending(d)) => Some(*d),
            Selection::Range(RangeSelection::Complete(r)) => Some(r.start),
            _ => None,
        }
    }

    /// All picked dates in ascending order
    pub fn dates(&self) -> Vec<Date> {
        match self {
            Selection::Single(d) => d.iter().copied().collect(),
            Selection::Range(RangeSelection::Empty) => Vec::new(),
            Selection::Range(RangeSelection::Pending(d)) => vec![*d],
            Selection::Range(RangeSelection::Complete(r)) => vec![r.start, r.end],
            Selection::Multiple(set) => set.iter().copied().collect(),
        }
    }

    pub fn earliest(&self) -> Option<Date> {
        self.dates().first().copied()
    }

    /// Compute the state that results from clicking on `clicked`.
    ///
    /// Clicks on disabled dates leave the state unchanged.
    pub fn next(&self, clicked: Date, disabled: bool) -> Selection {
        if disabled {
            return self.clone();
        }
        match self {
            Selection::Single(_) => Selection::Single(Some(clicked)),
            Selection::Range(RangeSelection::Empty | RangeSelection::Complete(_)) => {
                Selection::Range(RangeSelection::Pending(clicked))
            }
            Selection::Range(RangeSelection::Pending(start)) => {
                Selection::Range(RangeSelection::Complete(DateRange::new(*start, clicked)))
            }
            Selection::Multiple(set) => {
                let mut set = set.clone();
                if !set.remove(&clicked) {
                    set.insert(clicked);
                }
                Selection::Multiple(set)
            }
        }
    }

    /// The value reported to the host for this state
    pub fn value(&self) -> SelectionValue {
        match self {
            Selection::Single(d) => SelectionValue::Single(*d),
            Selection::Range(_) => SelectionValue::Range(self.dates()),
            Selection::Multiple(_) => SelectionValue::Multiple(self.dates()),
        }
    }

    /// The value to report after a click produced this state, if any.
    ///
    /// Single and multiple selections report every change.  Range selections
    /// report according to `policy`.
    pub fn notification(&self, policy: RangeNotify) -> Option<SelectionValue> {
        match (self, policy) {
            (Selection::Range(r), RangeNotify::OnComplete)
                if !matches!(r, RangeSelection::Complete(_)) =>
            {
                None
            }
            _ => Some(self.value()),
        }
    }

    /// Drop every picked date for which `keep` returns `false`.  A complete
    /// range that loses one endpoint falls back to a pending range on the
    /// other.
    ///
    /// Returns `true` if anything was removed.
    pub fn retain<P: FnMut(Date) -> bool>(&mut self, mut keep: P) -> bool {
        let before = self.clone();
        match self {
            Selection::Single(d) => {
                if let Some(date) = *d {
                    if !keep(date) {
                        *d = None;
                    }
                }
            }
            Selection::Range(r) => {
                *r = match *r {
                    RangeSelection::Empty => RangeSelection::Empty,
                    RangeSelection::Pending(d) if keep(d) => RangeSelection::Pending(d),
                    RangeSelection::Pending(_) => RangeSelection::Empty,
                    RangeSelection::Complete(range) => match (keep(range.start), keep(range.end)) {
                        (true, true) => RangeSelection::Complete(range),
                        (true, false) => RangeSelection::Pending(range.start),
                        (false, true) => RangeSelection::Pending(range.end),
                        (false, false) => RangeSelection::Empty,
                    },
                };
            }
            Selection::Multiple(set) => set.retain(|&d| keep(d)),
        }
        *self != before
    }
}

impl Default for Selection {
    fn default() -> Selection {
        Selection::empty(Mode::default())
    }
}

/// Compute the selection that results from clicking `clicked` in `mode`.
///
/// If `current` was built for a different mode, the click is applied to an
/// empty selection of `mode`.
pub fn next_selection_state(
    current: &Selection,
    mode: Mode,
    clicked: Date,
    disabled: bool,
) -> Selection {
    if disabled {
        current.clone()
    } else if current.mode() == mode {
        current.next(clicked, disabled)
    } else {
        Selection::empty(mode).next(clicked, disabled)
    }
}

/// The externally visible selection, as passed to change callbacks
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SelectionValue {
    /// The selected date, or `None` if cleared
    Single(Option<Date>),
    /// Zero, one, or two dates in ascending order
    Range(Vec<Date>),
    /// The selected dates in ascending order
    Multiple(Vec<Date>),
}

impl SelectionValue {
    pub fn dates(&self) -> &[Date] {
        match self {
            SelectionValue::Single(d) => d.as_slice(),
            SelectionValue::Range(ds) | SelectionValue::Multiple(ds) => ds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dates().is_empty()
    }
}

/// When a range selection reports changes
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RangeNotify {
    /// Only once both ends have been picked
    #[default]
    OnComplete,
    /// After every accepted click, including the one picking the start
    OnEveryClick,
}

impl FromStr for RangeNotify {
    type Err = ParseRangeNotifyError;

    fn from_str(s: &str) -> Result<RangeNotify, ParseRangeNotifyError> {
        match s {
            "complete" => Ok(RangeNotify::OnComplete),
            "every" => Ok(RangeNotify::OnEveryClick),
            _ => Err(ParseRangeNotifyError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid range notification policy {0:?}; expected \"complete\" or \"every\"")]
pub struct ParseRangeNotifyError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const D1: Date = date!(2024 - 03 - 14);
    const D2: Date = date!(2024 - 03 - 05);
    const D3: Date = date!(2024 - 03 - 20);

    #[test]
    fn test_single() {
        let s = Selection::empty(Mode::Single);
        let s = s.next(D1, false);
        assert_eq!(s, Selection::Single(Some(D1)));
        let s = s.next(D2, false);
        assert_eq!(s, Selection::Single(Some(D2)));
        assert_eq!(s.value(), SelectionValue::Single(Some(D2)));
    }

    #[test]
    fn test_single_reclick_keeps_date() {
        let s = Selection::Single(Some(D1)).next(D1, false);
        assert_eq!(s, Selection::Single(Some(D1)));
    }

    #[test]
    fn test_range_sorted_regardless_of_click_order() {
        let s = Selection::empty(Mode::Range).next(D1, false);
        assert_eq!(s, Selection::Range(RangeSelection::Pending(D1)));
        let s = s.next(D2, false);
        assert_eq!(s.range(), Some(DateRange::new(D2, D1)));
        assert_eq!(s.dates(), vec![D2, D1]);
        let range = s.range().unwrap();
        assert_eq!(range.start(), D2);
        assert_eq!(range.end(), D1);
    }

    #[test]
    fn test_range_restarts_after_complete() {
        let s = Selection::from_dates(Mode::Range, [D2, D1]);
        let s = s.next(D3, false);
        assert_eq!(s, Selection::Range(RangeSelection::Pending(D3)));
    }

    #[test]
    fn test_range_same_day() {
        let s = Selection::empty(Mode::Range).next(D1, false).next(D1, false);
        assert_eq!(s.dates(), vec![D1, D1]);
        assert!(s.in_range(D1));
        assert!(!s.in_range(D3));
    }

    #[test]
    fn test_in_range() {
        let s = Selection::from_dates(Mode::Range, [D3, D2]);
        assert!(s.in_range(D1));
        assert!(s.in_range(D2));
        assert!(s.in_range(D3));
        assert!(!s.in_range(date!(2024 - 03 - 04)));
        assert!(s.contains(D2));
        assert!(!s.contains(D1));
        assert_eq!(s.range_start(), Some(D2));
    }

    #[test]
    fn test_multiple_toggle() {
        let s = Selection::from_dates(Mode::Multiple, [D1, D2]);
        let s = s.next(D1, false);
        assert_eq!(s, Selection::from_dates(Mode::Multiple, [D2]));
        let s = s.next(D3, false);
        assert_eq!(s.dates(), vec![D2, D3]);
    }

    #[test]
    fn test_disabled_click_is_noop() {
        let states = [
            Selection::empty(Mode::Single),
            Selection::Single(Some(D1)),
            Selection::empty(Mode::Range),
            Selection::from_dates(Mode::Range, [D1]),
            Selection::from_dates(Mode::Range, [D1, D2]),
            Selection::from_dates(Mode::Multiple, [D1, D3]),
        ];
        for s in states {
            for mode in [Mode::Single, Mode::Range, Mode::Multiple] {
                for d in [D1, D2, D3] {
                    assert_eq!(next_selection_state(&s, mode, d, true), s);
                }
            }
        }
    }

    #[test]
    fn test_next_selection_state_mode_switch() {
        let s = Selection::Single(Some(D1));
        assert_eq!(
            next_selection_state(&s, Mode::Multiple, D2, false),
            Selection::from_dates(Mode::Multiple, [D2])
        );
        assert_eq!(
            next_selection_state(&s, Mode::Single, D2, false),
            Selection::Single(Some(D2))
        );
    }

    #[test]
    fn test_range_notification_on_complete() {
        let s = Selection::empty(Mode::Range).next(D1, false);
        assert_eq!(s.notification(RangeNotify::OnComplete), None);
        assert_eq!(
            s.notification(RangeNotify::OnEveryClick),
            Some(SelectionValue::Range(vec![D1]))
        );
        let s = s.next(D3, false);
        assert_eq!(
            s.notification(RangeNotify::OnComplete),
            Some(SelectionValue::Range(vec![D1, D3]))
        );
    }

    #[test]
    fn test_multiple_notifies_every_change() {
        let s = Selection::empty(Mode::Multiple).next(D1, false);
        assert_eq!(
            s.notification(RangeNotify::OnComplete),
            Some(SelectionValue::Multiple(vec![D1]))
        );
        let s = s.next(D1, false);
        assert_eq!(
            s.notification(RangeNotify::OnComplete),
            Some(SelectionValue::Multiple(Vec::new()))
        );
    }

    #[test]
    fn test_retain_range_endpoint() {
        let mut s = Selection::from_dates(Mode::Range, [D2, D3]);
        assert!(s.retain(|d| d <= D1));
        assert_eq!(s, Selection::Range(RangeSelection::Pending(D2)));
        assert!(!s.retain(|d| d <= D1));
        assert!(s.retain(|_| false));
        assert!(s.is_empty());
    }

    #[test]
    fn test_retain_multiple() {
        let mut s = Selection::from_dates(Mode::Multiple, [D1, D2, D3]);
        assert!(s.retain(|d| d != D1));
        assert_eq!(s.dates(), vec![D2, D3]);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("range".parse::<Mode>(), Ok(Mode::Range));
        assert_eq!("multiple".parse::<Mode>(), Ok(Mode::Multiple));
        assert!("both".parse::<Mode>().is_err());
        assert_eq!("every".parse::<RangeNotify>(), Ok(RangeNotify::OnEveryClick));
    }
}
