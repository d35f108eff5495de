//! Deciding which dates may be selected
use std::collections::BTreeSet;
use time::{Date, Weekday};

/// A caller-supplied rule marking individual dates as unavailable
pub trait DateFilter {
    fn is_excluded(&self, date: Date) -> bool;
}

impl<F: Fn(Date) -> bool> DateFilter for F {
    fn is_excluded(&self, date: Date) -> bool {
        self(date)
    }
}

/// A filter that excludes nothing
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoExclusions;

impl DateFilter for NoExclusions {
    fn is_excluded(&self, _date: Date) -> bool {
        false
    }
}

/// Excludes a fixed set of calendar days
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExcludedDates(BTreeSet<Date>);

impl ExcludedDates {
    pub fn new() -> ExcludedDates {
        ExcludedDates::default()
    }

    pub fn insert(&mut self, date: Date) -> bool {
        self.0.insert(date)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Date> for ExcludedDates {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> ExcludedDates {
        ExcludedDates(iter.into_iter().collect())
    }
}

impl DateFilter for ExcludedDates {
    fn is_excluded(&self, date: Date) -> bool {
        self.0.contains(&date)
    }
}

/// Excludes Saturdays and Sundays
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Weekends;

impl DateFilter for Weekends {
    fn is_excluded(&self, date: Date) -> bool {
        matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
    }
}

/// Excludes a date if either of two filters does
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AnyOf<A, B>(pub A, pub B);

impl<A: DateFilter, B: DateFilter> DateFilter for AnyOf<A, B> {
    fn is_excluded(&self, date: Date) -> bool {
        self.0.is_excluded(date) || self.1.is_excluded(date)
    }
}

/// Inclusive minimum and maximum selectable dates plus an extra exclusion
/// rule.
///
/// Dates carry no time of day, so the start of the minimum day and the end
/// of the maximum day are simply the days themselves.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DateBounds<F = NoExclusions> {
    min: Option<Date>,
    max: Option<Date>,
    filter: F,
}

impl DateBounds {
    pub fn new() -> DateBounds {
        DateBounds::default()
    }
}

impl<F> DateBounds<F> {
    pub fn min(mut self, date: Date) -> Self {
        self.min = Some(date);
        self
    }

    pub fn max(mut self, date: Date) -> Self {
        self.max = Some(date);
        self
    }

    pub fn filter<G>(self, filter: G) -> DateBounds<G> {
        DateBounds {
            min: self.min,
            max: self.max,
            filter,
        }
    }

    pub fn min_date(&self) -> Option<Date> {
        self.min
    }

    pub fn max_date(&self) -> Option<Date> {
        self.max
    }

    pub fn set_min(&mut self, date: Option<Date>) {
        self.min = date;
    }

    pub fn set_max(&mut self, date: Option<Date>) {
        self.max = date;
    }
}

impl<F: DateFilter> DateBounds<F> {
    pub fn is_disabled(&self, date: Date) -> bool {
        if self.min.is_some_and(|min| date < min) {
            return true;
        }
        if self.max.is_some_and(|max| date > max) {
            return true;
        }
        self.filter.is_excluded(date)
    }
}

/// Returns `true` if `date` may not be selected under `bounds`
pub fn is_disabled<F: DateFilter>(date: Date, bounds: &DateBounds<F>) -> bool {
    bounds.is_disabled(date)
}
