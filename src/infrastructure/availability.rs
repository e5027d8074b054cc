use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;
use std::fmt;

/// Decides whether a day can be part of a selection.
pub trait BlockedDates: Send + Sync {
    fn is_blocked(&self, date: NaiveDate) -> bool;

    /// Human-readable description for logs
    fn describe(&self) -> String {
        "custom blocked dates".to_string()
    }
}

/// Nothing is blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBlockedDates;

impl BlockedDates for NoBlockedDates {
    fn is_blocked(&self, _date: NaiveDate) -> bool {
        false
    }

    fn describe(&self) -> String {
        "no blocked dates".to_string()
    }
}

/// An explicit list of unavailable days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedDateList {
    dates: HashSet<NaiveDate>,
}

impl BlockedDateList {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for BlockedDateList {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl BlockedDates for BlockedDateList {
    fn is_blocked(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    fn describe(&self) -> String {
        format!("{} blocked dates", self.dates.len())
    }
}

/// Blocks every occurrence of the given weekdays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedWeekdays {
    weekdays: Vec<Weekday>,
}

impl BlockedWeekdays {
    pub fn new(weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        let mut unique = Vec::new();
        for weekday in weekdays {
            if !unique.contains(&weekday) {
                unique.push(weekday);
            }
        }
        Self { weekdays: unique }
    }

    pub fn weekends() -> Self {
        Self::new([Weekday::Sat, Weekday::Sun])
    }
}

impl BlockedDates for BlockedWeekdays {
    fn is_blocked(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(&date.weekday())
    }

    fn describe(&self) -> String {
        let names: Vec<String> = self.weekdays.iter().map(|w| w.to_string()).collect();
        format!("blocked weekdays: {}", names.join(", "))
    }
}

/// Adapts a predicate closure.
pub struct BlockedWhen<F>(pub F);

impl<F> BlockedDates for BlockedWhen<F>
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_blocked(&self, date: NaiveDate) -> bool {
        (self.0)(date)
    }
}

impl<F> fmt::Debug for BlockedWhen<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BlockedWhen(..)")
    }
}

/// A day is blocked when any of the sources blocks it.
#[derive(Default)]
pub struct AnyBlocked {
    sources: Vec<Box<dyn BlockedDates>>,
}

impl AnyBlocked {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn with<B>(mut self, source: B) -> Self
    where
        B: BlockedDates + 'static,
    {
        self.sources.push(Box::new(source));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl BlockedDates for AnyBlocked {
    fn is_blocked(&self, date: NaiveDate) -> bool {
        self.sources.iter().any(|s| s.is_blocked(date))
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.sources.iter().map(|s| s.describe()).collect();
        if parts.is_empty() {
            "no blocked dates".to_string()
        } else {
            parts.join("; ")
        }
    }
}

impl fmt::Debug for AnyBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyBlocked")
            .field("sources", &self.describe())
            .finish()
    }
}
