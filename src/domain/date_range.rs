use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which endpoint the next selection sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveEndpoint {
    #[default]
    Start,
    End,
    /// A range was just completed; the next click starts a fresh one.
    None,
}

impl fmt::Display for ActiveEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActiveEndpoint::Start => "start",
            ActiveEndpoint::End => "end",
            ActiveEndpoint::None => "none",
        };
        write!(f, "{}", name)
    }
}

/// A possibly half-open selection. Either endpoint may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn with_start(self, start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            ..self
        }
    }

    pub fn with_end(self, end: NaiveDate) -> Self {
        Self {
            end: Some(end),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Both endpoints as a closed interval, if both are set.
    pub fn interval(&self) -> Option<Interval> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(Interval { start, end }),
            _ => None,
        }
    }

    /// Whether `date` lies inside the complete range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.interval().is_some_and(|i| i.contains(date))
    }

    pub fn is_start(&self, date: NaiveDate) -> bool {
        self.start == Some(date)
    }

    pub fn is_end(&self, date: NaiveDate) -> bool {
        self.end == Some(date)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |d: Option<NaiveDate>| d.map_or_else(|| "…".to_string(), |d| d.to_string());
        write!(f, "{} → {}", show(self.start), show(self.end))
    }
}

/// A closed interval of days with both endpoints present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Interval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day from `start` through `end`; empty when `end < start`.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        let end = self.end;
        start.iter_days().take_while(move |d| *d <= end)
    }
}

impl From<Interval> for DateRange {
    fn from(interval: Interval) -> Self {
        DateRange::between(interval.start, interval.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_contains_requires_both_endpoints() {
        let half = DateRange::starting(ymd(2024, 5, 1));
        assert!(!half.contains(ymd(2024, 5, 1)));

        let full = half.with_end(ymd(2024, 5, 3));
        assert!(full.contains(ymd(2024, 5, 1)));
        assert!(full.contains(ymd(2024, 5, 3)));
        assert!(!full.contains(ymd(2024, 5, 4)));
    }

    #[test]
    fn test_interval_days_is_closed() {
        let interval = Interval::new(ymd(2024, 2, 27), ymd(2024, 3, 1));
        let days: Vec<NaiveDate> = interval.days().collect();
        assert_eq!(
            days,
            vec![
                ymd(2024, 2, 27),
                ymd(2024, 2, 28),
                ymd(2024, 2, 29),
                ymd(2024, 3, 1),
            ]
        );

        let inverted = Interval::new(ymd(2024, 3, 2), ymd(2024, 3, 1));
        assert_eq!(inverted.days().count(), 0);
    }

    #[test]
    fn test_builders_keep_other_endpoint() {
        let original = DateRange::between(ymd(2024, 1, 1), ymd(2024, 1, 9));
        let range = original.with_start(ymd(2024, 1, 5));
        assert_eq!(range.start, Some(ymd(2024, 1, 5)));
        assert_eq!(range.end, Some(ymd(2024, 1, 9)));
        assert!(range.is_start(ymd(2024, 1, 5)));
        assert!(range.is_end(ymd(2024, 1, 9)));
        assert!(DateRange::empty().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DateRange::starting(ymd(2024, 1, 5)).to_string(),
            "2024-01-05 → …"
        );
        assert_eq!(ActiveEndpoint::None.to_string(), "none");
    }
}
