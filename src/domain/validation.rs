use crate::domain::{DateRange, Interval, Period};
use crate::infrastructure::{BlockedDates, NoBlockedDates};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Why a date or range was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    LessThanMinDate,
    GreaterThanMaxDate,
    EndBeforeStart,
    LessThanMinRange,
    GreaterThanMaxRange,
    ContainsBlockedDate,
    BlockedDate,
    ViolatesFixRange,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectionReason::LessThanMinDate => "before the earliest selectable date",
            RejectionReason::GreaterThanMaxDate => "after the latest selectable date",
            RejectionReason::EndBeforeStart => "end date is before start date",
            RejectionReason::LessThanMinRange => "shorter than the minimum range",
            RejectionReason::GreaterThanMaxRange => "longer than the maximum range",
            RejectionReason::ContainsBlockedDate => "contains a blocked date",
            RejectionReason::BlockedDate => "date is blocked",
            RejectionReason::ViolatesFixRange => "outside the fixed range",
        };
        write!(f, "{}", text)
    }
}

/// Result of checking a candidate range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub reason: Option<RejectionReason>,
}

impl ValidationOutcome {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl From<Result<(), RejectionReason>> for ValidationOutcome {
    fn from(result: Result<(), RejectionReason>) -> Self {
        match result {
            Ok(()) => Self::accepted(),
            Err(reason) => Self::rejected(reason),
        }
    }
}

/// Read-only selection rules for one picker.
#[derive(Clone)]
pub struct Constraints {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub min_date_range: Option<Period>,
    pub max_date_range: Option<Period>,
    pub fix_range: Option<Period>,
    pub first_day_of_week: Weekday,
    blocked: Arc<dyn BlockedDates>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_date: None,
            max_date: None,
            min_date_range: None,
            max_date_range: None,
            fix_range: None,
            first_day_of_week: Weekday::Mon,
            blocked: Arc::new(NoBlockedDates),
        }
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraints")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("min_date_range", &self.min_date_range)
            .field("max_date_range", &self.max_date_range)
            .field("fix_range", &self.fix_range)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("blocked", &self.blocked.describe())
            .finish()
    }
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn with_max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn with_min_range(mut self, period: Period) -> Self {
        self.min_date_range = Some(period);
        self
    }

    pub fn with_max_range(mut self, period: Period) -> Self {
        self.max_date_range = Some(period);
        self
    }

    pub fn with_fix_range(mut self, period: Period) -> Self {
        self.fix_range = Some(period);
        self
    }

    pub fn with_first_day_of_week(mut self, weekday: Weekday) -> Self {
        self.first_day_of_week = weekday;
        self
    }

    pub fn with_blocked<B>(mut self, blocked: B) -> Self
    where
        B: BlockedDates + 'static,
    {
        self.blocked = Arc::new(blocked);
        self
    }

    pub fn blocked(&self) -> &dyn BlockedDates {
        self.blocked.as_ref()
    }

    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        self.blocked.is_blocked(date)
    }
}

/// Whether `candidate` satisfies every applicable constraint.
pub fn validate(candidate: &DateRange, constraints: &Constraints) -> bool {
    check_range(candidate, constraints).is_valid()
}

/// Runs the range checks in order and reports the first failure.
///
/// A check only applies when the endpoints it needs are present.
pub fn check_range(candidate: &DateRange, constraints: &Constraints) -> ValidationOutcome {
    run_checks(candidate, constraints).into()
}

fn run_checks(candidate: &DateRange, constraints: &Constraints) -> Result<(), RejectionReason> {
    if let (Some(min_date), Some(start)) = (constraints.min_date, candidate.start) {
        if start < min_date {
            return Err(RejectionReason::LessThanMinDate);
        }
    }

    // The matching "start on or before max_date" check is intentionally absent.

    if let (Some(max_date), Some(end)) = (constraints.max_date, candidate.end) {
        if end > max_date {
            return Err(RejectionReason::GreaterThanMaxDate);
        }
    }

    let Some(interval) = candidate.interval() else {
        return Ok(());
    };

    if interval.start > interval.end {
        return Err(RejectionReason::EndBeforeStart);
    }

    check_interval(interval, constraints)
}

/// Duration and blocked-day checks shared with the hover preview.
pub(crate) fn check_interval(
    interval: Interval,
    constraints: &Constraints,
) -> Result<(), RejectionReason> {
    if let Some(min_range) = constraints.min_date_range {
        let long_enough = min_range
            .checked_after(interval.start)
            .is_some_and(|minimum_end| interval.end >= minimum_end);
        if !long_enough {
            return Err(RejectionReason::LessThanMinRange);
        }
    }

    if let Some(max_range) = constraints.max_date_range {
        let short_enough = max_range
            .checked_after(interval.start)
            .is_none_or(|maximum_end| interval.end <= maximum_end);
        if !short_enough {
            return Err(RejectionReason::GreaterThanMaxRange);
        }
    }

    if interval.days().any(|d| constraints.is_blocked(d)) {
        return Err(RejectionReason::ContainsBlockedDate);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::BlockedDateList;
    use chrono::Duration;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_before_min_date() {
        let constraints = Constraints::new().with_min_date(ymd(2024, 1, 10));

        let outcome = check_range(&DateRange::starting(ymd(2024, 1, 9)), &constraints);
        assert!(!outcome.valid);
        assert_eq!(outcome.reason, Some(RejectionReason::LessThanMinDate));

        assert!(validate(&DateRange::starting(ymd(2024, 1, 10)), &constraints));
    }

    #[test]
    fn test_bounds_at_calendar_edges() {
        let constraints = Constraints::new()
            .with_min_date(NaiveDate::MIN)
            .with_max_date(NaiveDate::MAX);

        let earliest = DateRange::starting(NaiveDate::MIN);
        assert!(validate(&earliest, &constraints));
        let latest = DateRange::new(None, Some(NaiveDate::MAX));
        assert!(validate(&latest, &constraints));
    }

    #[test]
    fn test_end_after_max_date() {
        let constraints = Constraints::new().with_max_date(ymd(2024, 6, 30));

        let june = DateRange::between(ymd(2024, 6, 1), ymd(2024, 6, 30));
        assert!(validate(&june, &constraints));

        let past = DateRange::new(None, Some(ymd(2024, 7, 1)));
        assert_eq!(
            check_range(&past, &constraints).reason,
            Some(RejectionReason::GreaterThanMaxDate)
        );
    }

    #[test]
    fn test_start_after_max_date_is_not_checked() {
        let constraints = Constraints::new().with_max_date(ymd(2024, 6, 30));
        assert!(validate(&DateRange::starting(ymd(2024, 8, 1)), &constraints));
    }

    #[test]
    fn test_inverted_range() {
        let constraints = Constraints::new();

        let inverted = DateRange::between(ymd(2024, 3, 5), ymd(2024, 3, 4));
        let outcome = check_range(&inverted, &constraints);
        assert_eq!(outcome.reason, Some(RejectionReason::EndBeforeStart));

        let same_day = DateRange::between(ymd(2024, 3, 5), ymd(2024, 3, 5));
        assert!(validate(&same_day, &constraints));
    }

    #[test]
    fn test_min_range() {
        let constraints = Constraints::new().with_min_range(Period::days(3));

        let short = DateRange::between(ymd(2024, 2, 1), ymd(2024, 2, 3));
        assert_eq!(
            check_range(&short, &constraints).reason,
            Some(RejectionReason::LessThanMinRange)
        );

        let exact = DateRange::between(ymd(2024, 2, 1), ymd(2024, 2, 4));
        assert!(validate(&exact, &constraints));
    }

    #[test]
    fn test_max_range() {
        let constraints = Constraints::new().with_max_range(Period::weeks(1));

        let week = DateRange::between(ymd(2024, 2, 1), ymd(2024, 2, 8));
        assert!(validate(&week, &constraints));

        let longer = DateRange::between(ymd(2024, 2, 1), ymd(2024, 2, 9));
        assert_eq!(
            check_range(&longer, &constraints).reason,
            Some(RejectionReason::GreaterThanMaxRange)
        );
    }

    #[test]
    fn test_range_checks_need_both_endpoints() {
        let constraints = Constraints::new()
            .with_min_range(Period::days(3))
            .with_blocked(BlockedDateList::new([ymd(2024, 2, 1)]));
        assert!(validate(&DateRange::starting(ymd(2024, 2, 1)), &constraints));
    }

    #[test]
    fn test_blocked_day_inside_range() {
        let constraints = Constraints::new().with_blocked(BlockedDateList::new([ymd(2024, 5, 5)]));

        let spanning = DateRange::between(ymd(2024, 5, 1), ymd(2024, 5, 10));
        assert_eq!(
            check_range(&spanning, &constraints).reason,
            Some(RejectionReason::ContainsBlockedDate)
        );
        // Closed interval: a blocked endpoint counts.
        let from_blocked = DateRange::between(ymd(2024, 5, 5), ymd(2024, 5, 6));
        assert!(!validate(&from_blocked, &constraints));
        let after = DateRange::between(ymd(2024, 5, 6), ymd(2024, 5, 10));
        assert!(validate(&after, &constraints));
    }

    #[test]
    fn test_first_failure_wins() {
        let constraints = Constraints::new()
            .with_min_date(ymd(2024, 1, 10))
            .with_min_range(Period::days(30))
            .with_blocked(BlockedDateList::new([ymd(2024, 1, 5)]));

        let range = DateRange::between(ymd(2024, 1, 1), ymd(2024, 1, 6));
        assert_eq!(
            check_range(&range, &constraints).reason,
            Some(RejectionReason::LessThanMinDate)
        );
    }

    #[test]
    fn test_tightening_min_range_never_validates() {
        let start = ymd(2024, 2, 1);
        for end_offset in 0..10 {
            let range = DateRange::between(start, start + Duration::days(end_offset));
            for days in 0..10 {
                let loose = Constraints::new().with_min_range(Period::days(days));
                let strict = Constraints::new().with_min_range(Period::days(days + 1));
                if !validate(&range, &loose) {
                    assert!(!validate(&range, &strict));
                }
            }
        }
    }

    #[test]
    fn test_empty_range_is_valid() {
        let constraints = Constraints::new()
            .with_min_date(ymd(2024, 1, 1))
            .with_max_date(ymd(2024, 12, 31));
        assert!(validate(&DateRange::empty(), &constraints));
    }
}
