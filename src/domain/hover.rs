use crate::domain::validation::check_interval;
use crate::domain::{ActiveEndpoint, Constraints, DateRange, Interval, RejectionReason};
use crate::infrastructure::BlockedDates;
use chrono::{Days, Duration, NaiveDate};
use serde::Serialize;

/// A provisional range shown while hovering. Never committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PotentialRange {
    pub interval: Interval,
    pub error: Option<RejectionReason>,
}

impl PotentialRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.interval.contains(date)
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// The last hovered day and how it classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoveredDate {
    pub date: NaiveDate,
    pub error: Option<RejectionReason>,
}

/// Preview range between the committed endpoint and the hovered day.
///
/// Only the endpoint being armed can move: with `End` active the preview runs
/// from the committed start to a later hovered day, with `Start` active from
/// an earlier hovered day to the committed end.
pub fn compute_potential_range(
    committed: &DateRange,
    active: ActiveEndpoint,
    hovered: NaiveDate,
    constraints: &Constraints,
) -> Option<PotentialRange> {
    if active == ActiveEndpoint::None || committed.is_empty() {
        return None;
    }

    let interval = match (active, committed.start, committed.end) {
        (ActiveEndpoint::End, Some(start), _) if start < hovered => Interval::new(start, hovered),
        (ActiveEndpoint::Start, _, Some(end)) if end > hovered => Interval::new(hovered, end),
        _ => return None,
    };

    Some(PotentialRange {
        interval,
        error: check_interval(interval, constraints).err(),
    })
}

/// Classifies a single hovered day for styling its cell.
///
/// Checks run in order and the first failure wins: blocked day, min date
/// (one day of slack), max date, then the fixed range measured from either
/// committed endpoint.
pub fn classify_hover(
    date: NaiveDate,
    committed: &DateRange,
    constraints: &Constraints,
) -> Option<RejectionReason> {
    if constraints.is_blocked(date) {
        return Some(RejectionReason::BlockedDate);
    }

    if let Some(min_date) = constraints.min_date {
        let slack = min_date.checked_sub_days(Days::new(1));
        if slack.is_some_and(|earliest| date < earliest) {
            return Some(RejectionReason::LessThanMinDate);
        }
    }

    if let Some(max_date) = constraints.max_date {
        if date > max_date {
            return Some(RejectionReason::GreaterThanMaxDate);
        }
    }

    if let Some(fix_range) = constraints.fix_range {
        let beyond = |anchor: Option<NaiveDate>| {
            anchor
                .and_then(|a| fix_range.checked_after(a))
                .is_some_and(|limit| date > limit)
        };
        if beyond(committed.start) || beyond(committed.end) {
            return Some(RejectionReason::ViolatesFixRange);
        }
    }

    None
}

/// Inputs for [`is_date_hovered`].
#[derive(Debug, Clone, Copy)]
pub struct HoverHighlight<'a> {
    pub committed: &'a DateRange,
    pub hovered: Option<NaiveDate>,
    /// Minimum booking length in days; values up to 1 disable the block modes.
    pub min_days: u32,
    /// Fixed-length mode: hovering previews a whole block of `min_days`.
    pub fixed: bool,
}

/// Whether `date` should be highlighted as part of the hover trail.
pub fn is_date_hovered(
    date: NaiveDate,
    highlight: &HoverHighlight<'_>,
    blocked: &dyn BlockedDates,
) -> bool {
    let Some(hovered) = highlight.hovered else {
        return false;
    };
    let block_len = Duration::days(i64::from(highlight.min_days.saturating_sub(1)));
    let block_from = |from: NaiveDate| {
        let end = from.checked_add_signed(block_len).unwrap_or(NaiveDate::MAX);
        Interval::new(from, end)
    };
    let clear = |interval: Interval| !interval.days().any(|d| blocked.is_blocked(d));

    if highlight.fixed && highlight.min_days > 1 {
        let block = block_from(hovered);
        if block.contains(date) {
            return clear(block);
        }
    }

    let (Some(start), None) = (highlight.committed.start, highlight.committed.end) else {
        return false;
    };

    if highlight.min_days > 1 && start == hovered {
        let block = block_from(start);
        if block.contains(date) {
            return clear(block);
        }
    }

    if hovered >= start {
        let trail = Interval::new(start, hovered);
        if trail.contains(date) {
            return clear(trail);
        }
    }

    false
}
