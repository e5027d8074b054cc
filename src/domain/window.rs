use crate::domain::Month;
use chrono::{Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Overscan months kept on each side of the visible months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowPadding {
    pub left: u32,
    pub right: u32,
}

impl WindowPadding {
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}

/// One slot of a picker window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PickerMonth {
    pub month: Month,
    /// Overscan month outside the requested count.
    pub is_padding: bool,
}

impl PickerMonth {
    pub fn visible(month: Month) -> Self {
        Self {
            month,
            is_padding: false,
        }
    }

    pub fn padding(month: Month) -> Self {
        Self {
            month,
            is_padding: true,
        }
    }
}

/// The ordered months a picker currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerWindow {
    months: Vec<PickerMonth>,
    padding: Option<WindowPadding>,
}

impl PickerWindow {
    /// Wraps `months` (which must not carry padding entries) and pads them.
    fn padded(months: Vec<PickerMonth>, padding: Option<WindowPadding>) -> Self {
        let months = match padding {
            Some(padding) => pad_window(months, padding),
            None => months,
        };
        Self { months, padding }
    }

    pub fn months(&self) -> &[PickerMonth] {
        &self.months
    }

    /// Months that are not overscan padding, in order.
    pub fn visible_months(&self) -> impl Iterator<Item = &Month> + '_ {
        self.months
            .iter()
            .filter(|entry| !entry.is_padding)
            .map(|entry| &entry.month)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn padding(&self) -> Option<WindowPadding> {
        self.padding
    }

    pub fn first_visible(&self) -> Option<&Month> {
        self.visible_months().next()
    }

    pub fn last_visible(&self) -> Option<&Month> {
        self.visible_months().last()
    }

    /// Whether `date`'s month is one of the visible months.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.visible_months().any(|month| month.contains(date))
    }

    pub fn moved_by(&self, vector: i32, first_day_of_week: Weekday) -> Self {
        move_window_by(self, vector, first_day_of_week)
    }

    pub fn checked_moved_by(&self, vector: i32, first_day_of_week: Weekday) -> Option<Self> {
        checked_move_window_by(self, vector, first_day_of_week)
    }
}

/// Builds a window of `number_of_months` months starting at `start`'s month.
///
/// `start` defaults to today. When `end` is given the last slot shows `end`'s
/// month while the earlier slots keep stepping one month at a time from
/// `start`, so a distant `end` leaves a gap before the last slot.
pub fn build_window(
    number_of_months: usize,
    first_day_of_week: Weekday,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    padding: Option<WindowPadding>,
) -> PickerWindow {
    let start = start.unwrap_or_else(|| Local::now().date_naive());
    let first = Month::containing(start, first_day_of_week);

    let months = (0..number_of_months)
        .map(|i| match end {
            Some(end) if i + 1 == number_of_months => Month::containing(end, first_day_of_week),
            _ => first.offset(i as i64),
        })
        .map(PickerMonth::visible)
        .collect();

    PickerWindow::padded(months, padding)
}

/// Pages the window by `vector` months (negative pages backwards).
///
/// Months scrolled out are dropped from the leading edge, new ones are stepped
/// from the trailing visible month, and padding is regenerated around the new
/// edges. The visible month count never changes. Paging stops at the ends of
/// the supported calendar.
pub fn move_window_by(
    window: &PickerWindow,
    vector: i32,
    first_day_of_week: Weekday,
) -> PickerWindow {
    let wanted = i64::from(vector);
    let vector = reachable_vector(window, wanted);
    if vector != wanted {
        log::debug!("window move of {} months stopped at {}", wanted, vector);
    }

    shift_window(window, vector, first_day_of_week)
}

/// Like [`move_window_by`] but `None` when the move would leave the
/// supported calendar.
pub fn checked_move_window_by(
    window: &PickerWindow,
    vector: i32,
    first_day_of_week: Weekday,
) -> Option<PickerWindow> {
    let vector = i64::from(vector);
    if reachable_vector(window, vector) != vector {
        return None;
    }

    Some(shift_window(window, vector, first_day_of_week))
}

fn reachable_vector(window: &PickerWindow, vector: i64) -> i64 {
    match (window.first_visible(), window.last_visible()) {
        (Some(first), Some(last)) => vector.clamp(*first.reach().start(), *last.reach().end()),
        _ => vector,
    }
}

fn shift_window(window: &PickerWindow, vector: i64, first_day_of_week: Weekday) -> PickerWindow {
    let visible: Vec<Month> = window
        .visible_months()
        .map(|m| Month::containing(m.date, first_day_of_week))
        .collect();

    if vector == 0 || visible.is_empty() {
        return window.clone();
    }

    let len = visible.len();
    let steps = vector.unsigned_abs();
    let fresh = steps.min(len as u64) as usize;
    // Months paged over entirely when the jump is longer than the window.
    let skipped = (steps - fresh as u64) as i64;

    let months: Vec<Month> = if vector > 0 {
        let reference = visible[len - 1];
        visible[fresh..]
            .iter()
            .copied()
            .chain((1..=fresh as i64).map(|i| reference.offset(skipped + i)))
            .collect()
    } else {
        let reference = visible[0];
        (1..=fresh as i64)
            .rev()
            .map(|i| reference.offset(-(skipped + i)))
            .chain(visible[..len - fresh].iter().copied())
            .collect()
    };

    log::debug!(
        "moved window by {} months: {} .. {}",
        vector,
        months[0].date,
        months[len - 1].date
    );

    PickerWindow::padded(
        months.into_iter().map(PickerMonth::visible).collect(),
        window.padding,
    )
}

/// Surrounds `months` with `padding.left` earlier and `padding.right` later
/// overscan months.
pub fn pad_window(months: Vec<PickerMonth>, padding: WindowPadding) -> Vec<PickerMonth> {
    let (Some(first), Some(last)) = (months.first().copied(), months.last().copied()) else {
        return months;
    };

    let mut padded = Vec::with_capacity(months.len() + (padding.left + padding.right) as usize);
    padded.extend(
        (1..=i64::from(padding.left))
            .rev()
            .map(|i| PickerMonth::padding(first.month.offset(-i))),
    );
    padded.extend(months);
    padded.extend(
        (1..=i64::from(padding.right)).map(|i| PickerMonth::padding(last.month.offset(i))),
    );

    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn labels(window: &PickerWindow) -> Vec<(i32, u32, bool)> {
        window
            .months()
            .iter()
            .map(|e| (e.month.year, e.month.index + 1, e.is_padding))
            .collect()
    }

    #[test]
    fn test_build_consecutive_months() {
        let window = build_window(3, Weekday::Mon, Some(ymd(2024, 1, 17)), None, None);
        assert_eq!(
            labels(&window),
            vec![(2024, 1, false), (2024, 2, false), (2024, 3, false)]
        );
        assert_eq!(window.months()[0].month.date, ymd(2024, 1, 1));
    }

    #[test]
    fn test_build_defaults_to_today() {
        let today = Local::now().date_naive();
        let window = build_window(1, Weekday::Mon, None, None, None);
        assert!(window.contains_date(today));
    }

    #[test]
    fn test_explicit_end_anchors_last_slot() {
        let window = build_window(
            3,
            Weekday::Mon,
            Some(ymd(2024, 1, 5)),
            Some(ymd(2024, 12, 24)),
            None,
        );
        assert_eq!(
            labels(&window),
            vec![(2024, 1, false), (2024, 2, false), (2024, 12, false)]
        );

        let single = build_window(
            1,
            Weekday::Mon,
            Some(ymd(2024, 1, 5)),
            Some(ymd(2024, 4, 1)),
            None,
        );
        assert_eq!(labels(&single), vec![(2024, 4, false)]);
    }

    #[test]
    fn test_move_forward_one() {
        let window = build_window(3, Weekday::Mon, Some(ymd(2024, 1, 1)), None, None);
        let moved = move_window_by(&window, 1, Weekday::Mon);
        assert_eq!(
            labels(&moved),
            vec![(2024, 2, false), (2024, 3, false), (2024, 4, false)]
        );
    }

    #[test]
    fn test_move_backward_across_year() {
        let window = build_window(2, Weekday::Mon, Some(ymd(2024, 1, 1)), None, None);
        let moved = move_window_by(&window, -2, Weekday::Mon);
        assert_eq!(labels(&moved), vec![(2023, 11, false), (2023, 12, false)]);
    }

    #[test]
    fn test_move_zero_is_identity() {
        let window = build_window(2, Weekday::Mon, Some(ymd(2024, 1, 1)), None, None);
        assert_eq!(move_window_by(&window, 0, Weekday::Mon), window);
    }

    #[test]
    fn test_move_further_than_window() {
        let window = build_window(3, Weekday::Mon, Some(ymd(2024, 1, 1)), None, None);
        let moved = window.moved_by(5, Weekday::Mon);
        assert_eq!(
            labels(&moved),
            vec![(2024, 6, false), (2024, 7, false), (2024, 8, false)]
        );

        let back = window.moved_by(-7, Weekday::Mon);
        assert_eq!(
            labels(&back),
            vec![(2023, 6, false), (2023, 7, false), (2023, 8, false)]
        );
    }

    #[test]
    fn test_huge_moves_stop_at_calendar_edge() {
        let window = build_window(2, Weekday::Mon, Some(ymd(2024, 1, 1)), None, None);

        let forward = move_window_by(&window, i32::MAX, Weekday::Mon);
        let dates: Vec<NaiveDate> = forward.visible_months().map(|m| m.date).collect();
        let last_year = NaiveDate::MAX.year();
        assert_eq!(dates, vec![ymd(last_year, 10, 1), ymd(last_year, 11, 1)]);
        assert_eq!(forward.moved_by(1, Weekday::Mon), forward);

        let backward = window.moved_by(i32::MIN, Weekday::Mon);
        let first = backward.first_visible().unwrap();
        assert_eq!(first.date, ymd(NaiveDate::MIN.year(), 2, 1));
        assert_eq!(backward.len(), 2);
    }

    #[test]
    fn test_checked_move() {
        let window = build_window(2, Weekday::Mon, Some(ymd(2024, 1, 1)), None, None);
        assert_eq!(
            window.checked_moved_by(3, Weekday::Mon),
            Some(window.moved_by(3, Weekday::Mon))
        );
        assert!(window.checked_moved_by(i32::MAX, Weekday::Mon).is_none());
        assert!(checked_move_window_by(&window, 4_000_000, Weekday::Mon).is_none());
    }

    #[test]
    fn test_move_keeps_gap_from_explicit_end() {
        let window = build_window(
            3,
            Weekday::Mon,
            Some(ymd(2024, 1, 1)),
            Some(ymd(2024, 12, 1)),
            None,
        );
        let moved = window.moved_by(1, Weekday::Mon);
        assert_eq!(
            labels(&moved),
            vec![(2024, 2, false), (2024, 12, false), (2025, 1, false)]
        );
    }

    #[test]
    fn test_move_preserves_length() {
        let window = build_window(
            4,
            Weekday::Sun,
            Some(ymd(2024, 6, 1)),
            None,
            Some(WindowPadding::new(1, 2)),
        );
        for vector in -30..=30 {
            let moved = window.moved_by(vector, Weekday::Sun);
            assert_eq!(moved.len(), window.len());
            assert_eq!(moved.visible_months().count(), 4);
        }
    }

    #[test]
    fn test_padding_surrounds_visible_months() {
        let window = build_window(
            2,
            Weekday::Mon,
            Some(ymd(2024, 1, 1)),
            None,
            Some(WindowPadding::new(1, 1)),
        );
        assert_eq!(
            labels(&window),
            vec![
                (2023, 12, true),
                (2024, 1, false),
                (2024, 2, false),
                (2024, 3, true),
            ]
        );
        assert!(!window.contains_date(ymd(2023, 12, 15)));
        assert!(window.contains_date(ymd(2024, 2, 29)));

        let moved = window.moved_by(1, Weekday::Mon);
        assert_eq!(
            labels(&moved),
            vec![
                (2024, 1, true),
                (2024, 2, false),
                (2024, 3, false),
                (2024, 4, true),
            ]
        );
        assert_eq!(moved.padding(), Some(WindowPadding::new(1, 1)));
    }

    #[test]
    fn test_pad_window_multiple_months() {
        let core = vec![PickerMonth::visible(Month::containing(ymd(2024, 5, 1), Weekday::Mon))];
        let padded = pad_window(core, WindowPadding::new(2, 3));
        let months: Vec<u32> = padded.iter().map(|e| e.month.date.month()).collect();
        assert_eq!(months, vec![3, 4, 5, 6, 7, 8]);
        assert_eq!(padded.iter().filter(|e| e.is_padding).count(), 5);

        assert!(pad_window(Vec::new(), WindowPadding::new(1, 1)).is_empty());
    }

    #[test]
    fn test_no_duplicate_months_in_stepped_window() {
        let window = build_window(12, Weekday::Mon, Some(ymd(2024, 3, 3)), None, None);
        let mut keys: Vec<(i32, u32)> = window
            .months()
            .iter()
            .map(|e| (e.month.year, e.month.index))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 12);
    }

    #[test]
    fn test_empty_window() {
        let window = build_window(0, Weekday::Mon, Some(ymd(2024, 1, 1)), None, None);
        assert!(window.is_empty());
        assert!(window.moved_by(3, Weekday::Mon).is_empty());
        assert!(window.first_visible().is_none());
    }
}
