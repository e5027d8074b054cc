use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::Serialize;
use std::iter::FusedIterator;
use std::ops::RangeInclusive;

/// Every month grid is six full weeks.
pub const GRID_DAYS: usize = 42;
pub const DAYS_PER_WEEK: u32 = 7;

/// A single cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    /// The cell belongs to the previous or next month.
    pub is_padding: bool,
    pub is_disabled: bool,
}

/// A calendar month as shown by the picker.
///
/// The day grid is not stored; [`Month::days`] recomputes it on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Month {
    pub year: i32,
    /// Zero-based month index (January is 0).
    pub index: u32,
    /// First day of the month.
    pub date: NaiveDate,
    pub is_disabled: bool,
    #[serde(skip)]
    first_day_of_week: Weekday,
}

impl Month {
    /// The month with zero-based `index` in `year`, or `None` if `index > 11`
    /// or the year is outside the supported calendar.
    pub fn new(year: i32, index: u32, first_day_of_week: Weekday) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, index.checked_add(1)?, 1)?;
        let date = checked_shift_months(date, 0)?;
        Some(Self {
            year,
            index,
            date,
            is_disabled: false,
            first_day_of_week,
        })
    }

    /// The month containing `date`.
    ///
    /// Dates in the first or last month chrono can represent map to the
    /// nearest month whose whole grid fits.
    pub fn containing(date: NaiveDate, first_day_of_week: Weekday) -> Self {
        let date = shift_months(date, 0);
        Self {
            year: date.year(),
            index: date.month0(),
            date,
            is_disabled: false,
            first_day_of_week,
        }
    }

    /// The month `offset` months away from this one, stopping at the edge of
    /// the supported calendar.
    pub fn offset(&self, offset: i64) -> Self {
        Self::containing(shift_months(self.date, offset), self.first_day_of_week)
    }

    /// The month `offset` months away, or `None` past the supported calendar.
    pub fn checked_offset(&self, offset: i64) -> Option<Self> {
        let date = checked_shift_months(self.date, offset)?;
        Some(Self::containing(date, self.first_day_of_week))
    }

    /// Offsets [`Month::checked_offset`] accepts from this month.
    pub fn reach(&self) -> RangeInclusive<i64> {
        let (lowest, highest) = supported_months();
        let here = month_ordinal(self.date);
        (lowest - here)..=(highest - here)
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.index
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.date)
    }

    /// The 42-cell day grid, generated lazily from scratch on each call.
    pub fn days(&self) -> MonthDays {
        MonthDays::new(self.date, self.first_day_of_week)
    }
}

/// Lazy iterator over the 42 cells of a month grid.
#[derive(Debug, Clone)]
pub struct MonthDays {
    grid_start: NaiveDate,
    left_padding: u32,
    days_in_month: u32,
    next: u32,
}

impl MonthDays {
    fn new(first: NaiveDate, first_day_of_week: Weekday) -> Self {
        let left_padding = left_padding(first.weekday(), first_day_of_week);
        Self {
            grid_start: first - Duration::days(i64::from(left_padding)),
            left_padding,
            days_in_month: days_in_month(first),
            next: 0,
        }
    }

    /// Number of leading cells taken from the previous month.
    pub fn left_padding(&self) -> u32 {
        self.left_padding
    }
}

impl Iterator for MonthDays {
    type Item = Day;

    fn next(&mut self) -> Option<Day> {
        if self.next as usize >= GRID_DAYS {
            return None;
        }

        let index = self.next;
        self.next += 1;

        Some(Day {
            date: self.grid_start + Duration::days(i64::from(index)),
            is_padding: index < self.left_padding
                || index > self.left_padding + self.days_in_month - 1,
            is_disabled: false,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = GRID_DAYS - self.next as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthDays {}
impl FusedIterator for MonthDays {}

/// Leading cells needed so the grid opens on `first_day_of_week`.
///
/// A month that already starts on `first_day_of_week` gets a full leading
/// week, so part of the previous month is always on screen.
fn left_padding(month_start: Weekday, first_day_of_week: Weekday) -> u32 {
    let start = month_start.num_days_from_sunday();
    let first = first_day_of_week.num_days_from_sunday();

    match (start + DAYS_PER_WEEK - first) % DAYS_PER_WEEK {
        0 => DAYS_PER_WEEK,
        padding => padding,
    }
}

/// Generate the day grid for the zero-based `month_index` of `year`.
///
/// Indices past December roll into following years.
pub fn generate_month_grid(month_index: u32, year: i32, first_day_of_week: Weekday) -> Vec<Day> {
    let first = shift_months(first_of_year(year), i64::from(month_index));
    MonthDays::new(first, first_day_of_week).collect()
}

/// The twelve months of `year`.
pub fn year_months(year: i32, first_day_of_week: Weekday) -> Vec<Month> {
    let january = Month::containing(first_of_year(year), first_day_of_week);
    (0..12).map(|i| january.offset(i)).collect()
}

/// Column headers for a grid opening on `first_day_of_week`.
///
/// `custom` overrides the default two-letter English labels.
pub fn weekday_labels(
    first_day_of_week: Weekday,
    custom: Option<&dyn Fn(Weekday) -> String>,
) -> Vec<String> {
    let mut weekday = first_day_of_week;
    let mut labels = Vec::with_capacity(DAYS_PER_WEEK as usize);

    for _ in 0..DAYS_PER_WEEK {
        labels.push(match custom {
            Some(label) => label(weekday),
            None => short_label(weekday).to_string(),
        });
        weekday = weekday.succ();
    }

    labels
}

fn short_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

/// Weekday from a Sunday-based index (0 = Sunday .. 6 = Saturday).
pub fn weekday_from_sunday(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .map_or(31, |next| (next - first).num_days() as u32)
}

/// The first of the month `months` months away from `date`'s month.
///
/// Results are clamped to the months whose full 42-day grid chrono can
/// represent, so paging stops at the ends of the calendar.
pub fn shift_months(date: NaiveDate, months: i64) -> NaiveDate {
    let (lowest, highest) = supported_months();
    let ordinal = month_ordinal(date)
        .saturating_add(months)
        .clamp(lowest, highest);
    from_month_ordinal(ordinal)
}

/// Like [`shift_months`] but `None` instead of clamping.
pub fn checked_shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let (lowest, highest) = supported_months();
    let ordinal = month_ordinal(date).checked_add(months)?;
    (lowest..=highest)
        .contains(&ordinal)
        .then(|| from_month_ordinal(ordinal))
}

fn month_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn from_month_ordinal(ordinal: i64) -> NaiveDate {
    let year = i32::try_from(ordinal.div_euclid(12)).unwrap_or(i32::MAX);
    let month = ordinal.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Ordinals of the first and last month whose grid spills over into
/// neighbours that chrono can still represent.
fn supported_months() -> (i64, i64) {
    (
        month_ordinal(NaiveDate::MIN) + 1,
        month_ordinal(NaiveDate::MAX) - 1,
    )
}

fn first_of_year(year: i32) -> NaiveDate {
    let year = year.clamp(NaiveDate::MIN.year(), NaiveDate::MAX.year());
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}
