use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar duration such as "3 days" or "1 month 2 weeks".
///
/// Years and months are added first (clamping to the end of shorter months),
/// then weeks and days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
}

impl Period {
    pub fn days(days: u32) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    pub fn weeks(weeks: u32) -> Self {
        Self {
            weeks,
            ..Self::default()
        }
    }

    pub fn months(months: u32) -> Self {
        Self {
            months,
            ..Self::default()
        }
    }

    pub fn years(years: u32) -> Self {
        Self {
            years,
            ..Self::default()
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// The date this period after `date`, or `None` past the end of the calendar.
    pub fn checked_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let days = u64::from(self.weeks) * 7 + u64::from(self.days);

        date.checked_add_months(Months::new(months))?
            .checked_add_days(Days::new(days))
    }

    /// Number of whole days this period spans when counted from `date`.
    pub fn days_from(&self, date: NaiveDate) -> Option<i64> {
        self.checked_after(date)
            .map(|end| end.signed_duration_since(date).num_days())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0d");
        }

        for (value, unit) in [
            (self.years, 'y'),
            (self.months, 'm'),
            (self.weeks, 'w'),
            (self.days, 'd'),
        ] {
            if value > 0 {
                write!(f, "{}{}", value, unit)?;
            }
        }

        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("empty period")]
    Empty,

    #[error("missing number before unit '{0}'")]
    MissingNumber(char),

    #[error("missing unit after {0}")]
    MissingUnit(u32),

    #[error("unknown unit '{0}' (expected y, m, w or d)")]
    UnknownUnit(char),

    #[error("unit '{0}' given more than once")]
    DuplicateUnit(char),

    #[error("number too large")]
    Overflow,
}

impl FromStr for Period {
    type Err = PeriodParseError;

    /// Parses compact forms like `3d`, `2w`, `1m` or `1y2m3d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PeriodParseError::Empty);
        }

        let mut period = Period::default();
        let mut seen = Vec::with_capacity(4);
        let mut number: Option<u32> = None;

        for c in s.chars() {
            if let Some(digit) = c.to_digit(10) {
                let current = number.unwrap_or(0);
                number = Some(
                    current
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(digit))
                        .ok_or(PeriodParseError::Overflow)?,
                );
                continue;
            }

            let unit = c.to_ascii_lowercase();
            let value = number.take().ok_or(PeriodParseError::MissingNumber(c))?;
            if seen.contains(&unit) {
                return Err(PeriodParseError::DuplicateUnit(unit));
            }

            match unit {
                'y' => period.years = value,
                'm' => period.months = value,
                'w' => period.weeks = value,
                'd' => period.days = value,
                _ => return Err(PeriodParseError::UnknownUnit(c)),
            }
            seen.push(unit);
        }

        match number {
            Some(value) => Err(PeriodParseError::MissingUnit(value)),
            None => Ok(period),
        }
    }
}
