use crate::domain::{Constraints, Period, WindowPadding, weekday_from_sunday};
use crate::infrastructure::{AnyBlocked, BlockedDateList, BlockedWeekdays};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "RANGEPICK_CONFIG";
pub const MONTHS_ENV: &str = "RANGEPICK_MONTHS";
pub const FIRST_DAY_ENV: &str = "RANGEPICK_FIRST_DAY";

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Everything needed to set up a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub number_of_months: usize,
    pub first_day_of_week: Weekday,
    /// Month shown first when `start_date` is unset; today when both are.
    pub initial_visible_month: Option<NaiveDate>,
    /// Opens the first window on this month and focuses the day.
    pub start_date: Option<NaiveDate>,
    /// Month of the first window's last slot; needs `start_date`.
    pub end_date: Option<NaiveDate>,
    pub padding: Option<WindowPadding>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub min_date_range: Option<Period>,
    pub max_date_range: Option<Period>,
    pub fix_range: Option<Period>,
    pub unavailable_dates: Vec<NaiveDate>,
    pub unavailable_weekdays: Vec<Weekday>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            number_of_months: 2,
            first_day_of_week: Weekday::Mon,
            initial_visible_month: None,
            start_date: None,
            end_date: None,
            padding: None,
            min_date: None,
            max_date: None,
            min_date_range: None,
            max_date_range: None,
            fix_range: None,
            unavailable_dates: Vec::new(),
            unavailable_weekdays: Vec::new(),
        }
    }
}

impl PickerConfig {
    /// Defaults, then the config file if one exists, then environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());

        let mut config = if path.exists() {
            Self::load(&path)?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rangepick")
            .join("config.json")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loaded config from {}", path.display());
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `RANGEPICK_MONTHS` and `RANGEPICK_FIRST_DAY` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(months) = lookup(MONTHS_ENV) {
            self.number_of_months =
                months
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "number_of_months",
                        reason: format!("'{}' is not a number", months),
                    })?;
        }

        if let Some(first_day) = lookup(FIRST_DAY_ENV) {
            self.first_day_of_week =
                parse_weekday(&first_day).ok_or_else(|| ConfigError::InvalidValue {
                    field: "first_day_of_week",
                    reason: format!("'{}' is not a weekday", first_day),
                })?;
        }

        Ok(())
    }

    /// Rejects settings the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_months == 0 {
            return Err(ConfigError::InvalidValue {
                field: "number_of_months",
                reason: "must be at least 1".to_string(),
            });
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ConfigError::InvalidValue {
                    field: "end_date",
                    reason: format!("{} is before start_date {}", end, start),
                });
            }
        }

        if let (Some(min), Some(max)) = (self.min_date, self.max_date) {
            if min > max {
                return Err(ConfigError::InvalidValue {
                    field: "min_date",
                    reason: format!("{} is after max_date {}", min, max),
                });
            }
        }

        Ok(())
    }

    /// The engine's view of these settings.
    pub fn constraints(&self) -> Constraints {
        let mut constraints = Constraints::new().with_first_day_of_week(self.first_day_of_week);
        constraints.min_date = self.min_date;
        constraints.max_date = self.max_date;
        constraints.min_date_range = self.min_date_range;
        constraints.max_date_range = self.max_date_range;
        constraints.fix_range = self.fix_range;

        let mut blocked = AnyBlocked::new();
        if !self.unavailable_dates.is_empty() {
            blocked = blocked.with(BlockedDateList::new(self.unavailable_dates.iter().copied()));
        }
        if !self.unavailable_weekdays.is_empty() {
            blocked = blocked.with(BlockedWeekdays::new(
                self.unavailable_weekdays.iter().copied(),
            ));
        }

        if blocked.is_empty() {
            constraints
        } else {
            constraints.with_blocked(blocked)
        }
    }
}

/// Accepts `0`..`6` (0 = Sunday) or a weekday name such as `mon` or `Sunday`.
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    let value = value.trim();
    match value.parse::<u8>() {
        Ok(index) => weekday_from_sunday(index),
        Err(_) => value.parse::<Weekday>().ok(),
    }
}
