/// Test utilities shared by the unit tests
///
/// Provides date shorthands, pickers anchored on a fixed month (so tests never
/// depend on today's date), and a temporary config file that is removed when
/// dropped.
///
/// ## Usage Examples
///
/// ```rust
/// use crate::infrastructure::test_utils::test_harness::*;
///
/// #[test]
/// fn my_test() {
///     let mut picker = picker_at(ymd(2024, 5, 1), Constraints::new());
///     picker.on_day_select(ymd(2024, 5, 3));
/// }
///
/// #[test]
/// fn my_config_test() {
///     with_temp_config(r#"{ "number_of_months": 3 }"#, |temp| {
///         let config = PickerConfig::load(temp.path()).unwrap();
///     });
/// }
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::application::{DatePicker, PickerConfig};
    use crate::domain::Constraints;
    use chrono::NaiveDate;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    /// Default config whose window opens on `initial`'s month
    pub fn config_at(initial: NaiveDate) -> PickerConfig {
        PickerConfig {
            initial_visible_month: Some(initial),
            ..PickerConfig::default()
        }
    }

    /// Two-month picker opening on `initial`'s month
    pub fn picker_at(initial: NaiveDate, constraints: Constraints) -> DatePicker {
        DatePicker::with_constraints(&config_at(initial), constraints)
    }

    /// A config file in its own temporary directory
    pub struct TempConfig {
        path: PathBuf,
        _temp_dir: TempDir, // Keep temp dir alive
    }

    impl TempConfig {
        pub fn new(content: &str) -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let path = temp_dir.path().join("config.json");
            std::fs::write(&path, content).expect("Failed to write test config");

            Self {
                path,
                _temp_dir: temp_dir,
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    /// Run a test with a fresh temporary config file
    pub fn with_temp_config<F, R>(content: &str, test_fn: F) -> R
    where
        F: FnOnce(&TempConfig) -> R,
    {
        let temp = TempConfig::new(content);
        test_fn(&temp)
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::application::PickerConfig;
    use crate::domain::{ActiveEndpoint, Constraints};

    #[test]
    fn test_harness_picker_is_anchored() {
        let picker = picker_at(ymd(2024, 3, 15), Constraints::new());
        let first = picker.window().first_visible().unwrap();
        assert_eq!(first.date, ymd(2024, 3, 1));
        assert_eq!(picker.window().len(), 2);
        assert_eq!(picker.active_endpoint(), ActiveEndpoint::Start);
    }

    #[test]
    fn test_harness_with_function() {
        with_temp_config(r#"{ "number_of_months": 3 }"#, |temp| {
            let config = PickerConfig::load(temp.path()).unwrap();
            assert_eq!(config.number_of_months, 3);
        });
    }

    #[test]
    fn test_harness_cleans_up() {
        let path = {
            let temp = TempConfig::new("{}");
            assert!(temp.path().exists());
            temp.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
