use crate::infrastructure::{DatesChange, DatesChangeHook};
use anyhow::Result;

/// Plugin that logs every committed range through the `log` facade
pub struct LogHook;

impl DatesChangeHook for LogHook {
    fn on_dates_changed(&self, change: &DatesChange) -> Result<()> {
        log::info!(
            "Dates changed to {} (next endpoint: {})",
            change.range(),
            change.active_endpoint
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "Log"
    }
}
