use crate::infrastructure::{DatesChange, DatesChangeHook};
use anyhow::{Result, anyhow};
use std::sync::{Arc, Mutex};

/// Plugin that keeps every committed change in shared memory.
///
/// Clones share the same buffer, so a caller can register one clone and read
/// the changes back from another.
#[derive(Debug, Clone, Default)]
pub struct RecordingHook {
    changes: Arc<Mutex<Vec<DatesChange>>>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> Vec<DatesChange> {
        self.changes
            .lock()
            .map(|changes| changes.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<DatesChange> {
        self.changes
            .lock()
            .ok()
            .and_then(|changes| changes.last().copied())
    }

    pub fn clear(&self) {
        if let Ok(mut changes) = self.changes.lock() {
            changes.clear();
        }
    }
}

impl DatesChangeHook for RecordingHook {
    fn on_dates_changed(&self, change: &DatesChange) -> Result<()> {
        self.changes
            .lock()
            .map_err(|_| anyhow!("change buffer poisoned"))?
            .push(*change);
        Ok(())
    }

    fn name(&self) -> &str {
        "Recorder"
    }
}
