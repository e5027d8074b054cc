use crate::domain::{ActiveEndpoint, DateRange};
use anyhow::Result;
use chrono::NaiveDate;

/// Context provided to hooks after a range is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatesChange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Endpoint armed after the commit
    pub active_endpoint: ActiveEndpoint,
}

impl DatesChange {
    pub fn new(range: DateRange, active_endpoint: ActiveEndpoint) -> Self {
        Self {
            start: range.start,
            end: range.end,
            active_endpoint,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

/// Trait for plugins that respond to committed date changes
pub trait DatesChangeHook: Send + Sync {
    /// Called after a candidate range passed validation and was committed
    fn on_dates_changed(&self, change: &DatesChange) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing date change hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn DatesChangeHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: DatesChangeHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Execute all registered hooks for a committed change
    pub fn execute_hooks(&self, change: &DatesChange) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_dates_changed(change) {
                // A failing hook never undoes the commit
                log::warn!("Hook '{}' failed: {:#}", hook.name(), e);
            }
        }
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.list_hooks()).finish()
    }
}
