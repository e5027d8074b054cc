use crate::application::PickerConfig;
use crate::domain::{
    ActiveEndpoint, Constraints, DateRange, HoverHighlight, HoveredDate, PickerWindow,
    PotentialRange, RejectionReason, WindowPadding, build_window, classify_hover,
    compute_potential_range, is_date_hovered, validate, weekday_labels,
};
use crate::infrastructure::{DatesChange, DatesChangeHook, HookRegistry};
use chrono::{NaiveDate, Weekday};
use serde::Serialize;

/// Committed range plus the endpoint the next selection sets.
///
/// Transitions are pure: they return the next state and leave `self` alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub range: DateRange,
    pub active: ActiveEndpoint,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state after clicking `date`, or `None` when the click is refused.
    pub fn on_click(&self, date: NaiveDate, constraints: &Constraints) -> Option<Self> {
        let (candidate, armed) = match self.active {
            ActiveEndpoint::Start => (self.range.with_start(date), ActiveEndpoint::Start),
            ActiveEndpoint::End => (self.range.with_end(date), ActiveEndpoint::End),
            // A finished range is discarded and a new one begins.
            ActiveEndpoint::None => (DateRange::starting(date), ActiveEndpoint::Start),
        };

        self.commit(candidate, armed, constraints)
    }

    /// Next state after a whole range is entered directly (e.g. typed in).
    pub fn select_range(&self, range: DateRange, constraints: &Constraints) -> Option<Self> {
        self.commit(range, self.active, constraints)
    }

    fn commit(
        &self,
        candidate: DateRange,
        armed: ActiveEndpoint,
        constraints: &Constraints,
    ) -> Option<Self> {
        if !validate(&candidate, constraints) {
            return None;
        }

        // Re-committing the current range leaves the endpoint where it is.
        if candidate == self.range {
            return Some(*self);
        }

        let active = if armed == ActiveEndpoint::End && candidate.start.is_some() {
            ActiveEndpoint::None
        } else {
            ActiveEndpoint::End
        };

        Some(Self {
            range: candidate,
            active,
        })
    }
}

/// Result of a hover event, for the caller to keep until the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoverOutcome {
    pub hover_error: Option<RejectionReason>,
    pub potential_range: Option<PotentialRange>,
}

/// Result of a select event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOutcome {
    pub committed: bool,
    pub range: DateRange,
    pub active_endpoint: ActiveEndpoint,
}

/// Everything a presentation layer needs to draw one day cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayState {
    pub disabled: bool,
    pub in_selected_range: bool,
    pub in_potential_range: bool,
    pub potential_error: Option<RejectionReason>,
    pub is_start: bool,
    pub is_end: bool,
    pub is_hovered: bool,
    pub is_focused: bool,
}

/// One interactive picker: window, selection, hover preview and focus.
#[derive(Debug)]
pub struct DatePicker {
    number_of_months: usize,
    initial_visible_month: Option<NaiveDate>,
    padding: Option<WindowPadding>,
    constraints: Constraints,
    window: PickerWindow,
    selection: SelectionState,
    hovered: Option<HoveredDate>,
    potential_range: Option<PotentialRange>,
    focused_date: Option<NaiveDate>,
    hooks: HookRegistry,
}

impl DatePicker {
    pub fn new(config: &PickerConfig) -> Self {
        Self::with_constraints(config, config.constraints())
    }

    /// Like [`DatePicker::new`] but with constraints built by the caller, for
    /// blocked-date predicates that cannot live in a config file.
    ///
    /// The first window opens on `start_date` (ending on `end_date`'s month
    /// when both are set), otherwise on `initial_visible_month`.
    pub fn with_constraints(config: &PickerConfig, constraints: Constraints) -> Self {
        let (first, last) = match config.start_date {
            Some(start) => (Some(start), config.end_date),
            None => (config.initial_visible_month, None),
        };
        let window = build_window(
            config.number_of_months,
            constraints.first_day_of_week,
            first,
            last,
            config.padding,
        );

        Self {
            number_of_months: config.number_of_months,
            initial_visible_month: config.initial_visible_month,
            padding: config.padding,
            constraints,
            window,
            selection: SelectionState::new(),
            hovered: None,
            potential_range: None,
            focused_date: config.start_date,
            hooks: HookRegistry::new(),
        }
    }

    pub fn register_hook<H>(&mut self, hook: H)
    where
        H: DatesChangeHook + 'static,
    {
        self.hooks.register(hook);
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn window(&self) -> &PickerWindow {
        &self.window
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn range(&self) -> DateRange {
        self.selection.range
    }

    pub fn active_endpoint(&self) -> ActiveEndpoint {
        self.selection.active
    }

    pub fn hovered_date(&self) -> Option<HoveredDate> {
        self.hovered
    }

    pub fn potential_range(&self) -> Option<PotentialRange> {
        self.potential_range
    }

    pub fn focused_date(&self) -> Option<NaiveDate> {
        self.focused_date
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.constraints.first_day_of_week
    }

    pub fn weekday_labels(&self, custom: Option<&dyn Fn(Weekday) -> String>) -> Vec<String> {
        weekday_labels(self.first_day_of_week(), custom)
    }

    /// Classifies the hovered day and recomputes the preview range.
    pub fn on_day_hover(&mut self, date: NaiveDate) -> HoverOutcome {
        let hover_error = classify_hover(date, &self.selection.range, &self.constraints);
        let potential_range = compute_potential_range(
            &self.selection.range,
            self.selection.active,
            date,
            &self.constraints,
        );
        log::trace!("hover {}: {:?} {:?}", date, hover_error, potential_range);

        self.hovered = Some(HoveredDate {
            date,
            error: hover_error,
        });
        self.potential_range = potential_range;

        HoverOutcome {
            hover_error,
            potential_range,
        }
    }

    /// Pointer left the grid.
    pub fn clear_hover(&mut self) {
        self.hovered = None;
        self.potential_range = None;
    }

    /// Handles a click on `date`. Refused clicks change nothing.
    pub fn on_day_select(&mut self, date: NaiveDate) -> SelectOutcome {
        let next = self.selection.on_click(date, &self.constraints);
        self.apply(next)
    }

    /// Commits a whole range, as when the start and end fields are typed in.
    pub fn select_range(&mut self, range: DateRange) -> SelectOutcome {
        let next = self.selection.select_range(range, &self.constraints);
        self.apply(next)
    }

    fn apply(&mut self, next: Option<SelectionState>) -> SelectOutcome {
        let Some(next) = next else {
            log::debug!("selection refused, keeping {}", self.selection.range);
            return self.outcome(false);
        };

        self.selection = next;
        // The preview was computed against the old range.
        self.potential_range = None;

        log::debug!("committed {}, next endpoint {}", next.range, next.active);
        let change = DatesChange::new(next.range, next.active);
        self.hooks.execute_hooks(&change);

        if self.needs_recenter(&next.range) {
            self.window = build_window(
                self.number_of_months,
                self.first_day_of_week(),
                next.range.start.or(self.initial_visible_month),
                next.range.end,
                self.padding,
            );
            log::debug!("window rebuilt around {}", next.range);
        }

        self.outcome(true)
    }

    /// A committed endpoint whose month is off screen forces a rebuild.
    fn needs_recenter(&self, range: &DateRange) -> bool {
        [range.start, range.end]
            .into_iter()
            .flatten()
            .any(|date| !self.window.contains_date(date))
    }

    fn outcome(&self, committed: bool) -> SelectOutcome {
        SelectOutcome {
            committed,
            range: self.selection.range,
            active_endpoint: self.selection.active,
        }
    }

    /// Clears the range and arms the start endpoint.
    pub fn reset_selection(&mut self) {
        self.selection = SelectionState::new();
        self.potential_range = None;
    }

    /// An input field for `endpoint` gained focus.
    pub fn set_active_endpoint(&mut self, endpoint: ActiveEndpoint) {
        self.selection.active = endpoint;
        self.potential_range = None;
    }

    /// Pages the window by `vector` months.
    pub fn move_by(&mut self, vector: i32) {
        self.window = self.window.moved_by(vector, self.first_day_of_week());
    }

    /// Jumps the window so `date`'s month comes first, dropping keyboard focus.
    pub fn go_to_date(&mut self, date: NaiveDate) {
        self.window = build_window(
            self.number_of_months,
            self.first_day_of_week(),
            Some(date),
            None,
            self.padding,
        );
        self.focused_date = None;
    }

    pub fn set_focused_date(&mut self, date: Option<NaiveDate>) {
        self.focused_date = date;
    }

    pub fn is_start_date(&self, date: NaiveDate) -> bool {
        self.selection.range.is_start(date)
    }

    pub fn is_end_date(&self, date: NaiveDate) -> bool {
        self.selection.range.is_end(date)
    }

    pub fn is_date_focused(&self, date: NaiveDate) -> bool {
        self.focused_date == Some(date)
    }

    pub fn is_date_blocked(&self, date: NaiveDate) -> bool {
        self.constraints.is_blocked(date)
    }

    /// Whether `date` is on the hover trail from the committed start.
    pub fn is_date_hovered(&self, date: NaiveDate) -> bool {
        let hovered = self.hovered.map(|h| h.date);
        let min_days = self
            .constraints
            .min_date_range
            .zip(self.selection.range.start.or(hovered))
            .and_then(|(period, from)| period.days_from(from))
            .map_or(0, |days| u32::try_from(days).unwrap_or(u32::MAX));

        let highlight = HoverHighlight {
            committed: &self.selection.range,
            hovered,
            min_days,
            fixed: self.constraints.fix_range.is_some(),
        };

        is_date_hovered(date, &highlight, self.constraints.blocked())
    }

    pub fn day_state(&self, date: NaiveDate) -> DayState {
        let potential = self.potential_range.filter(|p| p.contains(date));

        DayState {
            disabled: self.is_date_blocked(date),
            in_selected_range: self.selection.range.contains(date),
            in_potential_range: potential.is_some(),
            potential_error: potential.and_then(|p| p.error),
            is_start: self.is_start_date(date),
            is_end: self.is_end_date(date),
            is_hovered: self.is_date_hovered(date),
            is_focused: self.is_date_focused(date),
        }
    }
}
