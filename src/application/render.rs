use crate::application::{DatePicker, DayState};
use crate::domain::{DAYS_PER_WEEK, Month, weekday_labels};
use chrono::{Datelike, NaiveDate};

/// Plain-text month grids for the terminal.
///
/// Cell markers: `[` start, `]` end, `*` inside the selected range,
/// `~` inside the hover preview, `x` blocked, `.` a day of another month.
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders one month, asking `state` how each in-month day looks.
    pub fn render_month(
        &self,
        month: &Month,
        labels: &[String],
        state: &dyn Fn(NaiveDate) -> DayState,
    ) -> String {
        let mut lines = vec![month.date.format("%B %Y").to_string()];
        lines.push(
            labels
                .iter()
                .map(|label| format!("{:>3}", label))
                .collect::<Vec<_>>()
                .join(" "),
        );

        let days: Vec<String> = month
            .days()
            .map(|day| {
                if day.is_padding {
                    "  . ".to_string()
                } else {
                    Self::cell(day.date, &state(day.date))
                }
            })
            .collect();

        for week in days.chunks(DAYS_PER_WEEK as usize) {
            lines.push(week.concat().trim_end().to_string());
        }

        lines.join("\n")
    }

    fn cell(date: NaiveDate, state: &DayState) -> String {
        let prefix = if state.is_start { '[' } else { ' ' };
        let suffix = if state.is_end {
            ']'
        } else if state.in_selected_range {
            '*'
        } else if state.in_potential_range {
            '~'
        } else if state.disabled {
            'x'
        } else {
            ' '
        };

        format!("{}{:>2}{}", prefix, date.day(), suffix)
    }

    /// Renders every visible month of the picker's window.
    pub fn render_window(&self, picker: &DatePicker) -> String {
        let labels = picker.weekday_labels(None);
        let state = |date: NaiveDate| picker.day_state(date);

        picker
            .window()
            .visible_months()
            .map(|month| self.render_month(month, &labels, &state))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders a bare month with only blocked days marked.
    pub fn render_plain(&self, month: &Month, blocked: &dyn Fn(NaiveDate) -> bool) -> String {
        let labels = weekday_labels(month.first_day_of_week(), None);
        let state = |date: NaiveDate| DayState {
            disabled: blocked(date),
            ..DayState::default()
        };
        self.render_month(month, &labels, &state)
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}
