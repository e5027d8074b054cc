use crate::application::{DatePicker, PickerConfig, TextRenderer, parse_weekday};
use crate::domain::{
    ActiveEndpoint, DateRange, Month, Period, WindowPadding, build_window, check_range,
    checked_move_window_by, classify_hover, compute_potential_range,
};
use crate::infrastructure::{LogHook, RecordingHook};
use anyhow::Context;
use chrono::{NaiveDate, Weekday};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rangepick")]
#[command(about = "Explore date-range picker decisions from the terminal")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $RANGEPICK_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one month grid
    Grid {
        /// Month to show (YYYY-MM format)
        #[arg(short, long)]
        month: String,
        /// First day of the week (0-6 with 0 = Sunday, or a name)
        #[arg(long, value_parser = weekday_arg)]
        first_day: Option<Weekday>,
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
    /// Print the months of a picker window
    Window {
        /// Number of visible months
        #[arg(long)]
        months: Option<usize>,
        /// Month of the first slot (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Month of the last slot
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Page the window by this many months
        #[arg(long = "move", allow_negative_numbers = true, default_value_t = 0)]
        move_by: i32,
        #[arg(long, default_value_t = 0)]
        pad_left: u32,
        #[arg(long, default_value_t = 0)]
        pad_right: u32,
    },
    /// Check a candidate range against the constraints
    Validate {
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
    /// Classify a hovered day and show the preview range
    Hover {
        #[arg(short, long)]
        date: NaiveDate,
        /// Committed start
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Committed end
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = EndpointArg::End)]
        active: EndpointArg,
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
    /// Replay day clicks and print the resulting picker
    Select {
        #[arg(long = "click", required = true)]
        clicks: Vec<NaiveDate>,
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConstraintArgs {
    #[arg(long)]
    pub min_date: Option<NaiveDate>,
    #[arg(long)]
    pub max_date: Option<NaiveDate>,
    /// Shortest allowed range, e.g. 3d or 1w
    #[arg(long)]
    pub min_range: Option<Period>,
    /// Longest allowed range, e.g. 2w or 1m
    #[arg(long)]
    pub max_range: Option<Period>,
    /// Fixed range length
    #[arg(long)]
    pub fix_range: Option<Period>,
    /// Unavailable day (repeatable)
    #[arg(long = "block")]
    pub blocked: Vec<NaiveDate>,
    /// Unavailable weekday (repeatable)
    #[arg(long = "block-weekday", value_parser = weekday_arg)]
    pub blocked_weekdays: Vec<Weekday>,
}

impl ConstraintArgs {
    /// Layers the command-line constraints over the loaded config.
    pub fn apply(&self, config: &mut PickerConfig) {
        if self.min_date.is_some() {
            config.min_date = self.min_date;
        }
        if self.max_date.is_some() {
            config.max_date = self.max_date;
        }
        if self.min_range.is_some() {
            config.min_date_range = self.min_range;
        }
        if self.max_range.is_some() {
            config.max_date_range = self.max_range;
        }
        if self.fix_range.is_some() {
            config.fix_range = self.fix_range;
        }
        config.unavailable_dates.extend(&self.blocked);
        config.unavailable_weekdays.extend(&self.blocked_weekdays);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointArg {
    Start,
    End,
    None,
}

impl From<EndpointArg> for ActiveEndpoint {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::Start => ActiveEndpoint::Start,
            EndpointArg::End => ActiveEndpoint::End,
            EndpointArg::None => ActiveEndpoint::None,
        }
    }
}

fn weekday_arg(value: &str) -> Result<Weekday, String> {
    parse_weekday(value).ok_or_else(|| format!("'{}' is not a weekday", value))
}

fn parse_month(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .with_context(|| format!("'{}' is not a YYYY-MM month", value))
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let output = cli.execute()?;
        println!("{}", output);
        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<PickerConfig> {
        match &self.config {
            Some(path) => PickerConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display())),
            None => PickerConfig::from_env().context("Failed to load config"),
        }
    }

    /// Runs the command and returns what it would print.
    pub fn execute(&self) -> anyhow::Result<String> {
        let mut config = self.load_config()?;
        let renderer = TextRenderer::new();

        let output = match &self.command {
            Commands::Grid {
                month,
                first_day,
                constraints,
            } => {
                constraints.apply(&mut config);
                let first_day = first_day.unwrap_or(config.first_day_of_week);
                let month = Month::containing(parse_month(month)?, first_day);
                let constraints = config.constraints();
                renderer.render_plain(&month, &|date| constraints.is_blocked(date))
            }
            Commands::Window {
                months,
                start,
                end,
                move_by,
                pad_left,
                pad_right,
            } => {
                let count = months.unwrap_or(config.number_of_months);
                anyhow::ensure!(count > 0, "--months must be at least 1");

                let padding = WindowPadding::new(*pad_left, *pad_right);
                let padding = (!padding.is_empty()).then_some(padding).or(config.padding);
                let fdow = config.first_day_of_week;

                let mut window = build_window(count, fdow, *start, *end, padding);
                if *move_by != 0 {
                    window = checked_move_window_by(&window, *move_by, fdow)
                        .with_context(|| format!("cannot move the window by {} months", move_by))?;
                }

                window
                    .months()
                    .iter()
                    .map(|entry| {
                        let label = entry.month.date.format("%Y-%m").to_string();
                        if entry.is_padding {
                            format!("{} (padding)", label)
                        } else {
                            label
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Commands::Validate {
                start,
                end,
                constraints,
            } => {
                constraints.apply(&mut config);
                config.validate()?;
                let outcome = check_range(&DateRange::new(*start, *end), &config.constraints());
                match outcome.reason {
                    Some(reason) => format!("invalid: {}", reason),
                    None => "valid".to_string(),
                }
            }
            Commands::Hover {
                date,
                start,
                end,
                active,
                constraints,
            } => {
                constraints.apply(&mut config);
                config.validate()?;
                let constraints = config.constraints();
                let committed = DateRange::new(*start, *end);

                let mut lines = vec![match classify_hover(*date, &committed, &constraints) {
                    Some(reason) => format!("hover: {}", reason),
                    None => "hover: ok".to_string(),
                }];

                let preview =
                    compute_potential_range(&committed, (*active).into(), *date, &constraints);
                lines.push(match preview {
                    Some(preview) => match preview.error {
                        Some(reason) => format!(
                            "preview: {} (invalid: {})",
                            DateRange::from(preview.interval),
                            reason
                        ),
                        None => format!("preview: {}", DateRange::from(preview.interval)),
                    },
                    None => "preview: none".to_string(),
                });
                lines.join("\n")
            }
            Commands::Select {
                clicks,
                constraints,
            } => {
                constraints.apply(&mut config);
                config.validate()?;

                if config.initial_visible_month.is_none() {
                    config.initial_visible_month = clicks.first().copied();
                }

                let recorder = RecordingHook::new();
                let mut picker = DatePicker::new(&config);
                picker.register_hook(LogHook);
                picker.register_hook(recorder.clone());

                let mut lines = Vec::new();
                for click in clicks {
                    let outcome = picker.on_day_select(*click);
                    let verdict = if outcome.committed {
                        "committed"
                    } else {
                        "ignored"
                    };
                    lines.push(format!(
                        "{} {}: {} (next: {})",
                        click, verdict, outcome.range, outcome.active_endpoint
                    ));
                }

                lines.push(format!("{} change(s) notified", recorder.changes().len()));
                if let Some(last) = recorder.last() {
                    lines.push(format!("last change: {}", last.range()));
                }
                lines.push(String::new());
                lines.push(renderer.render_window(&picker));
                lines.join("\n")
            }
        };

        Ok(output)
    }
}
