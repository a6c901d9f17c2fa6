//! Command-line interface: argument definitions and their translation into initial state.

use crate::columns::{ColumnId, ColumnVisibility};
use crate::config::{ExplorerConfig, ThemeName};
use crate::dataset::{Board, Event};
use crate::error::{DdError, Result};
use crate::filter::{CriterionValue, FilterState, NumericField};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub fn command() -> Command {
    Command::new("ddexplorer")
        .version(crate::VERSION)
        .about("Browse and filter diving degree-of-difficulty tables in the terminal")
        .long_about(
            "ddexplorer shows the dive table as a scrollable grid and narrows it as you pick \
             events, boards, groups and difficulty limits. With --print it applies the \
             filters given on the command line and writes the result to stdout.",
        )
        .arg(
            Arg::new("file")
                .help("JSON data file to load instead of the bundled table")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Configuration file (TOML)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Color theme: default, monochrome or high-contrast")
                .value_parser(|s: &str| s.parse::<ThemeName>()),
        )
        .arg(
            Arg::new("print")
                .long("print")
                .help("Print the filtered table as tab-separated text and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("event")
                .long("event")
                .value_name("EVENT")
                .help("Restrict to springboard or platform (repeatable)")
                .action(ArgAction::Append)
                .value_parser(|s: &str| s.parse::<Event>()),
        )
        .arg(
            Arg::new("board")
                .long("board")
                .value_name("BOARD")
                .help("Restrict to a board height such as 3m or 7.5m (repeatable)")
                .action(ArgAction::Append)
                .value_parser(|s: &str| s.parse::<Board>()),
        )
        .arg(
            Arg::new("group")
                .long("group")
                .value_name("N")
                .help("Restrict to dive group 1-6 (repeatable)")
                .action(ArgAction::Append)
                .value_parser(value_parser!(u8).range(1..=6)),
        )
        .arg(
            Arg::new("dive-number")
                .long("dive-number")
                .value_name("N")
                .help("Show only this dive number"),
        )
        .arg(
            Arg::new("dd-max")
                .long("dd-max")
                .value_name("DD")
                .help("Upper difficulty limit"),
        )
        .arg(
            Arg::new("dd-min")
                .long("dd-min")
                .value_name("DD")
                .help("Lower difficulty limit"),
        )
        .arg(
            Arg::new("head-first")
                .long("head-first")
                .help("Only head-first entries")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("hide-impossible")
                .long("hide-impossible")
                .help("Hide dives without any listed difficulty")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ignore-a")
                .long("ignore-a")
                .help("Ignore the straight (A) position in difficulty checks")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .value_name("LIST")
                .help("Comma-separated columns to show, e.g. board,number,description,b,c")
                .value_delimiter(',')
                .value_parser(|s: &str| s.parse::<ColumnId>()),
        )
}

/// Parsed command line.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub theme: Option<ThemeName>,
    pub print: bool,
    pub events: Vec<Event>,
    pub boards: Vec<Board>,
    pub groups: Vec<u8>,
    pub dive_number: Option<String>,
    pub dd_max: Option<String>,
    pub dd_min: Option<String>,
    pub head_first: bool,
    pub hide_impossible: bool,
    pub ignore_a: bool,
    pub columns: Option<Vec<ColumnId>>,
}

impl CliOptions {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let options = Self {
            file: matches.get_one::<PathBuf>("file").cloned(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            theme: matches.get_one::<ThemeName>("theme").copied(),
            print: matches.get_flag("print"),
            events: many(matches, "event"),
            boards: many(matches, "board"),
            groups: many(matches, "group"),
            dive_number: matches.get_one::<String>("dive-number").cloned(),
            dd_max: matches.get_one::<String>("dd-max").cloned(),
            dd_min: matches.get_one::<String>("dd-min").cloned(),
            head_first: matches.get_flag("head-first"),
            hide_impossible: matches.get_flag("hide-impossible"),
            ignore_a: matches.get_flag("ignore-a"),
            columns: matches
                .get_many::<ColumnId>("columns")
                .map(|ids| ids.copied().collect()),
        };

        check_numeric::<u32>("--dive-number", options.dive_number.as_deref())?;
        check_numeric::<f64>("--dd-max", options.dd_max.as_deref())?;
        check_numeric::<f64>("--dd-min", options.dd_min.as_deref())?;
        Ok(options)
    }

    /// Flags override the configuration file.
    pub fn apply_to_config(&self, config: &mut ExplorerConfig) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
    }

    /// Initial filter state described by the flags.
    pub fn filter_state(&self, debounce: Duration) -> FilterState {
        let mut filters = FilterState::new(debounce);

        match self.events.as_slice() {
            [] => {}
            [event] => filters.select_event(*event),
            events if events.iter().all(|e| *e == events[0]) => filters.select_event(events[0]),
            _ => filters.select_all_events(),
        }

        for board in &self.boards {
            if filters.boards().contains(board) {
                continue;
            }
            if !filters.toggle_board(*board) {
                log::warn!("board {board} is not available for the selected event, ignoring");
            }
        }

        if !self.groups.is_empty() {
            filters.set_groups(self.groups.iter().copied());
        }

        let now = Instant::now();
        let numeric = [
            (NumericField::DiveNumber, &self.dive_number),
            (NumericField::DdLimit, &self.dd_max),
            (NumericField::DdMin, &self.dd_min),
        ];
        for (field, text) in numeric {
            if let Some(text) = text {
                filters.set_input(field, text.as_str(), now);
                filters.apply(field);
            }
        }

        if self.head_first {
            filters.toggle_head_first_only();
        }
        if self.hide_impossible {
            filters.toggle_hide_impossible();
        }
        if self.ignore_a {
            filters.toggle_ignore_a_dives();
            filters.toggle_advanced();
        }
        filters
    }

    /// Explicit `--columns`, or the defaults for a viewport `width` cells wide.
    pub fn column_visibility(&self, width: u16, narrow_threshold: u16) -> ColumnVisibility {
        match &self.columns {
            Some(columns) => ColumnVisibility::only(columns),
            None => ColumnVisibility::for_viewport(width, narrow_threshold),
        }
    }
}

fn many<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Vec<T> {
    matches
        .get_many::<T>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Reject non-empty numeric flags that would silently parse to "no filter".
fn check_numeric<T: CriterionValue>(flag: &str, text: Option<&str>) -> Result<()> {
    match text {
        Some(text) if !text.trim().is_empty() && T::parse_input(text).is_none() => Err(
            DdError::invalid_argument(format!("{flag}: '{text}' is not a valid number")),
        ),
        _ => Ok(()),
    }
}
