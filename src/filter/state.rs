//! Owned filter state and its actions.
//!
//! Every criterion is independent except boards, whose selectable set follows the event
//! selection: changing events drops selected boards that are no longer available.

use crate::dataset::{Board, Event, ALL_GROUPS};
use crate::filter::boards::available_boards;
use crate::filter::criterion::DebouncedCriterion;
use crate::filter::debounce::DEFAULT_DEBOUNCE_MS;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// Text-entry criteria that go through the debounce/confirm cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    DiveNumber,
    DdLimit,
    DdMin,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [
        NumericField::DiveNumber,
        NumericField::DdLimit,
        NumericField::DdMin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumericField::DiveNumber => "Dive #",
            NumericField::DdLimit => "DD Max",
            NumericField::DdMin => "DD Min",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterState {
    events: BTreeSet<Event>,
    boards: BTreeSet<Board>,
    groups: BTreeSet<u8>,
    dive_number: DebouncedCriterion<u32>,
    dd_limit: DebouncedCriterion<f64>,
    dd_min: DebouncedCriterion<f64>,
    head_first_only: bool,
    hide_impossible: bool,
    ignore_a_dives: bool,
    advanced_open: bool,
}

impl FilterState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            events: BTreeSet::new(),
            boards: BTreeSet::new(),
            groups: ALL_GROUPS.iter().copied().collect(),
            dive_number: DebouncedCriterion::new(debounce),
            dd_limit: DebouncedCriterion::new(debounce),
            dd_min: DebouncedCriterion::new(debounce),
            head_first_only: false,
            hide_impossible: false,
            ignore_a_dives: false,
            advanced_open: false,
        }
    }

    // ---- read accessors ----

    pub fn events(&self) -> &BTreeSet<Event> {
        &self.events
    }

    pub fn boards(&self) -> &BTreeSet<Board> {
        &self.boards
    }

    pub fn groups(&self) -> &BTreeSet<u8> {
        &self.groups
    }

    pub fn dive_number(&self) -> Option<u32> {
        self.dive_number.committed()
    }

    pub fn dd_limit(&self) -> Option<f64> {
        self.dd_limit.committed()
    }

    pub fn dd_min(&self) -> Option<f64> {
        self.dd_min.committed()
    }

    pub fn head_first_only(&self) -> bool {
        self.head_first_only
    }

    pub fn hide_impossible(&self) -> bool {
        self.hide_impossible
    }

    pub fn ignore_a_dives(&self) -> bool {
        self.ignore_a_dives
    }

    pub fn advanced_open(&self) -> bool {
        self.advanced_open
    }

    /// Boards the user may currently pick from.
    pub fn available_boards(&self) -> Vec<Board> {
        available_boards(&self.events)
    }

    /// Pending text of a numeric field.
    pub fn input(&self, field: NumericField) -> &str {
        match field {
            NumericField::DiveNumber => self.dive_number.input(),
            NumericField::DdLimit => self.dd_limit.input(),
            NumericField::DdMin => self.dd_min.input(),
        }
    }

    /// True while any text field waits for its debounce deadline.
    pub fn has_pending_input(&self) -> bool {
        self.dive_number.is_pending() || self.dd_limit.is_pending() || self.dd_min.is_pending()
    }

    // ---- event / board / group selection ----

    /// Exclusively select `event`; selecting the only selected event clears the selection.
    pub fn select_event(&mut self, event: Event) {
        if self.events.len() == 1 && self.events.contains(&event) {
            self.events.clear();
        } else {
            self.events = BTreeSet::from([event]);
        }
        self.prune_boards();
    }

    pub fn select_all_events(&mut self) {
        self.events = Event::ALL.iter().copied().collect();
        self.prune_boards();
    }

    /// Add or remove a board. Boards outside the available set are ignored.
    pub fn toggle_board(&mut self, board: Board) -> bool {
        if !self.available_boards().contains(&board) {
            return false;
        }
        if !self.boards.remove(&board) {
            self.boards.insert(board);
        }
        true
    }

    pub fn select_all_boards(&mut self) {
        self.boards = self.available_boards().into_iter().collect();
    }

    /// Add or remove a group.
    ///
    /// While every group is selected, toggling one collapses the selection to just that
    /// group instead of removing it.
    pub fn toggle_group(&mut self, group: u8) -> bool {
        if !ALL_GROUPS.contains(&group) {
            return false;
        }
        if self.groups.len() == ALL_GROUPS.len() {
            self.groups = BTreeSet::from([group]);
        } else if !self.groups.remove(&group) {
            self.groups.insert(group);
        }
        true
    }

    /// Replace the group selection wholesale. Values outside 1–6 are dropped.
    pub fn set_groups(&mut self, groups: impl IntoIterator<Item = u8>) {
        self.groups = groups
            .into_iter()
            .filter(|g| ALL_GROUPS.contains(g))
            .collect();
    }

    fn prune_boards(&mut self) {
        let available = self.available_boards();
        let before = self.boards.len();
        self.boards.retain(|board| available.contains(board));
        if self.boards.len() != before {
            log::debug!(
                "pruned {} board(s) unavailable for {:?}",
                before - self.boards.len(),
                self.events
            );
        }
    }

    // ---- text criteria ----

    pub fn set_dive_number_input(&mut self, text: impl Into<String>, now: Instant) {
        self.dive_number.set_input(text, now);
    }

    pub fn apply_dive_number(&mut self) -> bool {
        self.dive_number.apply()
    }

    pub fn set_dd_limit_input(&mut self, text: impl Into<String>, now: Instant) {
        self.dd_limit.set_input(text, now);
    }

    pub fn apply_dd_limit(&mut self) -> bool {
        self.dd_limit.apply()
    }

    pub fn set_dd_min_input(&mut self, text: impl Into<String>, now: Instant) {
        self.dd_min.set_input(text, now);
    }

    pub fn apply_dd_min(&mut self) -> bool {
        self.dd_min.apply()
    }

    /// Field-addressed form of the `set_*_input` actions.
    pub fn set_input(&mut self, field: NumericField, text: impl Into<String>, now: Instant) {
        match field {
            NumericField::DiveNumber => self.set_dive_number_input(text, now),
            NumericField::DdLimit => self.set_dd_limit_input(text, now),
            NumericField::DdMin => self.set_dd_min_input(text, now),
        }
    }

    /// Field-addressed form of the `apply_*` actions.
    pub fn apply(&mut self, field: NumericField) -> bool {
        match field {
            NumericField::DiveNumber => self.apply_dive_number(),
            NumericField::DdLimit => self.apply_dd_limit(),
            NumericField::DdMin => self.apply_dd_min(),
        }
    }

    /// Commit every text criterion whose debounce deadline has passed.
    ///
    /// Returns true when any committed value changed.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        let dive_number = self.dive_number.poll(now);
        let dd_limit = self.dd_limit.poll(now);
        let dd_min = self.dd_min.poll(now);
        dive_number || dd_limit || dd_min
    }

    // ---- toggles ----

    pub fn toggle_head_first_only(&mut self) {
        self.head_first_only = !self.head_first_only;
    }

    pub fn toggle_hide_impossible(&mut self) {
        self.hide_impossible = !self.hide_impossible;
    }

    pub fn toggle_ignore_a_dives(&mut self) {
        self.ignore_a_dives = !self.ignore_a_dives;
    }

    pub fn toggle_advanced(&mut self) {
        self.advanced_open = !self.advanced_open;
    }

    /// Restore every criterion to its default. The advanced row keeps its open state.
    pub fn reset(&mut self) {
        self.events.clear();
        self.boards.clear();
        self.groups = ALL_GROUPS.iter().copied().collect();
        self.dive_number.clear();
        self.dd_limit.clear();
        self.dd_min.clear();
        self.head_first_only = false;
        self.hide_impossible = false;
        self.ignore_a_dives = false;
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}
