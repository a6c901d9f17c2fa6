//! Interactive session state.
//!
//! A `Session` owns the filter state, column visibility and view state for one run and
//! recomputes the visible rows after every change. The record store is shared read-only.

use crate::columns::ColumnVisibility;
use crate::dataset::record::DiveRecord;
use crate::dataset::RecordStore;
use crate::filter::{visible_records, FilterState};
use crate::input::{InputAction, ScrollDirection};
use crate::render::{TableView, ViewState};
use std::sync::Arc;
use std::time::Instant;

pub struct Session {
    store: Arc<RecordStore>,
    filters: FilterState,
    columns: ColumnVisibility,
    view: ViewState,
    /// Ids of the visible records, in pipeline order
    visible: Vec<usize>,
}

impl Session {
    pub fn new(
        store: Arc<RecordStore>,
        filters: FilterState,
        columns: ColumnVisibility,
        view: ViewState,
    ) -> Self {
        let mut session = Self {
            store,
            filters,
            columns,
            view,
            visible: Vec::new(),
        };
        session.refresh();
        session
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn columns(&self) -> &ColumnVisibility {
        &self.columns
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn visible_ids(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_rows(&self) -> Vec<&DiveRecord> {
        self.visible
            .iter()
            .filter_map(|id| self.store.get(*id))
            .collect()
    }

    pub fn selected_record(&self) -> Option<&DiveRecord> {
        self.view
            .selected
            .and_then(|row| self.visible.get(row))
            .and_then(|id| self.store.get(*id))
    }

    pub fn table_view(&self) -> TableView<'_> {
        TableView {
            rows: self.visible_rows(),
            total_records: self.store.len(),
            filters: &self.filters,
            columns: &self.columns,
            view: &self.view,
        }
    }

    /// Apply one input action. Returns false once the session should end.
    pub fn apply(&mut self, action: InputAction, now: Instant) -> bool {
        self.view.status_line.clear_message();
        let total = self.visible.len();
        let page = self.page();

        match action {
            InputAction::Quit => return false,
            InputAction::NoAction => {}

            InputAction::MoveSelection { direction, rows } => match direction {
                ScrollDirection::Up => self.view.move_up(rows, total, page),
                ScrollDirection::Down => self.view.move_down(rows, total, page),
            },
            InputAction::PageUp => self.view.move_up(page, total, page),
            InputAction::PageDown => self.view.move_down(page, total, page),
            InputAction::First => self.view.select_row(0, total, page),
            InputAction::Last => self.view.select_row(usize::MAX, total, page),

            InputAction::SelectEvent(event) => {
                self.filters.select_event(event);
                self.refresh();
            }
            InputAction::SelectAllEvents => {
                self.filters.select_all_events();
                self.refresh();
            }
            InputAction::ToggleBoardSlot(slot) => {
                match self.filters.available_boards().get(slot).copied() {
                    Some(board) => {
                        self.filters.toggle_board(board);
                        self.refresh();
                    }
                    None => self
                        .view
                        .status_line
                        .set_message(format!("No board in slot {}", slot + 1)),
                }
            }
            InputAction::SelectAllBoards => {
                self.filters.select_all_boards();
                self.refresh();
            }
            InputAction::ToggleGroup(group) => {
                if self.filters.toggle_group(group) {
                    self.refresh();
                }
            }

            InputAction::BeginEdit(field) => self.view.editing = Some(field),
            InputAction::EditInsert { field, ch } => {
                let mut text = self.filters.input(field).to_string();
                text.push(ch);
                self.filters.set_input(field, text, now);
            }
            InputAction::EditBackspace(field) => {
                let mut text = self.filters.input(field).to_string();
                text.pop();
                self.filters.set_input(field, text, now);
            }
            InputAction::EditClear(field) => self.filters.set_input(field, "", now),
            InputAction::ConfirmEdit(field) => {
                self.view.editing = None;
                if self.filters.apply(field) {
                    self.refresh();
                }
            }
            InputAction::LeaveEdit(_) => self.view.editing = None,

            InputAction::ToggleHeadFirst => {
                self.filters.toggle_head_first_only();
                self.refresh();
            }
            InputAction::ToggleHideImpossible => {
                self.filters.toggle_hide_impossible();
                self.refresh();
            }
            InputAction::ToggleIgnoreA => {
                self.filters.toggle_ignore_a_dives();
                self.refresh();
            }
            InputAction::ToggleAdvanced => {
                self.filters.toggle_advanced();
                self.view.clamp(total, self.page());
            }

            InputAction::OpenColumnPicker => {
                if !self.columns.picker_open() {
                    self.columns.toggle_picker();
                }
            }
            InputAction::CloseColumnPicker => self.columns.close_picker(),
            InputAction::ToggleColumn(column) => self.columns.toggle(column),
            InputAction::ShowHelp => self.view.show_help = true,
            InputAction::HideHelp => self.view.show_help = false,

            InputAction::Reset => {
                self.filters.reset();
                self.view.editing = None;
                self.refresh();
                self.view.status_line.set_message("Filters reset");
            }
            InputAction::Resize { width, height } => self.resize(width, height),
        }
        true
    }

    /// Drive debounce deadlines. Returns true when the visible rows were recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.filters.poll_debounce(now) {
            self.refresh();
            true
        } else {
            false
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if self.view.update_terminal_size(width, height) {
            self.view.clamp(self.visible.len(), self.page());
        }
    }

    /// Recompute the visible rows, keeping the selected record when it survives.
    fn refresh(&mut self) {
        let selected_id = self
            .view
            .selected
            .and_then(|row| self.visible.get(row))
            .copied();

        self.visible = visible_records(&self.store, &self.filters)
            .into_iter()
            .map(DiveRecord::id)
            .collect();
        log::debug!(
            "{} of {} dives visible",
            self.visible.len(),
            self.store.len()
        );

        let page = self.page();
        match selected_id.and_then(|id| self.visible.iter().position(|v| *v == id)) {
            Some(row) => self.view.select_row(row, self.visible.len(), page),
            None => self.view.clamp(self.visible.len(), page),
        }
    }

    fn page(&self) -> usize {
        self.view.body_rows(self.filters.advanced_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnId;
    use crate::dataset::{Event, BUNDLED_DATA};
    use crate::filter::NumericField;
    use std::time::Duration;

    fn session() -> Session {
        let store = Arc::new(RecordStore::from_json(BUNDLED_DATA).unwrap());
        Session::new(
            store,
            FilterState::new(Duration::from_millis(300)),
            ColumnVisibility::for_viewport(120, 100),
            ViewState::new("bundled", 120, 30),
        )
    }

    fn type_text(session: &mut Session, field: NumericField, text: &str, now: Instant) {
        session.apply(InputAction::BeginEdit(field), now);
        for ch in text.chars() {
            session.apply(InputAction::EditInsert { field, ch }, now);
        }
    }

    #[test]
    fn starts_with_everything_visible_and_first_row_selected() {
        let session = session();
        assert_eq!(session.visible_ids().len(), session.store().len());
        assert_eq!(session.view().selected, Some(0));
        assert_eq!(session.selected_record().map(|r| r.dive_number()), Some(101));
    }

    #[test]
    fn quit_ends_session() {
        let mut session = session();
        assert!(!session.apply(InputAction::Quit, Instant::now()));
    }

    #[test]
    fn typed_input_commits_after_debounce() {
        let mut session = session();
        let start = Instant::now();
        type_text(&mut session, NumericField::DiveNumber, "101", start);

        assert_eq!(session.visible_ids().len(), session.store().len());
        assert!(!session.tick(start + Duration::from_millis(100)));
        assert!(session.tick(start + Duration::from_millis(301)));
        assert!(session
            .visible_rows()
            .iter()
            .all(|r| r.dive_number() == 101));
    }

    #[test]
    fn confirm_commits_immediately_and_cancels_deadline() {
        let mut session = session();
        let start = Instant::now();
        type_text(&mut session, NumericField::DdLimit, "1.5", start);
        session.apply(InputAction::ConfirmEdit(NumericField::DdLimit), start);

        assert_eq!(session.filters().dd_limit(), Some(1.5));
        assert_eq!(session.view().editing, None);
        assert!(!session.tick(start + Duration::from_secs(1)));
    }

    #[test]
    fn leaving_a_field_keeps_its_pending_deadline() {
        let mut session = session();
        let start = Instant::now();
        type_text(&mut session, NumericField::DdMin, "3", start);
        session.apply(InputAction::LeaveEdit(NumericField::DdMin), start);

        assert!(session.filters().has_pending_input());
        assert!(session.tick(start + Duration::from_millis(400)));
        assert_eq!(session.filters().dd_min(), Some(3.0));
    }

    #[test]
    fn board_slots_follow_available_boards() {
        let mut session = session();
        let now = Instant::now();
        session.apply(InputAction::SelectEvent(Event::Platform), now);
        session.apply(InputAction::ToggleBoardSlot(3), now);
        assert_eq!(
            session.view().status_line.message.as_deref(),
            Some("No board in slot 4")
        );

        session.apply(InputAction::ToggleBoardSlot(2), now);
        assert!(session
            .visible_rows()
            .iter()
            .all(|r| r.board().label() == "10m"));
    }

    #[test]
    fn selection_follows_record_across_refresh() {
        let mut session = session();
        let now = Instant::now();
        session.apply(InputAction::Last, now);
        let last = session.selected_record().map(DiveRecord::id);

        session.apply(InputAction::SelectEvent(Event::Platform), now);
        assert_eq!(session.selected_record().map(DiveRecord::id), last);
    }

    #[test]
    fn selection_clamps_when_rows_disappear() {
        let mut session = session();
        let now = Instant::now();
        session.apply(InputAction::Last, now);
        session.apply(InputAction::SelectEvent(Event::Springboard), now);
        assert_eq!(
            session.view().selected,
            Some(session.visible_ids().len() - 1)
        );

        for group in 1..=6 {
            session.apply(InputAction::ToggleGroup(group), now);
        }
        // The first toggle collapses to group 1, the rest add groups back.
        assert!(!session.visible_ids().is_empty());
    }

    #[test]
    fn reset_restores_all_rows_and_reports() {
        let mut session = session();
        let now = Instant::now();
        session.apply(InputAction::ToggleHideImpossible, now);
        session.apply(InputAction::SelectEvent(Event::Platform), now);
        session.apply(InputAction::Reset, now);

        assert_eq!(session.visible_ids().len(), session.store().len());
        assert_eq!(
            session.view().status_line.message.as_deref(),
            Some("Filters reset")
        );
    }

    #[test]
    fn column_and_overlay_actions() {
        let mut session = session();
        let now = Instant::now();
        session.apply(InputAction::OpenColumnPicker, now);
        assert!(session.columns().picker_open());
        session.apply(InputAction::ToggleColumn(ColumnId::Event), now);
        session.apply(InputAction::CloseColumnPicker, now);
        assert!(!session.columns().picker_open());
        assert!(session.columns().is_visible(ColumnId::Event));

        session.apply(InputAction::ShowHelp, now);
        assert!(session.view().show_help);
        session.apply(InputAction::HideHelp, now);
        assert!(!session.view().show_help);
    }

    #[test]
    fn resize_does_not_touch_columns() {
        let mut session = session();
        session.apply(
            InputAction::Resize {
                width: 60,
                height: 10,
            },
            Instant::now(),
        );
        assert!(session.columns().is_visible(ColumnId::DiveDescription));
        assert_eq!(session.view().viewport_width, 60);
    }
}
