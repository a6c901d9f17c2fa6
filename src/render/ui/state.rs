//! View state for the table surface.
//!
//! `ViewState` owns what the session needs across frames (selection, scroll offset,
//! terminal size, overlays). `TableView` is the borrowed snapshot a renderer draws from.

use crate::columns::ColumnVisibility;
use crate::dataset::record::DiveRecord;
use crate::dataset::{Event, ALL_GROUPS};
use crate::filter::{FilterState, NumericField};

/// Rows taken by the table header and the status line.
const CHROME_ROWS: u16 = 2;

/// Message shown in place of the body when no record is visible.
pub const EMPTY_RESULT_MESSAGE: &str = "No dives match the current filters";

#[derive(Debug)]
pub struct ViewState {
    /// Index into the visible rows, `None` when nothing is visible
    pub selected: Option<usize>,

    /// First visible row of the body
    pub scroll_top: usize,

    pub viewport_width: u16,
    pub viewport_height: u16,

    /// Numeric field receiving keystrokes, if any
    pub editing: Option<NumericField>,

    pub show_help: bool,

    pub status_line: StatusLine,

    /// Where the records came from, for the status line
    pub source_name: String,
}

impl ViewState {
    pub fn new(source_name: impl Into<String>, viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            selected: None,
            scroll_top: 0,
            viewport_width,
            viewport_height,
            editing: None,
            show_help: false,
            status_line: StatusLine::new(),
            source_name: source_name.into(),
        }
    }

    /// Toolbar height: two fixed lines plus the advanced row when expanded.
    pub fn toolbar_height(advanced_open: bool) -> u16 {
        2 + u16::from(advanced_open)
    }

    /// Body rows that fit under the toolbar and header.
    pub fn body_rows(&self, advanced_open: bool) -> usize {
        let used = Self::toolbar_height(advanced_open) + CHROME_ROWS;
        usize::from(self.viewport_height.saturating_sub(used).max(1))
    }

    /// Returns true if the dimensions actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }

    /// Select `row` (clamped to `total`) and scroll so it stays on a page of `page` rows.
    pub fn select_row(&mut self, row: usize, total: usize, page: usize) {
        if total == 0 {
            self.selected = None;
            self.scroll_top = 0;
            return;
        }

        let row = row.min(total - 1);
        let page = page.max(1);
        self.selected = Some(row);
        if row < self.scroll_top {
            self.scroll_top = row;
        } else if row >= self.scroll_top + page {
            self.scroll_top = row + 1 - page;
        }
        self.scroll_top = self.scroll_top.min(total.saturating_sub(page));
    }

    pub fn move_up(&mut self, rows: usize, total: usize, page: usize) {
        let row = self.selected.unwrap_or(0).saturating_sub(rows);
        self.select_row(row, total, page);
    }

    pub fn move_down(&mut self, rows: usize, total: usize, page: usize) {
        let row = self
            .selected
            .map_or(0, |row| row.saturating_add(rows));
        self.select_row(row, total, page);
    }

    /// Re-fit selection and scroll after the row count or page size changed.
    pub fn clamp(&mut self, total: usize, page: usize) {
        self.select_row(self.selected.unwrap_or(0), total, page);
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Status text while browsing.
    pub fn format_status_line(
        &self,
        source: &str,
        shown: usize,
        total: usize,
        selected: Option<&DiveRecord>,
    ) -> String {
        let mut parts = vec![source.to_string(), format!("{shown}/{total} dives")];
        if let Some(record) = selected {
            parts.push(format!(
                "{} {} {}",
                record.board(),
                record.dive_number(),
                record.dive_description()
            ));
        }
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        parts.join(" | ")
    }

    /// Status text while a numeric field is being edited.
    pub fn format_edit_prompt(field: NumericField, buffer: &str) -> String {
        format!(
            "{}: {}_  (Enter apply, Esc leave)",
            field.label(),
            buffer
        )
    }
}

/// One toolbar element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub text: String,
    pub on: bool,
    pub editing: bool,
}

impl Chip {
    fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            on: false,
            editing: false,
        }
    }

    fn toggle(text: impl Into<String>, on: bool) -> Self {
        Self {
            text: text.into(),
            on,
            editing: false,
        }
    }
}

/// Borrowed snapshot of a session, ready to draw.
pub struct TableView<'a> {
    /// Every visible record, in pipeline order
    pub rows: Vec<&'a DiveRecord>,
    pub total_records: usize,
    pub filters: &'a FilterState,
    pub columns: &'a ColumnVisibility,
    pub view: &'a ViewState,
}

impl<'a> TableView<'a> {
    pub fn selected_record(&self) -> Option<&'a DiveRecord> {
        self.view
            .selected
            .and_then(|row| self.rows.get(row))
            .copied()
    }

    /// Rows on the current page.
    pub fn page(&self) -> &[&'a DiveRecord] {
        let page = self.view.body_rows(self.filters.advanced_open());
        let start = self.view.scroll_top.min(self.rows.len());
        let end = (start + page).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Selection relative to the current page.
    pub fn page_selection(&self) -> Option<usize> {
        self.view
            .selected
            .and_then(|row| row.checked_sub(self.view.scroll_top))
    }

    pub fn format_status_line(&self) -> String {
        match self.view.editing {
            Some(field) => {
                StatusLine::format_edit_prompt(field, self.filters.input(field))
            }
            None => self.view.status_line.format_status_line(
                &self.view.source_name,
                self.rows.len(),
                self.total_records,
                self.selected_record(),
            ),
        }
    }

    /// Toolbar content, one `Vec` per line.
    pub fn toolbar(&self) -> Vec<Vec<Chip>> {
        let filters = self.filters;
        let mut selection_line = vec![Chip::label("Event")];
        for event in Event::ALL {
            selection_line.push(Chip::toggle(
                event.to_string(),
                filters.events().contains(&event),
            ));
        }

        selection_line.push(Chip::label("Board"));
        for (slot, board) in filters.available_boards().iter().enumerate() {
            selection_line.push(Chip::toggle(
                format!("{}:{}", slot + 1, board),
                filters.boards().contains(board),
            ));
        }

        selection_line.push(Chip::label("Group"));
        for group in ALL_GROUPS {
            selection_line.push(Chip::toggle(
                group.to_string(),
                filters.groups().contains(&group),
            ));
        }

        let mut criteria_line: Vec<Chip> = NumericField::ALL
            .iter()
            .map(|&field| {
                let committed = match field {
                    NumericField::DiveNumber => filters.dive_number().is_some(),
                    NumericField::DdLimit => filters.dd_limit().is_some(),
                    NumericField::DdMin => filters.dd_min().is_some(),
                };
                Chip {
                    text: format!("{}: {}", field.label(), filters.input(field)),
                    on: committed,
                    editing: self.view.editing == Some(field),
                }
            })
            .collect();
        criteria_line.push(Chip::toggle("Head-first", filters.head_first_only()));
        criteria_line.push(Chip::toggle("Hide impossible", filters.hide_impossible()));
        criteria_line.push(Chip::toggle(
            if filters.advanced_open() { "Less" } else { "More" },
            filters.advanced_open(),
        ));

        let mut lines = vec![selection_line, criteria_line];
        if filters.advanced_open() {
            lines.push(vec![Chip::toggle("Ignore A dives", filters.ignore_a_dives())]);
        }
        lines
    }
}
