//! High-level input service.
//!
//! Runs the modal key map over raw events and yields domain-level [`InputAction`]s that the
//! session applies to its filter, column and view state.

use crate::columns::ColumnId;
use crate::dataset::Event as DiveEvent;
use crate::error::Result;
use crate::filter::NumericField;
use crate::input::raw::{RawInputCollector, RawInputEvent, ScrollDirection};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    EditField(NumericField),
    ColumnPicker,
    Help,
}

/// Actions emitted by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    MoveSelection {
        direction: ScrollDirection,
        rows: usize,
    },
    PageUp,
    PageDown,
    First,
    Last,
    SelectEvent(DiveEvent),
    SelectAllEvents,
    /// Toggle the n-th (0-based) currently available board.
    ToggleBoardSlot(usize),
    SelectAllBoards,
    ToggleGroup(u8),
    BeginEdit(NumericField),
    EditInsert {
        field: NumericField,
        ch: char,
    },
    EditBackspace(NumericField),
    EditClear(NumericField),
    /// Commit the field immediately (Enter).
    ConfirmEdit(NumericField),
    /// Leave the field without committing; its debounce keeps running.
    LeaveEdit(NumericField),
    ToggleHeadFirst,
    ToggleHideImpossible,
    ToggleIgnoreA,
    ToggleAdvanced,
    OpenColumnPicker,
    CloseColumnPicker,
    ToggleColumn(ColumnId),
    ShowHelp,
    HideHelp,
    Reset,
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
    NoAction,
}

/// Key map with one mode active at a time.
pub struct InputStateMachine {
    mode: InputMode,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            mode: InputMode::Browse,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> InputAction {
        if key.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return InputAction::Quit;
        }

        match self.mode {
            InputMode::Browse => self.browse_key(key),
            InputMode::EditField(field) => self.edit_key(field, key),
            InputMode::ColumnPicker => self.picker_key(key),
            InputMode::Help => {
                self.mode = InputMode::Browse;
                InputAction::HideHelp
            }
        }
    }

    fn browse_key(&mut self, key: KeyEvent) -> InputAction {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return InputAction::NoAction;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => InputAction::MoveSelection {
                direction: ScrollDirection::Down,
                rows: 1,
            },
            KeyCode::Char('k') | KeyCode::Up => InputAction::MoveSelection {
                direction: ScrollDirection::Up,
                rows: 1,
            },
            KeyCode::PageDown | KeyCode::Char(' ') => InputAction::PageDown,
            KeyCode::PageUp | KeyCode::Char('b') => InputAction::PageUp,
            KeyCode::Home | KeyCode::Char('g') => InputAction::First,
            KeyCode::End | KeyCode::Char('G') => InputAction::Last,

            KeyCode::Char('s') => InputAction::SelectEvent(DiveEvent::Springboard),
            KeyCode::Char('p') => InputAction::SelectEvent(DiveEvent::Platform),
            KeyCode::Char('e') => InputAction::SelectAllEvents,
            KeyCode::Char(ch @ '1'..='5') => {
                InputAction::ToggleBoardSlot(ch as usize - '1' as usize)
            }
            KeyCode::Char('a') => InputAction::SelectAllBoards,
            KeyCode::F(n @ 1..=6) => InputAction::ToggleGroup(n),
            KeyCode::Char(ch @ ('!' | '@' | '#' | '$' | '%' | '^')) => {
                shifted_digit_group(ch).map_or(InputAction::NoAction, InputAction::ToggleGroup)
            }

            KeyCode::Char('n') => self.begin_edit(NumericField::DiveNumber),
            KeyCode::Char('l') => self.begin_edit(NumericField::DdLimit),
            KeyCode::Char('m') => self.begin_edit(NumericField::DdMin),

            KeyCode::Char('h') => InputAction::ToggleHeadFirst,
            KeyCode::Char('i') => InputAction::ToggleHideImpossible,
            KeyCode::Char('A') => InputAction::ToggleIgnoreA,
            KeyCode::Char('f') => InputAction::ToggleAdvanced,
            KeyCode::Char('c') => {
                self.mode = InputMode::ColumnPicker;
                InputAction::OpenColumnPicker
            }
            KeyCode::Char('r') => InputAction::Reset,
            KeyCode::Char('?') => {
                self.mode = InputMode::Help;
                InputAction::ShowHelp
            }
            KeyCode::Char('q') => InputAction::Quit,
            _ => InputAction::NoAction,
        }
    }

    fn begin_edit(&mut self, field: NumericField) -> InputAction {
        self.mode = InputMode::EditField(field);
        InputAction::BeginEdit(field)
    }

    fn edit_key(&mut self, field: NumericField, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => {
                self.mode = InputMode::Browse;
                InputAction::ConfirmEdit(field)
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.mode = InputMode::Browse;
                InputAction::LeaveEdit(field)
            }
            KeyCode::Backspace => InputAction::EditBackspace(field),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::EditClear(field)
            }
            KeyCode::Char(ch)
                if ch.is_ascii_graphic()
                    && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                InputAction::EditInsert { field, ch }
            }
            _ => InputAction::NoAction,
        }
    }

    fn picker_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('q') => {
                self.mode = InputMode::Browse;
                InputAction::CloseColumnPicker
            }
            KeyCode::Char(ch @ '1'..='9') => {
                let index = ch as usize - '1' as usize;
                ColumnId::ALL
                    .get(index)
                    .map_or(InputAction::NoAction, |id| InputAction::ToggleColumn(*id))
            }
            _ => InputAction::NoAction,
        }
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// `!@#$%^` are shift+1..6 on a US layout; they toggle groups.
fn shifted_digit_group(ch: char) -> Option<u8> {
    match ch {
        '!' => Some(1),
        '@' => Some(2),
        '#' => Some(3),
        '$' => Some(4),
        '%' => Some(5),
        '^' => Some(6),
        _ => None,
    }
}

/// Produces `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            raw_input: RawInputCollector::new(),
        }
    }

    /// Poll the terminal and drain everything that is ready.
    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();
        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.translate(raw_event));
            while let Some(extra) = self.raw_input.try_next() {
                actions.extend(self.translate(extra));
            }
        }
        Ok(actions)
    }

    /// Feed a synthetic event and drain resulting actions.
    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);
        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.try_next() {
            actions.extend(self.translate(raw_event));
        }
        actions
    }

    pub fn mode(&self) -> InputMode {
        self.state_machine.mode()
    }

    fn translate(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key) => self.state_machine.handle_key_event(key),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Wheel { direction, rows } => {
                InputAction::MoveSelection { direction, rows }
            }
        };
        match action {
            InputAction::NoAction => None,
            action => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}
