//! Rendering subsystem.

pub mod ui;

pub use ui::{ColorTheme, TableView, TerminalUI, UIRenderer, ViewState};
