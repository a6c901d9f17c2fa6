//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait the session draws through, and its terminal
//! lifecycle hooks.

use crate::error::Result;
use crate::render::ui::state::TableView;

/// Core trait for drawing the dive table
pub trait UIRenderer {
    /// Draw one frame: toolbar, header, body page, status line and any open overlay.
    fn render(&mut self, table: &TableView<'_>) -> Result<()>;

    /// Enter raw mode and the alternate screen.
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal. Safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal dimensions as (width, height)
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
