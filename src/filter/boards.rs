//! Which boards can be selected for a given event selection.

use crate::dataset::{Board, Event};
use std::collections::BTreeSet;

/// Boards selectable under the current event selection, in display order.
///
/// No events or both events leave every board available; a single event narrows the list
/// to that event's boards.
pub fn available_boards(selected_events: &BTreeSet<Event>) -> Vec<Board> {
    if selected_events.len() == 1 {
        let only = selected_events.iter().next().copied();
        if let Some(event) = only {
            return event.boards().to_vec();
        }
    }
    Board::ALL.to_vec()
}
