//! Filter and sort: (record store, filter state) → ordered visible rows.
//!
//! Recomputed in full on every call. The store holds a few hundred rows, so a linear scan
//! followed by a stable sort is all the work there is.

use crate::dataset::record::{DiveRecord, Position};
use crate::dataset::RecordStore;
use crate::filter::state::FilterState;

const ALL_POSITIONS: &[Position] = &[Position::A, Position::B, Position::C, Position::D];
const WITHOUT_A: &[Position] = &[Position::B, Position::C, Position::D];

/// Records passing every active criterion, ordered by board, group, then dive number.
pub fn visible_records<'a>(store: &'a RecordStore, filters: &FilterState) -> Vec<&'a DiveRecord> {
    let mut visible: Vec<&DiveRecord> = store
        .records()
        .iter()
        .filter(|record| matches(record, filters))
        .collect();
    visible.sort_by_key(|record| record.sort_key());
    visible
}

/// Whether a single record passes every active criterion.
pub fn matches(record: &DiveRecord, filters: &FilterState) -> bool {
    if !filters.events().is_empty() && !filters.events().contains(&record.event()) {
        return false;
    }
    if !filters.boards().is_empty() && !filters.boards().contains(&record.board()) {
        return false;
    }
    // An empty group selection matches nothing.
    if !filters.groups().contains(&record.group()) {
        return false;
    }
    if let Some(number) = filters.dive_number() {
        if record.dive_number() != number {
            return false;
        }
    }
    if filters.head_first_only() && !record.is_head_first() {
        return false;
    }
    if filters.hide_impossible() && !record.has_valid_dd() {
        return false;
    }

    let considered = considered_positions(filters.ignore_a_dives());
    if let Some(limit) = filters.dd_limit() {
        if !any_difficulty(record, considered, |dd| dd <= limit) {
            return false;
        }
    }
    if let Some(min) = filters.dd_min() {
        if !any_difficulty(record, considered, |dd| dd >= min) {
            return false;
        }
    }
    true
}

/// Positions examined by the DD bounds. Ignoring A only affects the bounds.
fn considered_positions(ignore_a: bool) -> &'static [Position] {
    if ignore_a {
        WITHOUT_A
    } else {
        ALL_POSITIONS
    }
}

fn any_difficulty(
    record: &DiveRecord,
    positions: &[Position],
    predicate: impl Fn(f64) -> bool,
) -> bool {
    positions
        .iter()
        .filter_map(|&position| record.dd(position))
        .any(predicate)
}
