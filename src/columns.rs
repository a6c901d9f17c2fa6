//! Table columns: descriptors and the visibility state.
//!
//! Column visibility is independent of row filtering. Defaults depend on the viewport
//! width at startup only; after that the user toggles columns freely and resizes never
//! touch them.

use crate::dataset::record::{DiveRecord, Position};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed enumeration of table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnId {
    Event,
    Board,
    Group,
    DiveNumber,
    DiveDescription,
    A,
    B,
    C,
    D,
}

impl ColumnId {
    pub const ALL: [ColumnId; 9] = [
        ColumnId::Event,
        ColumnId::Board,
        ColumnId::Group,
        ColumnId::DiveNumber,
        ColumnId::DiveDescription,
        ColumnId::A,
        ColumnId::B,
        ColumnId::C,
        ColumnId::D,
    ];

    pub fn descriptor(self) -> ColumnDescriptor {
        let (label, width, resizable) = match self {
            ColumnId::Event => ("Event", 5, false),
            ColumnId::Board => ("Board", 5, false),
            ColumnId::Group => ("Group", 5, false),
            ColumnId::DiveNumber => ("Dive Number", 11, false),
            ColumnId::DiveDescription => ("Dive Description", 24, true),
            ColumnId::A => ("A", 4, false),
            ColumnId::B => ("B", 4, false),
            ColumnId::C => ("C", 4, false),
            ColumnId::D => ("D", 4, false),
        };
        ColumnDescriptor {
            id: self,
            label,
            width,
            resizable,
        }
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    /// The difficulty position shown in this column, if it is a DD column.
    pub fn position(self) -> Option<Position> {
        match self {
            ColumnId::A => Some(Position::A),
            ColumnId::B => Some(Position::B),
            ColumnId::C => Some(Position::C),
            ColumnId::D => Some(Position::D),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "event" => Ok(ColumnId::Event),
            "board" => Ok(ColumnId::Board),
            "group" => Ok(ColumnId::Group),
            "divenumber" | "number" => Ok(ColumnId::DiveNumber),
            "divedescription" | "description" => Ok(ColumnId::DiveDescription),
            "a" => Ok(ColumnId::A),
            "b" => Ok(ColumnId::B),
            "c" => Ok(ColumnId::C),
            "d" => Ok(ColumnId::D),
            _ => Err(format!("unknown column '{}'", s.trim())),
        }
    }
}

/// How a column is presented by the table surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub label: &'static str,
    /// Preferred width in terminal cells (minimum width when resizable).
    pub width: u16,
    /// Resizable columns absorb leftover horizontal space.
    pub resizable: bool,
}

impl ColumnDescriptor {
    /// Text of this column for `record`.
    pub fn cell(&self, record: &DiveRecord) -> String {
        match self.id {
            ColumnId::Event => record.event().short_code().to_string(),
            ColumnId::Board => record.board().label().to_string(),
            ColumnId::Group => record.group().to_string(),
            ColumnId::DiveNumber => record.dive_number().to_string(),
            ColumnId::DiveDescription => record.dive_description().to_string(),
            ColumnId::A => record.slot(Position::A).to_string(),
            ColumnId::B => record.slot(Position::B).to_string(),
            ColumnId::C => record.slot(Position::C).to_string(),
            ColumnId::D => record.slot(Position::D).to_string(),
        }
    }
}

/// Shown/hidden flag for every column plus the picker overlay state.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnVisibility {
    visible: BTreeMap<ColumnId, bool>,
    picker_open: bool,
}

impl ColumnVisibility {
    /// Defaults for a viewport `width` cells wide.
    ///
    /// Event and group start hidden; below `narrow_threshold` the description does too.
    pub fn for_viewport(width: u16, narrow_threshold: u16) -> Self {
        let narrow = width < narrow_threshold;
        let visible = ColumnId::ALL
            .iter()
            .map(|&id| {
                let shown = match id {
                    ColumnId::Event | ColumnId::Group => false,
                    ColumnId::DiveDescription => !narrow,
                    _ => true,
                };
                (id, shown)
            })
            .collect();
        Self {
            visible,
            picker_open: false,
        }
    }

    /// Show exactly the given columns.
    pub fn only(columns: &[ColumnId]) -> Self {
        let visible = ColumnId::ALL
            .iter()
            .map(|id| (*id, columns.contains(id)))
            .collect();
        Self {
            visible,
            picker_open: false,
        }
    }

    pub fn is_visible(&self, column: ColumnId) -> bool {
        self.visible.get(&column).copied().unwrap_or(true)
    }

    pub fn toggle(&mut self, column: ColumnId) {
        let entry = self.visible.entry(column).or_insert(true);
        *entry = !*entry;
    }

    /// Descriptors of the shown columns, in display order.
    pub fn visible_columns(&self) -> Vec<ColumnDescriptor> {
        ColumnId::ALL
            .iter()
            .filter(|id| self.is_visible(**id))
            .map(|id| id.descriptor())
            .collect()
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::RawDive;
    use crate::dataset::{Board, Event};

    fn ids(columns: &[ColumnDescriptor]) -> Vec<ColumnId> {
        columns.iter().map(|c| c.id).collect()
    }

    #[test]
    fn wide_defaults_hide_event_and_group() {
        let columns = ColumnVisibility::for_viewport(160, 100);
        assert_eq!(
            ids(&columns.visible_columns()),
            vec![
                ColumnId::Board,
                ColumnId::DiveNumber,
                ColumnId::DiveDescription,
                ColumnId::A,
                ColumnId::B,
                ColumnId::C,
                ColumnId::D,
            ]
        );
    }

    #[test]
    fn narrow_defaults_also_hide_description() {
        let columns = ColumnVisibility::for_viewport(60, 100);
        assert!(!columns.is_visible(ColumnId::DiveDescription));
        assert!(columns.is_visible(ColumnId::DiveNumber));
    }

    #[test]
    fn toggling_is_independent() {
        let mut columns = ColumnVisibility::for_viewport(60, 100);
        columns.toggle(ColumnId::DiveDescription);
        columns.toggle(ColumnId::Event);
        columns.toggle(ColumnId::A);
        assert!(columns.is_visible(ColumnId::DiveDescription));
        assert!(columns.is_visible(ColumnId::Event));
        assert!(!columns.is_visible(ColumnId::A));
    }

    #[test]
    fn picker_open_close() {
        let mut columns = ColumnVisibility::for_viewport(120, 100);
        assert!(!columns.picker_open());
        columns.toggle_picker();
        assert!(columns.picker_open());
        columns.close_picker();
        assert!(!columns.picker_open());
    }

    #[test]
    fn cells_render_record_fields() {
        let record = DiveRecord::derive(
            RawDive {
                event: Event::Platform,
                board: Board::SevenHalfMetre,
                group: 6,
                dive_number: 612,
                dive_description: "Armstand Forward Somersault".to_string(),
                a: "1.8".to_string(),
                b: "1.7".to_string(),
                c: "1.6".to_string(),
                d: "-".to_string(),
            },
            0,
        );
        assert_eq!(ColumnId::Event.descriptor().cell(&record), "PL");
        assert_eq!(ColumnId::Board.descriptor().cell(&record), "7.5m");
        assert_eq!(ColumnId::DiveNumber.descriptor().cell(&record), "612");
        assert_eq!(ColumnId::D.descriptor().cell(&record), "-");
        assert!(ColumnId::DiveDescription.descriptor().resizable);
    }

    #[test]
    fn column_names_parse() {
        assert_eq!("dive-number".parse::<ColumnId>(), Ok(ColumnId::DiveNumber));
        assert_eq!("Description".parse::<ColumnId>(), Ok(ColumnId::DiveDescription));
        assert_eq!("b".parse::<ColumnId>(), Ok(ColumnId::B));
        assert!("depth".parse::<ColumnId>().is_err());
    }
}
