//! Dive records and the per-record derivation step.
//!
//! A [`RawDive`] mirrors one entry of the data asset. [`DiveRecord::derive`] turns it into
//! an immutable record carrying the parsed difficulty of each position slot, the board's
//! display rank, and the head-first / valid-DD flags used by the filter pipeline.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// All dive groups in display order.
pub const ALL_GROUPS: [u8; 6] = [1, 2, 3, 4, 5, 6];

/// Competition event a dive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Event {
    Springboard,
    Platform,
}

impl Event {
    pub const ALL: [Event; 2] = [Event::Springboard, Event::Platform];

    /// Boards that host this event, in display order.
    pub fn boards(self) -> &'static [Board] {
        match self {
            Event::Springboard => &[Board::OneMetre, Board::ThreeMetre],
            Event::Platform => &[Board::FiveMetre, Board::SevenHalfMetre, Board::TenMetre],
        }
    }

    /// Two-letter code used in the table's event column.
    pub fn short_code(self) -> &'static str {
        match self {
            Event::Springboard => "SP",
            Event::Platform => "PL",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Springboard => f.write_str("Springboard"),
            Event::Platform => f.write_str("Platform"),
        }
    }
}

impl FromStr for Event {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "springboard" | "sp" => Ok(Event::Springboard),
            "platform" | "pl" => Ok(Event::Platform),
            other => Err(format!(
                "unknown event '{other}' (expected springboard or platform)"
            )),
        }
    }
}

/// Board height. Variant order is the fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Board {
    #[serde(rename = "1m", alias = "1M")]
    OneMetre,
    #[serde(rename = "3m", alias = "3M")]
    ThreeMetre,
    #[serde(rename = "5m", alias = "5M")]
    FiveMetre,
    #[serde(rename = "7.5m", alias = "7.5M", alias = "7M")]
    SevenHalfMetre,
    #[serde(rename = "10m", alias = "10M")]
    TenMetre,
}

impl Board {
    /// Every board in display order.
    pub const ALL: [Board; 5] = [
        Board::OneMetre,
        Board::ThreeMetre,
        Board::FiveMetre,
        Board::SevenHalfMetre,
        Board::TenMetre,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Board::OneMetre => "1m",
            Board::ThreeMetre => "3m",
            Board::FiveMetre => "5m",
            Board::SevenHalfMetre => "7.5m",
            Board::TenMetre => "10m",
        }
    }

    /// Position of this board in the display order `[1m, 3m, 5m, 7.5m, 10m]`.
    pub fn order_index(self) -> usize {
        self as usize
    }

    pub fn event(self) -> Event {
        match self {
            Board::OneMetre | Board::ThreeMetre => Event::Springboard,
            _ => Event::Platform,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let normalized = normalized.strip_suffix('m').unwrap_or(&normalized);
        match normalized {
            "1" => Ok(Board::OneMetre),
            "3" => Ok(Board::ThreeMetre),
            "5" => Ok(Board::FiveMetre),
            "7.5" | "7" => Ok(Board::SevenHalfMetre),
            "10" => Ok(Board::TenMetre),
            _ => Err(format!(
                "unknown board '{}' (expected 1m, 3m, 5m, 7.5m or 10m)",
                s.trim()
            )),
        }
    }
}

/// Body position column of the difficulty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    A,
    B,
    C,
    D,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::A, Position::B, Position::C, Position::D];

    pub fn label(self) -> &'static str {
        match self {
            Position::A => "A",
            Position::B => "B",
            Position::C => "C",
            Position::D => "D",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One entry of the data asset, before derivation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDive {
    #[serde(rename = "Event")]
    pub event: Event,
    #[serde(rename = "Board")]
    pub board: Board,
    #[serde(rename = "Group")]
    pub group: u8,
    #[serde(rename = "Dive Number")]
    pub dive_number: u32,
    #[serde(rename = "Dive Description")]
    pub dive_description: String,
    #[serde(rename = "A", deserialize_with = "slot_text")]
    pub a: String,
    #[serde(rename = "B", deserialize_with = "slot_text")]
    pub b: String,
    #[serde(rename = "C", deserialize_with = "slot_text")]
    pub c: String,
    #[serde(rename = "D", deserialize_with = "slot_text")]
    pub d: String,
}

/// Slots are usually strings, but some exports write plain numbers.
fn slot_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Slot {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Slot::deserialize(deserializer)? {
        Slot::Text(text) => text,
        Slot::Number(number) => number.to_string(),
    })
}

/// Parse one difficulty slot.
///
/// `-` and `x` mark a position that is not performed. Anything else that does not parse
/// as a finite decimal is treated exactly like those sentinels.
pub fn parse_dd(slot: &str) -> Option<f64> {
    let trimmed = slot.trim();
    if trimmed == "-" || trimmed == "x" {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Immutable, derived dive record.
#[derive(Debug, Clone, PartialEq)]
pub struct DiveRecord {
    id: usize,
    event: Event,
    board: Board,
    group: u8,
    dive_number: u32,
    dive_description: String,
    slots: [String; 4],
    difficulty: [Option<f64>; 4],
    board_order_index: usize,
    is_head_first: bool,
    has_valid_dd: bool,
}

impl DiveRecord {
    /// Derive a record from its raw form. Total: unparseable slots degrade to `None`.
    pub fn derive(raw: RawDive, id: usize) -> Self {
        let slots = [raw.a, raw.b, raw.c, raw.d];
        let difficulty = [
            parse_dd(&slots[0]),
            parse_dd(&slots[1]),
            parse_dd(&slots[2]),
            parse_dd(&slots[3]),
        ];

        Self {
            id,
            event: raw.event,
            board: raw.board,
            group: raw.group,
            dive_number: raw.dive_number,
            dive_description: raw.dive_description,
            board_order_index: raw.board.order_index(),
            is_head_first: raw.dive_number % 10 % 2 == 1,
            has_valid_dd: difficulty.iter().any(Option::is_some),
            slots,
            difficulty,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn event(&self) -> Event {
        self.event
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn group(&self) -> u8 {
        self.group
    }

    pub fn dive_number(&self) -> u32 {
        self.dive_number
    }

    pub fn dive_description(&self) -> &str {
        &self.dive_description
    }

    /// Display string of a position slot, exactly as it appeared in the asset.
    pub fn slot(&self, position: Position) -> &str {
        &self.slots[position.index()]
    }

    /// Parsed difficulty of a position slot.
    pub fn dd(&self, position: Position) -> Option<f64> {
        self.difficulty[position.index()]
    }

    pub fn board_order_index(&self) -> usize {
        self.board_order_index
    }

    /// Head-first dives end in an odd digit.
    pub fn is_head_first(&self) -> bool {
        self.is_head_first
    }

    /// True when at least one position has a numeric difficulty.
    pub fn has_valid_dd(&self) -> bool {
        self.has_valid_dd
    }

    /// Sort key used by the pipeline: board rank, then group, then dive number.
    pub fn sort_key(&self) -> (usize, u8, u32) {
        (self.board_order_index, self.group, self.dive_number)
    }
}
