use core::fmt;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

use crate::*;

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// What a cell contains. Everything is `Empty` until mines are placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Empty,
    Number,
    Mine,
}

/// Stable identifier of a cell, unique within a board. Displays as `x-y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub Coord2);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0.0, self.0.1)
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
    pub state: CellState,
    pub kind: CellKind,
    pub mine_count: u8,
    pub is_mine: bool,
}

/// Serialized with its derived `id` so renderers can key on it.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut cell = serializer.serialize_struct("Cell", 7)?;
        cell.serialize_field("id", &self.id())?;
        cell.serialize_field("x", &self.x)?;
        cell.serialize_field("y", &self.y)?;
        cell.serialize_field("state", &self.state)?;
        cell.serialize_field("type", &self.kind)?;
        cell.serialize_field("mineCount", &self.mine_count)?;
        cell.serialize_field("isMine", &self.is_mine)?;
        cell.end()
    }
}

impl Cell {
    pub const fn new((x, y): Coord2) -> Self {
        Self {
            x,
            y,
            state: CellState::Hidden,
            kind: CellKind::Empty,
            mine_count: 0,
            is_mine: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub const fn id(&self) -> CellId {
        CellId(self.coords())
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    /// Revealed and showing a non-zero count, the only cells that can be chorded.
    pub const fn is_revealed_number(&self) -> bool {
        self.is_revealed() && matches!(self.kind, CellKind::Number)
    }

    /// Sets the mine flag and adjacent count, keeping `kind` consistent with both.
    pub(crate) fn arm(&mut self, is_mine: bool, mine_count: u8) {
        self.is_mine = is_mine;
        if is_mine {
            self.mine_count = 0;
            self.kind = CellKind::Mine;
        } else {
            self.mine_count = mine_count;
            self.kind = if mine_count > 0 {
                CellKind::Number
            } else {
                CellKind::Empty
            };
        }
    }
}
