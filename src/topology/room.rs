use serde::{Deserialize, Serialize};

use super::wall::{CornerSlot, WallId};

slotmap::new_key_type! {
    /// Unique identifier for a room in the floorplan store.
    pub struct RoomId;
}

/// Which of a wall's two offset sides faces a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MiterSide {
    One,
    Two,
}

impl MiterSide {
    /// Start and end corner slots lying on this side.
    #[must_use]
    pub fn slots(self) -> (CornerSlot, CornerSlot) {
        match self {
            Self::One => (CornerSlot::Smpt1, CornerSlot::Empt1),
            Self::Two => (CornerSlot::Smpt2, CornerSlot::Empt2),
        }
    }

    /// Numeric form used in `[wallId, side]` records.
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// One `(wall, side)` entry of a room's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryEntry {
    pub wall: WallId,
    pub side: MiterSide,
}

impl BoundaryEntry {
    #[must_use]
    pub fn new(wall: WallId, side: MiterSide) -> Self {
        Self { wall, side }
    }
}

/// A room, known here only by the ordered walls bounding it.
///
/// Polygon construction belongs to the host; this engine only keeps the
/// list free of references to destroyed walls.
#[derive(Debug, Clone, Default)]
pub struct RoomData {
    pub name: String,
    pub boundary_walls: Vec<BoundaryEntry>,
}

impl RoomData {
    #[must_use]
    pub fn new(name: impl Into<String>, boundary_walls: Vec<BoundaryEntry>) -> Self {
        Self {
            name: name.into(),
            boundary_walls,
        }
    }

    /// Returns true if any entry references `wall`.
    #[must_use]
    pub fn references(&self, wall: WallId) -> bool {
        self.boundary_walls.iter().any(|e| e.wall == wall)
    }
}
