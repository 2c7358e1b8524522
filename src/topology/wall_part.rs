use crate::math::Point2;

use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a door or window in the floorplan store.
    pub struct WallPartId;
}

/// What kind of opening a wall part is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallPartKind {
    Door,
    Window,
}

/// A door or window hosted by exactly one wall.
///
/// `location` is the part's center and must project strictly inside its
/// host wall's segment. `height` is the opening depth and always mirrors the
/// host's thickness.
#[derive(Debug, Clone)]
pub struct WallPartData {
    pub wall: WallId,
    pub kind: WallPartKind,
    pub location: Point2,
    pub length: f64,
    pub height: f64,
}

impl WallPartData {
    /// Creates a wall part on `wall` centered at `location`.
    #[must_use]
    pub fn new(wall: WallId, kind: WallPartKind, location: Point2, length: f64, height: f64) -> Self {
        Self {
            wall,
            kind,
            location,
            length,
            height,
        }
    }
}
