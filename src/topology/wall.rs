use serde::{Deserialize, Serialize};

use crate::math::angle_2d::direction_deg;
use crate::math::distance_2d::{distance, points_approx_equal};
use crate::math::{Point2, Vector2};

slotmap::new_key_type! {
    /// Unique identifier for a wall in the floorplan store.
    pub struct WallId;
}

/// Whether a wall is a physical wall or a room divider.
///
/// Dividers miter exactly like walls but never against the other kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    Wall,
    Divider,
}

/// One end of a wall's centerline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallEnd {
    Start,
    End,
}

impl WallEnd {
    /// The opposite end.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// One of the four cached footprint corners of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerSlot {
    Smpt1,
    Smpt2,
    Empt1,
    Empt2,
}

/// The four footprint corners of a wall.
///
/// `*1` corners sit on the left-normal side of `start → end` (rotated +90°
/// in document coordinates), `*2` corners on the opposite side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallCorners {
    pub smpt1: Point2,
    pub smpt2: Point2,
    pub empt1: Point2,
    pub empt2: Point2,
}

impl WallCorners {
    /// Default rectangular corners: both endpoints offset by half the
    /// thickness perpendicular to the wall direction.
    ///
    /// A zero-length centerline collapses all four corners onto the endpoints.
    #[must_use]
    pub fn perpendicular(start: &Point2, end: &Point2, thickness: f64) -> Self {
        let d = end - start;
        let len = d.norm();
        if len < 1e-12 {
            return Self {
                smpt1: *start,
                smpt2: *start,
                empt1: *end,
                empt2: *end,
            };
        }
        let normal = Vector2::new(-d.y, d.x) / len * (thickness * 0.5);
        Self {
            smpt1: start + normal,
            smpt2: start - normal,
            empt1: end + normal,
            empt2: end - normal,
        }
    }

    /// Returns the corner in `slot`.
    #[must_use]
    pub fn get(&self, slot: CornerSlot) -> Point2 {
        match slot {
            CornerSlot::Smpt1 => self.smpt1,
            CornerSlot::Smpt2 => self.smpt2,
            CornerSlot::Empt1 => self.empt1,
            CornerSlot::Empt2 => self.empt2,
        }
    }

    /// Overwrites the corner in `slot`.
    pub fn set(&mut self, slot: CornerSlot, point: Point2) {
        match slot {
            CornerSlot::Smpt1 => self.smpt1 = point,
            CornerSlot::Smpt2 => self.smpt2 = point,
            CornerSlot::Empt1 => self.empt1 = point,
            CornerSlot::Empt2 => self.empt2 = point,
        }
    }

    /// Footprint outline in boundary order.
    #[must_use]
    pub fn outline(&self) -> [Point2; 4] {
        [self.smpt1, self.empt1, self.empt2, self.smpt2]
    }
}

/// A thick wall segment.
///
/// `corners` is a cache derived from the centerline and thickness, then
/// adjusted at junctions by mitering. Moving an endpoint through
/// [`WallData::set_endpoint`] resets it to the perpendicular default.
#[derive(Debug, Clone)]
pub struct WallData {
    start: Point2,
    end: Point2,
    thickness: f64,
    pub corners: WallCorners,
    pub kind: WallKind,
    pub color: String,
    /// The wall this one replaced through a split or join, if any.
    pub origin: Option<WallId>,
}

impl WallData {
    /// Creates a wall with perpendicular corners.
    #[must_use]
    pub fn new(start: Point2, end: Point2, thickness: f64, kind: WallKind) -> Self {
        Self {
            start,
            end,
            thickness,
            corners: WallCorners::perpendicular(&start, &end, thickness),
            kind,
            color: "lightgray".to_owned(),
            origin: None,
        }
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// A new wall over `start`–`end` with this wall's thickness, kind and color.
    #[must_use]
    pub fn derive(&self, start: Point2, end: Point2) -> Self {
        Self {
            color: self.color.clone(),
            ..Self::new(start, end, self.thickness, self.kind)
        }
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Returns the endpoint at `end`.
    #[must_use]
    pub fn endpoint(&self, end: WallEnd) -> Point2 {
        match end {
            WallEnd::Start => self.start,
            WallEnd::End => self.end,
        }
    }

    /// Moves one endpoint and resets the corners to their perpendicular
    /// defaults.
    pub fn set_endpoint(&mut self, end: WallEnd, point: Point2) {
        match end {
            WallEnd::Start => self.start = point,
            WallEnd::End => self.end = point,
        }
        self.premiter();
    }

    /// Recomputes all four corners from the centerline.
    pub fn premiter(&mut self) {
        self.corners = WallCorners::perpendicular(&self.start, &self.end, self.thickness);
    }

    /// Recomputes only the two corners at `end`.
    pub fn premiter_end(&mut self, end: WallEnd) {
        let fresh = WallCorners::perpendicular(&self.start, &self.end, self.thickness);
        match end {
            WallEnd::Start => {
                self.corners.smpt1 = fresh.smpt1;
                self.corners.smpt2 = fresh.smpt2;
            }
            WallEnd::End => {
                self.corners.empt1 = fresh.empt1;
                self.corners.empt2 = fresh.empt2;
            }
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// Direction of `start → end` in degrees.
    #[must_use]
    pub fn direction_deg(&self) -> f64 {
        direction_deg(&self.start, &self.end)
    }

    /// Which end, if any, sits at `point` (within point tolerance).
    #[must_use]
    pub fn end_at(&self, point: &Point2) -> Option<WallEnd> {
        if points_approx_equal(&self.start, point) {
            Some(WallEnd::Start)
        } else if points_approx_equal(&self.end, point) {
            Some(WallEnd::End)
        } else {
            None
        }
    }

    /// The endpoint away from `point`: the end if the start is at `point`,
    /// otherwise the start.
    #[must_use]
    pub fn far_endpoint(&self, point: &Point2) -> Point2 {
        if points_approx_equal(&self.start, point) {
            self.end
        } else {
            self.start
        }
    }

    /// Returns true if either endpoint of `self` coincides with either
    /// endpoint of `other`.
    #[must_use]
    pub fn shares_endpoint_with(&self, other: &WallData) -> bool {
        self.end_at(&other.start).is_some() || self.end_at(&other.end).is_some()
    }
}
