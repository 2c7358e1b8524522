use crate::math::Point2;

/// A pointer position in document coordinates, with modifier state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub point: Point2,
    /// Angle-snap modifier; also suppresses grid snapping.
    pub shift: bool,
}

impl PointerEvent {
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            shift: false,
        }
    }

    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point2::new(x, y))
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}
