use crate::math::distance_2d::{distance, is_point_on_segment};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::Point2;
use crate::topology::{FloorplanStore, WallId};

/// Finds the wall a proposed segment would run into first.
///
/// The segment goes from a fixed `anchor` (the stationary end of a wall being
/// reshaped or built) to a `proposed` point. Among the walls it meets, the
/// one whose crossing is nearest the anchor wins. Walls the anchor already
/// lies on are skipped, since ending on them would stack two walls.
pub struct ClosestCrossingWall {
    anchor: Point2,
    proposed: Point2,
    exclude: Vec<WallId>,
}

impl ClosestCrossingWall {
    /// Creates a new `ClosestCrossingWall` query.
    #[must_use]
    pub fn new(anchor: Point2, proposed: Point2) -> Self {
        Self {
            anchor,
            proposed,
            exclude: Vec::new(),
        }
    }

    /// Ignores the given walls.
    #[must_use]
    pub fn excluding(mut self, walls: impl IntoIterator<Item = WallId>) -> Self {
        self.exclude.extend(walls);
        self
    }

    /// Executes the query, returning the wall and the crossing point.
    #[must_use]
    pub fn execute(&self, store: &FloorplanStore) -> Option<(WallId, Point2)> {
        let mut closest: Option<(WallId, Point2)> = None;
        let mut closest_distance = f64::MAX;
        for (id, w) in store.walls() {
            if self.exclude.contains(&id) {
                continue;
            }
            if is_point_on_segment(&w.start(), &w.end(), &self.anchor) {
                continue;
            }
            let Some(ip) =
                segment_segment_intersect_2d(&self.anchor, &self.proposed, &w.start(), &w.end())
            else {
                continue;
            };
            let d = distance(&self.anchor, &ip);
            if d < closest_distance {
                closest_distance = d;
                closest = Some((id, ip));
            }
        }
        closest
    }
}
