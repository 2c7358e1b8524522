use crate::error::Result;
use crate::math::distance_2d::{is_point_on_segment, points_approx_equal};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::Point2;
use crate::topology::{FloorplanStore, WallData, WallId, WallKind};

/// Centerline intersection of two walls.
///
/// `None` when the walls are parallel or their segments do not meet; this is
/// an expected outcome, not an error.
#[must_use]
pub fn walls_intersection(a: &WallData, b: &WallData) -> Option<Point2> {
    segment_segment_intersect_2d(&a.start(), &a.end(), &b.start(), &b.end())
}

/// Finds every wall whose centerline passes through a point.
///
/// This includes walls with an endpoint at the point as well as walls the
/// point lies inside of (T-junctions).
pub struct WallsAtPoint {
    point: Point2,
    kind: Option<WallKind>,
}

impl WallsAtPoint {
    /// Creates a new `WallsAtPoint` query over walls of every kind.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point, kind: None }
    }

    /// Restricts the query to walls of one kind.
    #[must_use]
    pub fn of_kind(mut self, kind: WallKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self, store: &FloorplanStore) -> Vec<WallId> {
        store
            .walls_near(&self.point, 1.0)
            .into_iter()
            .filter(|&id| {
                store.wall(id).is_ok_and(|w| {
                    self.kind.is_none_or(|k| w.kind == k)
                        && is_point_on_segment(&w.start(), &w.end(), &self.point)
                })
            })
            .collect()
    }
}

/// Every point where two walls meet, deduplicated within point tolerance.
#[must_use]
pub fn all_intersection_points(store: &FloorplanStore) -> Vec<Point2> {
    let walls: Vec<(WallId, &WallData)> = store.walls().collect();
    let mut points: Vec<Point2> = Vec::new();
    for (i, (_, a)) in walls.iter().enumerate() {
        for (_, b) in walls.iter().skip(i + 1) {
            if let Some(ip) = walls_intersection(a, b) {
                if !points.iter().any(|q| points_approx_equal(q, &ip)) {
                    points.push(ip);
                }
            }
        }
    }
    points
}

/// Returns true if the two walls share at least one endpoint.
///
/// # Errors
///
/// Returns an error if either wall is not found.
pub fn walls_share_endpoint(store: &FloorplanStore, a: WallId, b: WallId) -> Result<bool> {
    Ok(store.wall(a)?.shares_endpoint_with(store.wall(b)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn add(store: &mut FloorplanStore, a: Point2, b: Point2) -> WallId {
        store.add_wall(WallData::new(a, b, 10.0, WallKind::Wall)).unwrap()
    }

    #[test]
    fn walls_at_corner_and_t_junction() {
        let mut store = FloorplanStore::new();
        let w1 = add(&mut store, p(0.0, 0.0), p(100.0, 0.0));
        let w2 = add(&mut store, p(100.0, 0.0), p(100.0, 100.0));
        let w3 = add(&mut store, p(50.0, 0.0), p(50.0, 60.0));

        let mut at_corner = WallsAtPoint::new(p(100.0, 0.0)).execute(&store);
        at_corner.sort();
        let mut expected = vec![w1, w2];
        expected.sort();
        assert_eq!(at_corner, expected);

        let mut at_t = WallsAtPoint::new(p(50.0, 0.0)).execute(&store);
        at_t.sort();
        let mut expected = vec![w1, w3];
        expected.sort();
        assert_eq!(at_t, expected);
    }

    #[test]
    fn kind_filter_excludes_dividers() {
        let mut store = FloorplanStore::new();
        let w = add(&mut store, p(0.0, 0.0), p(10.0, 0.0));
        store
            .add_wall(WallData::new(p(10.0, 0.0), p(10.0, 10.0), 0.005, WallKind::Divider))
            .unwrap();
        let walls = WallsAtPoint::new(p(10.0, 0.0))
            .of_kind(WallKind::Wall)
            .execute(&store);
        assert_eq!(walls, vec![w]);
    }

    #[test]
    fn intersection_points_of_a_square_are_its_corners() {
        let mut store = FloorplanStore::new();
        add(&mut store, p(0.0, 0.0), p(10.0, 0.0));
        add(&mut store, p(10.0, 0.0), p(10.0, 10.0));
        add(&mut store, p(10.0, 10.0), p(0.0, 10.0));
        add(&mut store, p(0.0, 10.0), p(0.0, 0.0));
        assert_eq!(all_intersection_points(&store).len(), 4);
    }

    #[test]
    fn shared_endpoint_detection() {
        let mut store = FloorplanStore::new();
        let a = add(&mut store, p(0.0, 0.0), p(10.0, 0.0));
        let b = add(&mut store, p(10.0, 0.0), p(10.0, 10.0));
        let c = add(&mut store, p(5.0, 0.0), p(5.0, 10.0));
        assert!(walls_share_endpoint(&store, a, b).unwrap());
        assert!(!walls_share_endpoint(&store, a, c).unwrap());
    }
}
