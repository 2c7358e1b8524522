use crate::math::distance_2d::{distance, project_onto_segment};
use crate::math::Point2;
use crate::operations::query::is_point_in_wall;
use crate::topology::{FloorplanStore, WallId};

/// Result of snapping a point against the existing walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSnap {
    pub point: Point2,
    /// The point fell inside a wall's footprint and was moved onto its centerline.
    pub projected: bool,
    /// The point was moved onto a wall endpoint.
    pub at_endpoint: bool,
}

impl WallSnap {
    #[must_use]
    pub fn snapped(&self) -> bool {
        self.projected || self.at_endpoint
    }
}

/// Pulls `point` onto nearby walls, visiting every wall except `skip`.
///
/// A point inside a wall's footprint is projected onto its centerline; a
/// point closer than `endpoint_distance` to a wall endpoint becomes that
/// endpoint. Each wall sees the point as left by the walls before it.
#[must_use]
pub fn snap_to_walls(
    store: &FloorplanStore,
    point: Point2,
    skip: Option<WallId>,
    endpoint_distance: f64,
) -> WallSnap {
    let mut snap = WallSnap {
        point,
        projected: false,
        at_endpoint: false,
    };
    for (id, w) in store.walls() {
        if Some(id) == skip {
            continue;
        }
        let (s, e) = (w.start(), w.end());
        if is_point_in_wall(w, &snap.point) {
            snap.point = project_onto_segment(&snap.point, &s, &e);
            snap.projected = true;
        }
        if distance(&s, &snap.point) < endpoint_distance {
            snap.point = s;
            snap.at_endpoint = true;
        } else if distance(&e, &snap.point) < endpoint_distance {
            snap.point = e;
            snap.at_endpoint = true;
        }
    }
    snap
}

/// Rounds both coordinates to the nearest multiple of `grid_size`.
#[must_use]
pub fn snap_to_grid(point: &Point2, grid_size: f64) -> Point2 {
    if grid_size <= 0.0 {
        return *point;
    }
    Point2::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::{WallData, WallKind};
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn grid_rounding() {
        let q = snap_to_grid(&p(14.0, -6.0), 10.0);
        assert_abs_diff_eq!(q.x, 10.0);
        assert_abs_diff_eq!(q.y, -10.0);
    }

    #[test]
    fn point_in_footprint_lands_on_centerline() {
        let mut store = FloorplanStore::new();
        store
            .add_wall(WallData::new(p(100.0, 0.0), p(100.0, 100.0), 10.0, WallKind::Wall))
            .unwrap();
        let snap = snap_to_walls(&store, p(98.0, 50.0), None, 10.0);
        assert!(snap.projected && !snap.at_endpoint);
        assert_abs_diff_eq!(snap.point.x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(snap.point.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn near_endpoint_snaps_exactly() {
        let mut store = FloorplanStore::new();
        let w = store
            .add_wall(WallData::new(p(0.0, 0.0), p(100.0, 0.0), 10.0, WallKind::Wall))
            .unwrap();
        let snap = snap_to_walls(&store, p(108.0, 9.0), None, 15.0);
        assert!(snap.at_endpoint);
        assert_eq!(snap.point, p(100.0, 0.0));
        assert!(!snap_to_walls(&store, p(108.0, 9.0), Some(w), 15.0).snapped());
    }
}
