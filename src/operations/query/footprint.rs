use crate::math::polygon_2d::point_in_convex_polygon;
use crate::math::Point2;
use crate::topology::WallData;

/// Slack for points sitting exactly on a footprint edge.
const FOOTPRINT_TOLERANCE: f64 = 1e-6;

/// Returns true if `point` falls within the wall's footprint, the
/// quadrilateral spanned by its four cached corners.
#[must_use]
pub fn is_point_in_wall(wall: &WallData, point: &Point2) -> bool {
    point_in_convex_polygon(point, &wall.corners.outline(), FOOTPRINT_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::WallKind;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn footprint_spans_thickness() {
        let w = WallData::new(p(100.0, 0.0), p(100.0, 100.0), 10.0, WallKind::Wall);
        assert!(is_point_in_wall(&w, &p(98.0, 50.0)));
        assert!(is_point_in_wall(&w, &p(104.9, 0.5)));
        assert!(!is_point_in_wall(&w, &p(50.0, 5.0)));
        assert!(!is_point_in_wall(&w, &p(106.0, 50.0)));
    }

    #[test]
    fn thin_divider_contains_its_centerline() {
        let w = WallData::new(p(0.0, 0.0), p(10.0, 0.0), 0.005, WallKind::Divider);
        assert!(is_point_in_wall(&w, &p(5.0, 0.0)));
        assert!(!is_point_in_wall(&w, &p(5.0, 0.1)));
    }
}
