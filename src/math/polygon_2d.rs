use super::Point2;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise in a y-up frame.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns true if `p` lies inside or on the boundary of a convex polygon
/// within `tolerance`.
///
/// Works for either winding. Degenerate (zero-area) polygons collapse to a
/// distance-to-boundary test so a zero-thickness footprint still contains
/// points on its centerline.
#[must_use]
pub fn point_in_convex_polygon(p: &Point2, polygon: &[Point2], tolerance: f64) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }
    if signed_area_2d(polygon).abs() < 1e-12 {
        return (0..n).any(|i| {
            let a = &polygon[i];
            let b = &polygon[(i + 1) % n];
            super::distance_2d::point_to_segment_dist(p, a, b) <= tolerance
        });
    }
    let sign = signed_area_2d(polygon).signum();
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        let edge = b - a;
        let len = edge.norm();
        if len < 1e-12 {
            continue;
        }
        // Signed distance of p from the edge, positive towards the interior.
        let side = sign * edge.perp(&(p - a)) / len;
        if side < -tolerance {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn rect() -> Vec<Point2> {
        vec![p(95.0, 0.0), p(95.0, 100.0), p(105.0, 100.0), p(105.0, 0.0)]
    }

    #[test]
    fn inside_and_outside_rectangle() {
        assert!(point_in_convex_polygon(&p(98.0, 50.0), &rect(), 1e-9));
        assert!(!point_in_convex_polygon(&p(50.0, 5.0), &rect(), 1e-9));
        assert!(!point_in_convex_polygon(&p(100.0, 101.0), &rect(), 1e-9));
    }

    #[test]
    fn winding_does_not_matter() {
        let mut r = rect();
        r.reverse();
        assert!(point_in_convex_polygon(&p(98.0, 50.0), &r, 1e-9));
    }

    #[test]
    fn boundary_counts_as_inside() {
        assert!(point_in_convex_polygon(&p(95.0, 50.0), &rect(), 1e-9));
    }

    #[test]
    fn degenerate_polygon_contains_its_segment() {
        let line = vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 0.0), p(0.0, 0.0)];
        assert!(point_in_convex_polygon(&p(4.0, 0.0), &line, 1e-6));
        assert!(!point_in_convex_polygon(&p(4.0, 1.0), &line, 1e-6));
    }

    #[test]
    fn signed_area_square() {
        let sq = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert!((signed_area_2d(&sq) - 1.0).abs() < 1e-12);
    }
}
