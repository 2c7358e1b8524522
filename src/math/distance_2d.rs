use super::{Point2, POINT_TOLERANCE, SEGMENT_TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Returns true if `p` and `q` differ by less than [`POINT_TOLERANCE`] on both axes.
#[must_use]
pub fn points_approx_equal(p: &Point2, q: &Point2) -> bool {
    (q.x - p.x).abs() < POINT_TOLERANCE && (q.y - p.y).abs() < POINT_TOLERANCE
}

/// Returns true if `c` lies on the segment `a`–`b`.
///
/// Uses `|ac| + |cb| ≈ |ab|`, which checks collinearity and betweenness at
/// once and tolerates rounding in the stored coordinates.
#[must_use]
pub fn is_point_on_segment(a: &Point2, b: &Point2, c: &Point2) -> bool {
    let ac = distance(a, c);
    let cb = distance(c, b);
    let ab = distance(a, b);
    (ac + cb - ab).abs() <= SEGMENT_TOLERANCE
}

/// Parameter `t` in `[0, 1]` of the point on `a`–`b` closest to `p`.
///
/// Zero-length segments return `0.0`.
#[must_use]
pub fn segment_param(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return 0.0;
    }
    ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0)
}

/// Projects `p` onto the segment `a`–`b`, clamping to the endpoints.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let t = segment_param(p, a, b);
    a + (b - a) * t
}

/// Returns the minimum distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    distance(p, &project_onto_segment(p, a, b))
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to the point distance when `a` and `b` coincide.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < 1e-12 {
        return distance(p, a);
    }
    (d.perp(&(p - a)) / len).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn approx_equal_within_tolerance() {
        assert!(points_approx_equal(&p(1.0, 1.0), &p(1.04, 0.96)));
        assert!(!points_approx_equal(&p(1.0, 1.0), &p(1.06, 1.0)));
    }

    #[test]
    fn point_on_segment_interior_and_endpoints() {
        let a = p(0.0, 0.0);
        let b = p(10.0, 0.0);
        assert!(is_point_on_segment(&a, &b, &p(5.0, 0.0)));
        assert!(is_point_on_segment(&a, &b, &a));
        assert!(is_point_on_segment(&a, &b, &b));
    }

    #[test]
    fn point_off_segment() {
        let a = p(0.0, 0.0);
        let b = p(10.0, 0.0);
        assert!(!is_point_on_segment(&a, &b, &p(5.0, 2.0)));
        assert!(!is_point_on_segment(&a, &b, &p(11.0, 0.0)));
    }

    #[test]
    fn segment_dist_perpendicular_projection() {
        let d = point_to_segment_dist(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        let d = point_to_segment_dist(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let q = project_onto_segment(&p(15.0, 3.0), &p(0.0, 0.0), &p(10.0, 0.0));
        assert!((q.x - 10.0).abs() < TOL && q.y.abs() < TOL);
    }

    #[test]
    fn line_dist_ignores_segment_extent() {
        let d = point_to_line_dist(&p(50.0, 3.0), &p(0.0, 0.0), &p(1.0, 0.0));
        assert!((d - 3.0).abs() < TOL, "d={d}");
    }
}
