use super::distance_2d::is_point_on_segment;
use super::{Point2, PARALLEL_SINE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2` (with `d1 = a1 - a0`,
/// `d2 = b1 - b0`), returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let norms = da.norm() * db.norm();
    if norms < 1e-20 {
        return None;
    }
    let cross = da.perp(&db);
    if (cross / norms).abs() < PARALLEL_SINE {
        return None;
    }
    let w = b0 - a0;
    let t = w.perp(&db) / cross;
    let u = w.perp(&da) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns the crossing point if the two segments are not parallel and the
/// crossing lies on both of them. Endpoint contacts count, with the same
/// slack as [`is_point_on_segment`], so walls that share an endpoint or whose
/// endpoint sits on another wall's centerline always intersect.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<Point2> {
    let (t, _u) = line_line_intersect_2d(a0, a1, b0, b1)?;
    let pt = a0 + (a1 - a0) * t;
    if !(pt.x.is_finite() && pt.y.is_finite()) {
        return None;
    }
    if is_point_on_segment(a0, a1, &pt) && is_point_on_segment(b0, b1, &pt) {
        Some(pt)
    } else {
        None
    }
}

/// Orientation test: true if the 2D cross product of `b - a` and `c - a` is
/// positive.
///
/// With document coordinates (y grows downward) a positive value means `c`
/// is clockwise of the ray `a → b`. Every angular tie-break in the engine
/// goes through this one predicate.
#[must_use]
pub fn is_clockwise(a: &Point2, b: &Point2, c: &Point2) -> bool {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x) > 0.0
}
