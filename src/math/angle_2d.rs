use super::{Point2, Vector2};

/// Direction of the ray `from → to` in degrees, in `[0, 360)`.
///
/// Measured from +x towards +y; with y pointing down this is clockwise on
/// screen. Coincident points give `0.0`.
#[must_use]
pub fn direction_deg(from: &Point2, to: &Point2) -> f64 {
    let d = to - from;
    if d.x == 0.0 && d.y == 0.0 {
        return 0.0;
    }
    d.y.atan2(d.x).to_degrees().rem_euclid(360.0)
}

/// Unit vector pointing at `degrees`.
#[must_use]
pub fn unit_at(degrees: f64) -> Vector2 {
    let r = degrees.to_radians();
    Vector2::new(r.cos(), r.sin())
}

/// Difference between two directions folded into `[0, 180]`.
#[must_use]
pub fn angle_between_deg(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Rotates `point` about `center` so the ray `center → point` is a multiple
/// of `step_deg`, keeping its length.
#[must_use]
pub fn snap_angle_about(center: &Point2, point: &Point2, step_deg: f64) -> Point2 {
    let length = (point - center).norm();
    if length == 0.0 || step_deg <= 0.0 {
        return *point;
    }
    let snapped = (direction_deg(center, point) / step_deg).round() * step_deg;
    center + unit_at(snapped) * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn direction_quadrants() {
        assert_abs_diff_eq!(direction_deg(&p(0.0, 0.0), &p(1.0, 0.0)), 0.0);
        assert_abs_diff_eq!(direction_deg(&p(0.0, 0.0), &p(0.0, 1.0)), 90.0);
        assert_abs_diff_eq!(direction_deg(&p(0.0, 0.0), &p(-1.0, 0.0)), 180.0);
        assert_abs_diff_eq!(direction_deg(&p(0.0, 0.0), &p(0.0, -1.0)), 270.0);
    }

    #[test]
    fn angle_between_wraps() {
        assert_abs_diff_eq!(angle_between_deg(359.5, 0.5), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angle_between_deg(10.0, 190.0), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn snap_to_45_keeps_length() {
        let c = p(0.0, 0.0);
        let snapped = snap_angle_about(&c, &p(10.0, 1.0), 45.0);
        assert_abs_diff_eq!(snapped.x, (10.0_f64 * 10.0 + 1.0).sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(snapped.y, 0.0, epsilon = 1e-9);

        let diag = snap_angle_about(&c, &p(10.0, 8.0), 45.0);
        assert_abs_diff_eq!(diag.x, diag.y, epsilon = 1e-9);
    }
}
