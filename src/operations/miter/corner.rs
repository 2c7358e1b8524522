use tracing::trace;

use crate::error::Result;
use crate::math::angle_2d::direction_deg;
use crate::math::distance_2d::{distance, points_approx_equal};
use crate::math::intersect_2d::is_clockwise;
use crate::math::{Point2, STRAIGHT_ANGLE_TOLERANCE_DEG};
use crate::operations::query::walls_intersection;
use crate::topology::{CornerSlot, FloorplanStore, WallData, WallId};

/// A solved corner between two walls.
///
/// `point` is written into `a_slot` of the first wall and `b_slot` of the
/// second; a slot is `None` when the junction is not at that wall's endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerMiter {
    pub junction: Point2,
    pub point: Point2,
    pub a_slot: Option<CornerSlot>,
    pub b_slot: Option<CornerSlot>,
}

/// Solves the miter point on the counter-clockwise side of `a` / clockwise
/// side of `b` at the point where they meet.
///
/// Offsetting the junction along both walls by `thickness / (2 sin θ)` of the
/// *other* wall gives the two diagonals of the overlap parallelogram; the
/// orientation test picks the one on this pair's side. Returns `None`, leaving
/// the walls' corners as they were, when:
/// - the walls do not meet, or meet only in both their interiors;
/// - the junction is straight (≈180°);
/// - the miter would reach further than the shorter wall is long;
/// - the arithmetic degenerates to a non-finite point.
#[must_use]
pub fn solve_corner_miter(a: &WallData, b: &WallData) -> Option<CornerMiter> {
    let junction = walls_intersection(a, b)?;
    let a_at = a.end_at(&junction);
    let b_at = b.end_at(&junction);

    let mut far_a = a.far_endpoint(&junction);
    let mut far_b = b.far_endpoint(&junction);

    // T-junction: one wall ends on the other's interior. Substitute the arm
    // of the through wall that lies on this pair's side.
    match (a_at, b_at) {
        (None, None) => return None,
        (Some(_), None) => {
            far_b = if is_clockwise(&far_a, &junction, &b.start()) {
                b.start()
            } else {
                b.end()
            };
        }
        (None, Some(_)) => {
            far_a = if is_clockwise(&junction, &far_b, &a.start()) {
                a.start()
            } else {
                a.end()
            };
        }
        (Some(_), Some(_)) => {}
    }

    let angle_deg =
        (direction_deg(&junction, &far_a) - direction_deg(&junction, &far_b) + 360.0).abs() % 360.0;
    if (angle_deg - 180.0).abs() < STRAIGHT_ANGLE_TOLERANCE_DEG {
        return None;
    }
    let sin = angle_deg.to_radians().sin();
    let u = (b.thickness() / (2.0 * sin)).abs();
    let v = (a.thickness() / (2.0 * sin)).abs();

    let ab = distance(&far_a, &junction);
    let bc = distance(&junction, &far_b);
    if ab < 1e-12 || bc < 1e-12 {
        return None;
    }
    let offset = (far_a - junction) / ab * u + (far_b - junction) / bc * v;
    let d = junction + offset;
    let e = junction - offset;

    let limit = a.length().min(b.length());
    let reach = distance(&d, &junction);
    if !(reach <= limit) {
        trace!(reach, limit, "miter limit exceeded, corner skipped");
        return None;
    }

    let point = if is_clockwise(&junction, &far_a, &d) { e } else { d };
    if !(point.x.is_finite() && point.y.is_finite()) {
        trace!("non-finite miter point, corner skipped");
        return None;
    }

    let a_slot = a_at.and_then(|_| slot_for(a, &far_a, &junction, &point));
    let b_slot = b_at.and_then(|_| slot_for(b, &far_b, &junction, &point));
    Some(CornerMiter {
        junction,
        point,
        a_slot,
        b_slot,
    })
}

/// Picks which corner of `wall` the miter point replaces, from the side of
/// the ray `far → junction` it falls on.
fn slot_for(wall: &WallData, far: &Point2, junction: &Point2, point: &Point2) -> Option<CornerSlot> {
    let clockwise = is_clockwise(far, junction, point);
    if points_approx_equal(far, &wall.start()) {
        Some(if clockwise {
            CornerSlot::Empt1
        } else {
            CornerSlot::Empt2
        })
    } else if points_approx_equal(far, &wall.end()) {
        Some(if clockwise {
            CornerSlot::Smpt2
        } else {
            CornerSlot::Smpt1
        })
    } else {
        None
    }
}

/// Miters the corner between two walls in the store.
///
/// # Errors
///
/// Returns an error if either wall is not found.
pub fn miter_corner(store: &mut FloorplanStore, a: WallId, b: WallId) -> Result<()> {
    let Some(miter) = solve_corner_miter(store.wall(a)?, store.wall(b)?) else {
        return Ok(());
    };
    if let Some(slot) = miter.a_slot {
        store.wall_mut(a)?.corners.set(slot, miter.point);
    }
    if let Some(slot) = miter.b_slot {
        store.wall_mut(b)?.corners.set(slot, miter.point);
    }
    Ok(())
}
