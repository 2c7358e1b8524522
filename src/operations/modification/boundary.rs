use crate::error::Result;
use crate::math::angle_2d::direction_deg;
use crate::math::distance_2d::{is_point_on_segment, point_to_line_dist};
use crate::math::Point2;
use crate::operations::query::WallsAtPoint;
use crate::topology::{BoundaryEntry, FloorplanStore, MiterSide, WallId};

/// Builds the entry that replaces `old` when its wall is swapped for
/// `new_wall`.
///
/// The new side is whichever of the new wall's start corners lies closer to
/// the line through the old wall's corners on the old side. Both walls must
/// still be in the store.
///
/// # Errors
///
/// Returns an error if either wall is not found.
pub fn updated_entry(
    store: &FloorplanStore,
    old: BoundaryEntry,
    new_wall: WallId,
) -> Result<BoundaryEntry> {
    let ow = store.wall(old.wall)?;
    let nw = store.wall(new_wall)?;
    let (s, e) = old.side.slots();
    let (a, b) = (ow.corners.get(s), ow.corners.get(e));
    let d1 = point_to_line_dist(&nw.corners.smpt1, &a, &b);
    let d2 = point_to_line_dist(&nw.corners.smpt2, &a, &b);
    let side = if d1 < d2 { MiterSide::One } else { MiterSide::Two };
    Ok(BoundaryEntry::new(new_wall, side))
}

/// Orders walls meeting at `pivot` clockwise, starting with `first`.
///
/// Each wall is placed by the direction from `pivot` to its far endpoint.
///
/// # Errors
///
/// Returns an error if any wall is not found.
pub fn sort_walls_clockwise_from(
    store: &FloorplanStore,
    walls: &[WallId],
    pivot: &Point2,
    first: WallId,
) -> Result<Vec<WallId>> {
    let base = direction_deg(pivot, &store.wall(first)?.far_endpoint(pivot));
    let mut keyed = Vec::with_capacity(walls.len());
    for &id in walls {
        let dir = direction_deg(pivot, &store.wall(id)?.far_endpoint(pivot));
        let key = if id == first { 0.0 } else { (dir - base).rem_euclid(360.0) };
        keyed.push((key, id));
    }
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, id)| id).collect())
}

/// Returns true if some wall at `point`, other than those in `skip`, is
/// referenced by `entries`.
pub(crate) fn touches_boundary(
    store: &FloorplanStore,
    entries: &[BoundaryEntry],
    point: &Point2,
    skip: &[WallId],
) -> bool {
    WallsAtPoint::new(*point)
        .execute(store)
        .into_iter()
        .filter(|id| !skip.contains(id))
        .any(|id| entries.iter().any(|e| e.wall == id))
}

/// Orders the two halves of a split wall so the one whose far end lies on
/// `previous` comes first.
///
/// # Errors
///
/// Returns an error if a wall is not found.
pub(crate) fn order_halves(
    store: &FloorplanStore,
    previous: Option<WallId>,
    split_point: &Point2,
    halves: (WallId, WallId),
) -> Result<(WallId, WallId)> {
    let Some(prev) = previous.filter(|&p| store.contains_wall(p)) else {
        return Ok(halves);
    };
    let pw = store.wall(prev)?;
    let second_far = store.wall(halves.1)?.far_endpoint(split_point);
    if is_point_on_segment(&pw.start(), &pw.end(), &second_far) {
        Ok((halves.1, halves.0))
    } else {
        Ok(halves)
    }
}
