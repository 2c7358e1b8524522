use tracing::debug;

use crate::error::Result;
use crate::math::distance_2d::{distance, is_point_on_segment, segment_param};
use crate::math::Point2;
use crate::operations::query::is_point_in_wall;
use crate::topology::{FloorplanStore, WallId, WallPartId};

/// Finds where a part could sit on `wall`, as close as possible to its
/// current location.
///
/// The part's location is projected onto the wall and pulled inward until
/// the whole part lies between the endpoints. Returns `None` if the wall is
/// too short for the part or the spot overlaps another part on that wall.
///
/// # Errors
///
/// Returns an error if the wall or the part is not found.
pub fn closest_location_on_wall(
    store: &FloorplanStore,
    wall: WallId,
    part: WallPartId,
) -> Result<Option<Point2>> {
    let w = store.wall(wall)?;
    let wp = store.wall_part(part)?;
    let length = w.length();
    let half = wp.length / 2.0;
    if length < wp.length || length <= 0.0 {
        return Ok(None);
    }
    let (start, end) = (w.start(), w.end());
    let along = (segment_param(&wp.location, &start, &end) * length).clamp(half, length - half);
    let dir = (end - start) / length;

    for other in store.parts_on_wall(wall) {
        if other == part {
            continue;
        }
        let op = store.wall_part(other)?;
        let other_along = segment_param(&op.location, &start, &end) * length;
        if (other_along - along).abs() < (op.length + wp.length) / 2.0 {
            return Ok(None);
        }
    }
    Ok(Some(start + dir * along))
}

/// Re-hosts each part on whichever of `walls` now contains its location.
///
/// A part is moved to the first wall whose footprint or centerline contains
/// it and that has room for it; its height follows the new host's
/// thickness. Parts that find no such wall are deleted.
///
/// # Errors
///
/// Returns an error if a part or wall is not found.
pub fn maintain_wall_parts(
    store: &mut FloorplanStore,
    parts: &[WallPartId],
    walls: &[WallId],
) -> Result<()> {
    for &part in parts {
        let location = store.wall_part(part)?.location;
        let mut placed = false;
        for &wall in walls {
            let w = store.wall(wall)?;
            let hosts = is_point_in_wall(w, &location)
                || is_point_on_segment(&w.start(), &w.end(), &location);
            if !hosts {
                continue;
            }
            if let Some(spot) = closest_location_on_wall(store, wall, part)? {
                let thickness = store.wall(wall)?.thickness();
                let wp = store.wall_part_mut(part)?;
                wp.wall = wall;
                wp.location = spot;
                wp.height = thickness;
                placed = true;
                break;
            }
        }
        if !placed {
            debug!(?part, "wall part no longer fits any wall, removing");
            store.remove_wall_part(part);
        }
    }
    Ok(())
}

/// The two points where a part's extent meets its host's centerline.
///
/// # Errors
///
/// Returns an error if the part or its host wall is not found.
pub fn wall_part_extent(store: &FloorplanStore, part: WallPartId) -> Result<(Point2, Point2)> {
    let wp = store.wall_part(part)?;
    let w = store.wall(wp.wall)?;
    let length = w.length();
    if length <= 0.0 {
        return Ok((wp.location, wp.location));
    }
    let half = (w.end() - w.start()) / length * (wp.length / 2.0);
    Ok((wp.location - half, wp.location + half))
}

/// Shortest distance from `point` to either end of the part.
///
/// # Errors
///
/// Returns an error if the part or its host wall is not found.
pub fn distance_to_part_extent(
    store: &FloorplanStore,
    part: WallPartId,
    point: &Point2,
) -> Result<f64> {
    let (a, b) = wall_part_extent(store, part)?;
    Ok(distance(&a, point).min(distance(&b, point)))
}
