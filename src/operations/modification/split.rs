use tracing::{debug, trace};

use crate::error::Result;
use crate::math::distance_2d::{distance, is_point_on_segment, points_approx_equal};
use crate::math::{Point2, MIN_WALL_LENGTH};
use crate::operations::miter::{premiter_wall, MiterAtPoint};
use crate::operations::query::{all_intersection_points, walls_intersection, WallsAtPoint};
use crate::topology::{BoundaryEntry, FloorplanStore, WallId};

use super::boundary::{order_halves, sort_walls_clockwise_from, touches_boundary, updated_entry};
use super::wall_parts::maintain_wall_parts;

/// Splits a wall in two at an interior point.
///
/// The halves copy the original's thickness, kind and color and record it as
/// their origin. Parts move to whichever half contains them, room boundary
/// entries are rewritten, then the original is removed. The split is refused
/// (returning `Ok(None)`) when the point is not strictly inside the wall,
/// when a half would be shorter than [`MIN_WALL_LENGTH`], or when a wall
/// already covers either half.
pub struct SplitWall {
    wall: WallId,
    point: Point2,
    reshaping: Option<WallId>,
}

impl SplitWall {
    /// Creates a new `SplitWall` operation.
    #[must_use]
    pub fn new(wall: WallId, point: Point2) -> Self {
        Self {
            wall,
            point,
            reshaping: None,
        }
    }

    /// Marks the split as caused by reshaping `wall`, which decides how room
    /// boundary entries are replaced.
    #[must_use]
    pub fn during_reshape(mut self, wall: WallId) -> Self {
        self.reshaping = Some(wall);
        self
    }

    /// Executes the split, returning the halves `(start → point, point → end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found.
    pub fn execute(&self, store: &mut FloorplanStore) -> Result<Option<(WallId, WallId)>> {
        let w = store.wall(self.wall)?;
        let (s, e) = (w.start(), w.end());
        let ip = self.point;
        if w.end_at(&ip).is_some() || !is_point_on_segment(&s, &e, &ip) {
            trace!(wall = ?self.wall, "split point not inside wall, refused");
            return Ok(None);
        }
        if distance(&s, &ip) < MIN_WALL_LENGTH || distance(&ip, &e) < MIN_WALL_LENGTH {
            trace!(wall = ?self.wall, "split would leave a too-short wall, refused");
            return Ok(None);
        }
        if covers(store, &s, &ip) || covers(store, &ip, &e) {
            trace!(wall = ?self.wall, "split would duplicate an existing wall, refused");
            return Ok(None);
        }

        let mut first = w.derive(s, ip);
        first.origin = Some(self.wall);
        let mut second = w.derive(ip, e);
        second.origin = Some(self.wall);
        let w1 = store.add_wall(first)?;
        let w2 = store.add_wall(second)?;
        MiterAtPoint::new(ip, false).execute(store)?;

        self.rewrite_rooms(store, w1, w2)?;
        let parts = store.parts_on_wall(self.wall);
        maintain_wall_parts(store, &parts, &[w1, w2])?;
        store.remove_wall(self.wall);

        premiter_wall(store, w1)?;
        premiter_wall(store, w2)?;
        MiterAtPoint::new(ip, false).execute(store)?;
        MiterAtPoint::new(s, false).execute(store)?;
        MiterAtPoint::new(e, false).execute(store)?;
        debug!(wall = ?self.wall, ?w1, ?w2, x = ip.x, y = ip.y, "split wall");
        Ok(Some((w1, w2)))
    }

    /// Replaces every room entry for the original wall with entries for the
    /// halves. Must run while the original is still in the store.
    fn rewrite_rooms(&self, store: &mut FloorplanStore, w1: WallId, w2: WallId) -> Result<()> {
        let ip = self.point;
        let reshaping = self.reshaping.filter(|&rw| store.contains_wall(rw));
        for room in store.rooms_referencing(&[self.wall]) {
            let mut entries = store.room(room)?.boundary_walls.clone();
            let mut i = 0;
            while i < entries.len() {
                let old = entries[i];
                if old.wall != self.wall {
                    i += 1;
                    continue;
                }
                match reshaping {
                    Some(rw) if self.reshaping_reaches_boundary(store, &entries, rw)? => {
                        let keep = if self.half_reaches_boundary(store, &entries, w1)? {
                            w1
                        } else {
                            w2
                        };
                        entries[i] = updated_entry(store, old, keep)?;
                        i += 1;
                    }
                    Some(rw) => {
                        let order = sort_walls_clockwise_from(store, &[rw, w1, w2], &ip, rw)?;
                        entries[i] = updated_entry(store, old, order[2])?;
                        entries.insert(i + 1, updated_entry(store, old, order[1])?);
                        i += 2;
                    }
                    None => {
                        let previous = previous_wall(&entries, i).filter(|&p| p != self.wall);
                        let (a, b) = order_halves(store, previous, &ip, (w1, w2))?;
                        entries[i] = updated_entry(store, old, a)?;
                        entries.insert(i + 1, updated_entry(store, old, b)?);
                        i += 2;
                    }
                }
            }
            store.set_boundary_walls(room, entries)?;
        }
        Ok(())
    }

    /// Whether the reshaping wall meets another boundary wall at the end
    /// away from the split point.
    fn reshaping_reaches_boundary(
        &self,
        store: &FloorplanStore,
        entries: &[BoundaryEntry],
        rw: WallId,
    ) -> Result<bool> {
        let far = store.wall(rw)?.far_endpoint(&self.point);
        Ok(touches_boundary(store, entries, &far, &[rw]))
    }

    /// Whether `half` continues the boundary: a boundary wall at its far end
    /// leads on to yet another boundary wall.
    fn half_reaches_boundary(
        &self,
        store: &FloorplanStore,
        entries: &[BoundaryEntry],
        half: WallId,
    ) -> Result<bool> {
        let far = store.wall(half)?.far_endpoint(&self.point);
        for next in WallsAtPoint::new(far).execute(store) {
            if next == self.wall || next == half || !entries.iter().any(|e| e.wall == next) {
                continue;
            }
            let beyond = store.wall(next)?.far_endpoint(&far);
            if touches_boundary(store, entries, &beyond, &[next]) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn previous_wall(entries: &[BoundaryEntry], i: usize) -> Option<WallId> {
    let n = entries.len();
    (n > 1).then(|| entries[(i + n - 1) % n].wall)
}

/// Returns true if some wall already runs between `a` and `b`.
fn covers(store: &FloorplanStore, a: &Point2, b: &Point2) -> bool {
    store.walls().any(|(_, w)| {
        (points_approx_equal(a, &w.start()) && points_approx_equal(b, &w.end()))
            || (points_approx_equal(a, &w.end()) && points_approx_equal(b, &w.start()))
    })
}

/// Splits every wall that another wall meets in its interior, so only
/// endpoint-to-endpoint connections remain.
#[derive(Default)]
pub struct SplitAllWalls;

impl SplitAllWalls {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the splitting, returning how many splits were made.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall disappears from the store midway.
    pub fn execute(&self, store: &mut FloorplanStore) -> Result<usize> {
        let mut count = 0;
        for ip in all_intersection_points(store) {
            count += split_interiors_at(store, &ip, None)?;
        }
        Ok(count)
    }
}

/// Splits `wall`, and every wall it crosses, at each interior crossing.
///
/// Used on a freshly joined wall, which may now run through junctions that
/// its constituents only ended at.
///
/// # Errors
///
/// Returns an error if the wall is not found.
pub fn split_crossed_walls(
    store: &mut FloorplanStore,
    wall: WallId,
    reshaping: Option<WallId>,
) -> Result<usize> {
    let w = store.wall(wall)?;
    let crossings: Vec<Point2> = store
        .walls()
        .filter(|(id, _)| *id != wall)
        .filter_map(|(_, other)| walls_intersection(w, other))
        .collect();
    let mut count = 0;
    for ip in crossings {
        count += split_interiors_at(store, &ip, reshaping)?;
    }
    Ok(count)
}

fn split_interiors_at(
    store: &mut FloorplanStore,
    ip: &Point2,
    reshaping: Option<WallId>,
) -> Result<usize> {
    let mut count = 0;
    for id in WallsAtPoint::new(*ip).execute(store) {
        let Ok(w) = store.wall(id) else { continue };
        if w.end_at(ip).is_some() {
            continue;
        }
        let mut op = SplitWall::new(id, *ip);
        if let Some(rw) = reshaping {
            op = op.during_reshape(rw);
        }
        if op.execute(store)?.is_some() {
            count += 1;
        }
    }
    Ok(count)
}
