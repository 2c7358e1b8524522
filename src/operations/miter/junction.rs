use tracing::trace;

use crate::error::Result;
use crate::math::angle_2d::direction_deg;
use crate::math::Point2;
use crate::operations::query::{all_intersection_points, WallsAtPoint};
use crate::topology::{FloorplanStore, WallId, WallKind};

use super::corner::miter_corner;
use super::premiter::premiter_all_walls;

/// Miters every corner at a junction point.
///
/// Walls of each kind are handled separately, so a divider never trims a
/// wall. Around the point the walls are visited in descending order of the
/// direction towards their far endpoint, and each cyclically adjacent pair
/// gets one corner.
pub struct MiterAtPoint {
    point: Point2,
    premiter: bool,
}

impl MiterAtPoint {
    /// Creates a new `MiterAtPoint` operation.
    ///
    /// With `premiter`, the corners at each wall's end at `point` are reset
    /// before mitering; walls passing through the point are left alone.
    #[must_use]
    pub fn new(point: Point2, premiter: bool) -> Self {
        Self { point, premiter }
    }

    /// Executes the mitering.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall disappears from the store midway.
    pub fn execute(&self, store: &mut FloorplanStore) -> Result<()> {
        for kind in [WallKind::Wall, WallKind::Divider] {
            let mut walls = WallsAtPoint::new(self.point).of_kind(kind).execute(store);
            if walls.is_empty() {
                continue;
            }
            if self.premiter {
                for &id in &walls {
                    let w = store.wall_mut(id)?;
                    if let Some(end) = w.end_at(&self.point) {
                        w.premiter_end(end);
                    }
                }
            }
            if walls.len() < 2 {
                continue;
            }
            sort_about(store, &mut walls, &self.point)?;
            trace!(?kind, count = walls.len(), x = self.point.x, y = self.point.y, "mitering junction");
            let n = walls.len();
            for i in 0..n {
                miter_corner(store, walls[i], walls[(i + 1) % n])?;
            }
        }
        Ok(())
    }
}

/// Orders walls by the direction from `point` to their far endpoint,
/// largest angle first.
fn sort_about(store: &FloorplanStore, walls: &mut [WallId], point: &Point2) -> Result<()> {
    let mut keyed = Vec::with_capacity(walls.len());
    for &id in walls.iter() {
        let w = store.wall(id)?;
        keyed.push((direction_deg(point, &w.far_endpoint(point)), id));
    }
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    for (slot, (_, id)) in walls.iter_mut().zip(keyed) {
        *slot = id;
    }
    Ok(())
}

/// Re-miters one wall: full premiter, then its junctions at both ends.
pub struct MiterWall {
    wall: WallId,
}

impl MiterWall {
    /// Creates a new `MiterWall` operation.
    #[must_use]
    pub fn new(wall: WallId) -> Self {
        Self { wall }
    }

    /// Executes the mitering.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found.
    pub fn execute(&self, store: &mut FloorplanStore) -> Result<()> {
        let w = store.wall_mut(self.wall)?;
        w.premiter();
        let (start, end) = (w.start(), w.end());
        MiterAtPoint::new(start, true).execute(store)?;
        MiterAtPoint::new(end, true).execute(store)
    }
}

/// Recomputes the corners of the whole plan from scratch.
#[derive(Default)]
pub struct MiterAll;

impl MiterAll {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the mitering.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall disappears from the store midway.
    pub fn execute(&self, store: &mut FloorplanStore) -> Result<()> {
        premiter_all_walls(store);
        let points = all_intersection_points(store);
        trace!(junctions = points.len(), "mitering all walls");
        for p in points {
            MiterAtPoint::new(p, false).execute(store)?;
        }
        Ok(())
    }
}
