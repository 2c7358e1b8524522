use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::math::angle_2d::snap_angle_about;
use crate::math::distance_2d::{distance, project_onto_segment};
use crate::math::{Point2, MIN_WALL_LENGTH};
use crate::operations::miter::{MiterAll, MiterWall};
use crate::operations::modification::{
    distance_to_part_extent, find_all_collinear_walls, is_wall_collinear, split_crossed_walls,
    wall_part_extent, JoinWalls, SplitWall,
};
use crate::operations::query::{walls_intersection, ClosestCrossingWall, WallsAtPoint};
use crate::topology::{FloorplanStore, WallEnd, WallId, WallPartId};

use super::guideline::{find_guidelines, Guideline};
use super::input::PointerEvent;
use super::snap::{snap_to_grid, snap_to_walls};

const TRANSACTION: &str = "WallReshaping";
const RESET_TRANSACTION: &str = "reset to old data";

/// One drag of a wall endpoint, from grab to release or cancel.
///
/// The gesture owns its own transaction: it is opened on activation and
/// committed by [`finish`](Self::finish) or [`cancel`](Self::cancel).
#[derive(Debug)]
pub struct ReshapeGesture {
    wall: WallId,
    moving: WallEnd,
    /// Where the moving endpoint was before the drag.
    return_point: Point2,
    parts_snapshot: Vec<(WallPartId, Point2)>,
    building: bool,
    is_intersecting: bool,
    intersecting_wall: Option<WallId>,
    joined_walls: Vec<WallId>,
    guidelines: Vec<Guideline>,
}

impl ReshapeGesture {
    /// Starts dragging `moving` of `wall`.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found.
    pub fn activate(store: &mut FloorplanStore, wall: WallId, moving: WallEnd) -> Result<Self> {
        let return_point = store.wall(wall)?.endpoint(moving);
        let parts_snapshot = store
            .parts_on_wall(wall)
            .into_iter()
            .filter_map(|p| store.wall_part(p).ok().map(|wp| (p, wp.location)))
            .collect();
        store.begin_transaction(TRANSACTION);
        debug!(?wall, ?moving, "reshape activated");
        Ok(Self::with_state(wall, moving, return_point, parts_snapshot, false))
    }

    /// Starts driving the end of a wall that is being built.
    pub(crate) fn activate_building(store: &mut FloorplanStore, wall: WallId) -> Result<Self> {
        let return_point = store.wall(wall)?.start();
        store.begin_transaction(TRANSACTION);
        debug!(?wall, "reshape activated for a new wall");
        Ok(Self::with_state(wall, WallEnd::End, return_point, Vec::new(), true))
    }

    fn with_state(
        wall: WallId,
        moving: WallEnd,
        return_point: Point2,
        parts_snapshot: Vec<(WallPartId, Point2)>,
        building: bool,
    ) -> Self {
        Self {
            wall,
            moving,
            return_point,
            parts_snapshot,
            building,
            is_intersecting: false,
            intersecting_wall: None,
            joined_walls: Vec::new(),
            guidelines: Vec::new(),
        }
    }

    /// The wall being reshaped. Changes if a join absorbs it on release.
    #[must_use]
    pub fn wall(&self) -> WallId {
        self.wall
    }

    #[must_use]
    pub fn moving_end(&self) -> WallEnd {
        self.moving
    }

    #[must_use]
    pub fn return_point(&self) -> Point2 {
        self.return_point
    }

    #[must_use]
    pub fn is_building(&self) -> bool {
        self.building
    }

    /// The wall the moving endpoint currently runs into, if any.
    #[must_use]
    pub fn intersecting_wall(&self) -> Option<WallId> {
        self.intersecting_wall
    }

    #[must_use]
    pub fn guidelines(&self) -> &[Guideline] {
        &self.guidelines
    }

    /// Moves the endpoint towards the pointer, snapping it first.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall has disappeared from the store.
    pub fn pointer_move(
        &mut self,
        store: &mut FloorplanStore,
        config: &EngineConfig,
        event: &PointerEvent,
    ) -> Result<()> {
        let stationary = store.wall(self.wall)?.endpoint(self.moving.other());
        let mut point = event.point;
        if event.shift {
            point = snap_angle_about(&stationary, &point, config.snap.angle_step_degrees);
        }
        let snap = snap_to_walls(store, point, Some(self.wall), config.snap.endpoint_distance);
        point = snap.point;
        if snap.projected {
            self.is_intersecting = true;
        }

        let crossing = ClosestCrossingWall::new(stationary, point)
            .excluding(std::iter::once(self.wall).chain(self.joined_walls.iter().copied()))
            .execute(store);
        if let Some(prev) = self.intersecting_wall.filter(|&id| store.contains_wall(id)) {
            MiterWall::new(prev).execute(store)?;
        }
        match crossing {
            Some((iw, _)) => {
                self.is_intersecting = true;
                self.intersecting_wall = Some(iw);
                let w = store.wall(iw)?;
                let (s, e) = (w.start(), w.end());
                point = project_onto_segment(&point, &s, &e);
                if distance(&point, &s) < config.snap.intersection_start_distance {
                    point = s;
                } else if distance(&point, &e) < config.snap.intersection_end_distance {
                    point = e;
                }
            }
            None => {
                self.is_intersecting = false;
                if let Some(prev) = self.intersecting_wall {
                    let touching = match (store.wall(self.wall), store.wall(prev)) {
                        (Ok(a), Ok(b)) => walls_intersection(a, b).is_some(),
                        _ => false,
                    };
                    if !touching {
                        self.intersecting_wall = None;
                    }
                }
            }
        }

        if config.grid_snap && !self.is_intersecting && !event.shift {
            point = snap_to_grid(&point, config.grid_size);
        }
        let placed = self.reshape(store, &stationary, point)?;
        if config.show_wall_guidelines {
            self.guidelines = find_guidelines(store, &placed, self.wall, config.guideline_tolerance);
        } else {
            self.guidelines.clear();
        }
        MiterWall::new(self.wall).execute(store)
    }

    /// Moves the endpoint to `target` and carries the wall's parts along,
    /// each keeping its distance from the stationary end.
    ///
    /// The wall cannot be shortened past the far side of the part nearest
    /// the moving endpoint. Returns where the endpoint ended up.
    fn reshape(&self, store: &mut FloorplanStore, stationary: &Point2, target: Point2) -> Result<Point2> {
        let moving_point = store.wall(self.wall)?.endpoint(self.moving);
        let mut offsets = Vec::new();
        let mut closest: Option<(WallPartId, f64)> = None;
        for part in store.parts_on_wall(self.wall) {
            offsets.push((part, distance(&store.wall_part(part)?.location, stationary)));
            let d = distance_to_part_extent(store, part, &moving_point)?;
            if closest.is_none_or(|(_, best)| d < best) {
                closest = Some((part, d));
            }
        }

        let mut target = target;
        if let Some((part, _)) = closest {
            let (a, b) = wall_part_extent(store, part)?;
            let (da, db) = (distance(stationary, &a), distance(stationary, &b));
            let min_length = da.max(db);
            let length = distance(stationary, &target);
            if length < min_length {
                target = if length > 0.0 {
                    stationary + (target - stationary) / length * min_length
                } else if da > db {
                    a
                } else {
                    b
                };
            }
        }

        store.wall_mut(self.wall)?.set_endpoint(self.moving, target);
        let length = distance(stationary, &target);
        if length > 0.0 {
            let dir = (target - stationary) / length;
            for (part, offset) in offsets {
                store.wall_part_mut(part)?.location = stationary + dir * offset;
            }
        }
        Ok(target)
    }

    /// Finishes the drag: one last move, then joins collinear walls, splits
    /// walls the endpoints landed on, and queues affected rooms for update.
    ///
    /// Joining runs before splitting since both replace wall identities.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall has disappeared from the store.
    pub fn pointer_up(
        &mut self,
        store: &mut FloorplanStore,
        config: &EngineConfig,
        event: &PointerEvent,
    ) -> Result<()> {
        self.pointer_move(store, config, event)?;
        let w = store.wall(self.wall)?;
        let ends = [w.endpoint(self.moving), w.endpoint(self.moving.other())];

        self.join_collinear(store)?;
        self.split_at(store, &ends[0], &ends)?;
        if self.building {
            self.split_at(store, &ends[1], &ends)?;
        }
        for jw in self.joined_walls.clone() {
            if store.contains_wall(jw) {
                split_crossed_walls(store, jw, Some(self.wall))?;
            }
        }

        let mut touched = vec![self.wall];
        touched.extend(self.intersecting_wall);
        touched.extend(self.joined_walls.iter().copied());
        for room in store.rooms_referencing(&touched) {
            store.request_room_update(room);
        }
        self.joined_walls.clear();
        debug!(wall = ?self.wall, "reshape released");
        Ok(())
    }

    fn join_collinear(&mut self, store: &mut FloorplanStore) -> Result<()> {
        let run = find_all_collinear_walls(store, self.wall)?;
        if run.len() > 1 {
            if let Some(joined) = JoinWalls::new(run).reference(self.wall).execute(store)? {
                self.absorb(store, joined);
            }
        }
        let at_return = WallsAtPoint::new(self.return_point).execute(store);
        if let [a, b] = at_return[..] {
            if is_wall_collinear(store, a, b)? {
                if let Some(joined) = JoinWalls::new(vec![a, b]).reference(a).execute(store)? {
                    self.absorb(store, joined);
                }
            }
        }
        Ok(())
    }

    fn absorb(&mut self, store: &FloorplanStore, joined: WallId) {
        self.joined_walls.push(joined);
        if !store.contains_wall(self.wall) {
            self.wall = joined;
        }
    }

    /// Splits the single other wall at `point`, unless it meets the dragged
    /// wall end to end.
    fn split_at(&self, store: &mut FloorplanStore, point: &Point2, ends: &[Point2; 2]) -> Result<()> {
        let others: Vec<WallId> = WallsAtPoint::new(*point)
            .execute(store)
            .into_iter()
            .filter(|id| *id != self.wall && !self.joined_walls.contains(id))
            .collect();
        if let [target] = others[..] {
            let w = store.wall(target)?;
            if ends.iter().all(|p| w.end_at(p).is_none()) {
                SplitWall::new(target, *point)
                    .during_reshape(self.wall)
                    .execute(store)?;
            }
        }
        Ok(())
    }

    /// Ends the gesture and commits its transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the gesture transaction is no longer open.
    pub fn finish(self, store: &mut FloorplanStore) -> Result<()> {
        self.deactivate(store, false)
    }

    /// Abandons the drag, restoring the endpoint and part locations from
    /// before it started. The restore is not undoable.
    ///
    /// # Errors
    ///
    /// Returns an error if the gesture transaction is no longer open.
    pub fn cancel(self, store: &mut FloorplanStore) -> Result<()> {
        debug!(wall = ?self.wall, "reshape cancelled");
        self.deactivate(store, true)
    }

    fn deactivate(self, store: &mut FloorplanStore, cancelled: bool) -> Result<()> {
        if cancelled && !self.building {
            // The restored wall has its pre-drag length, so nothing is discarded.
            store.set_skips_undo(true);
            let restored = self
                .restore(store)
                .and_then(|()| store.commit_transaction(TRANSACTION));
            store.set_skips_undo(false);
            return restored;
        }
        if store
            .wall(self.wall)
            .is_ok_and(|w| w.length() < MIN_WALL_LENGTH)
        {
            for part in store.parts_on_wall(self.wall) {
                store.remove_wall_part(part);
            }
            store.remove_wall(self.wall);
            debug!(wall = ?self.wall, "degenerate wall removed");
        }
        store.commit_transaction(TRANSACTION)
    }

    fn restore(&self, store: &mut FloorplanStore) -> Result<()> {
        store.begin_transaction(RESET_TRANSACTION);
        if let Ok(w) = store.wall_mut(self.wall) {
            w.set_endpoint(self.moving, self.return_point);
        }
        MiterAll::new().execute(store)?;
        for &(part, location) in &self.parts_snapshot {
            if let Ok(wp) = store.wall_part_mut(part) {
                wp.location = location;
            }
        }
        store.commit_transaction(RESET_TRANSACTION)
    }
}
