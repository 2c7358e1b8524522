use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::{OperationError, Result};
use crate::math::distance_2d::distance;
use crate::math::Point2;
use crate::operations::miter::{MiterAll, MiterWall};
use crate::topology::{FloorplanStore, WallId, WallPartId};

use super::boundary::updated_entry;
use super::collinear::find_all_collinear_walls;
use super::wall_parts::maintain_wall_parts;

/// Merges a set of collinear walls into one.
///
/// The new wall spans the two endpoints farthest apart across the set and
/// takes its thickness, kind and color from the reference wall (the first
/// one unless set). Parts and room entries move onto it before the
/// constituents are removed.
pub struct JoinWalls {
    walls: Vec<WallId>,
    reference: Option<WallId>,
}

impl JoinWalls {
    /// Creates a new `JoinWalls` operation.
    #[must_use]
    pub fn new(walls: Vec<WallId>) -> Self {
        Self {
            walls,
            reference: None,
        }
    }

    /// Sets the wall whose appearance the merged wall copies.
    #[must_use]
    pub fn reference(mut self, wall: WallId) -> Self {
        self.reference = Some(wall);
        self
    }

    /// Executes the join, returning the new wall, or `None` if there was
    /// nothing to join.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the walls are of mixed
    /// kinds, or an error if a wall is not found.
    pub fn execute(&self, store: &mut FloorplanStore) -> Result<Option<WallId>> {
        let mut walls: Vec<WallId> = Vec::with_capacity(self.walls.len());
        for &id in &self.walls {
            if !walls.contains(&id) {
                walls.push(id);
            }
        }
        if walls.len() < 2 {
            return Ok(None);
        }
        let reference = self.reference.unwrap_or(walls[0]);
        let kind = store.wall(reference)?.kind;
        for &id in &walls {
            if store.wall(id)?.kind != kind {
                return Err(OperationError::InvalidInput(
                    "cannot join walls of different kinds".into(),
                )
                .into());
            }
        }

        let (a, b) = self.farthest_endpoints(store, &walls)?;
        let rw = store.wall(reference)?;
        // Keep the reference wall's orientation.
        let (start, end) = if (b - a).dot(&(rw.end() - rw.start())) < 0.0 {
            (b, a)
        } else {
            (a, b)
        };
        let mut data = rw.derive(start, end);
        data.origin = Some(reference);
        let parts: Vec<WallPartId> = walls.iter().flat_map(|&w| store.parts_on_wall(w)).collect();

        let joined = store.add_wall(data)?;
        MiterWall::new(joined).execute(store)?;
        rewrite_rooms(store, &walls, joined)?;
        maintain_wall_parts(store, &parts, &[joined])?;
        for &id in &walls {
            store.remove_wall(id);
        }
        MiterWall::new(joined).execute(store)?;
        debug!(count = walls.len(), ?joined, "joined collinear walls");
        Ok(Some(joined))
    }

    fn farthest_endpoints(
        &self,
        store: &FloorplanStore,
        walls: &[WallId],
    ) -> Result<(Point2, Point2)> {
        let mut points = Vec::with_capacity(walls.len() * 2);
        for &id in walls {
            let w = store.wall(id)?;
            points.push(w.start());
            points.push(w.end());
        }
        let mut best = (points[0], points[1]);
        let mut best_distance = distance(&best.0, &best.1);
        for (i, p) in points.iter().enumerate() {
            for q in &points[i + 1..] {
                let d = distance(p, q);
                if d > best_distance {
                    best_distance = d;
                    best = (*p, *q);
                }
            }
        }
        Ok(best)
    }
}

/// Points every room entry for a joined-away wall at the merged wall.
fn rewrite_rooms(store: &mut FloorplanStore, walls: &[WallId], joined: WallId) -> Result<()> {
    for room in store.rooms_referencing(walls) {
        let mut entries = store.room(room)?.boundary_walls.clone();
        for entry in &mut entries {
            if walls.contains(&entry.wall) {
                *entry = updated_entry(store, *entry, joined)?;
            }
        }
        entries.dedup();
        if entries.len() > 1 && entries.first() == entries.last() {
            entries.pop();
        }
        store.set_boundary_walls(room, entries)?;
    }
    Ok(())
}

/// Collapses every collinear run in the plan, then re-miters everything.
#[derive(Default)]
pub struct JoinAllCollinearWalls;

impl JoinAllCollinearWalls {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the joining, returning the merged walls.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall disappears from the store midway.
    pub fn execute(&self, store: &mut FloorplanStore) -> Result<Vec<WallId>> {
        let mut handled: HashSet<WallId> = HashSet::new();
        let mut joined = Vec::new();
        for id in store.wall_ids() {
            if handled.contains(&id) || !store.contains_wall(id) {
                continue;
            }
            let run = find_all_collinear_walls(store, id)?;
            handled.extend(run.iter().copied());
            if run.len() < 2 {
                continue;
            }
            trace!(count = run.len(), "collinear run found");
            if let Some(w) = JoinWalls::new(run).reference(id).execute(store)? {
                joined.push(w);
            }
        }
        MiterAll::new().execute(store)?;
        Ok(joined)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::distance_2d::points_approx_equal;
    use crate::operations::modification::SplitWall;
    use crate::topology::{
        BoundaryEntry, MiterSide, RoomData, WallData, WallKind, WallPartData, WallPartKind,
    };

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn add(store: &mut FloorplanStore, a: Point2, b: Point2, t: f64) -> WallId {
        store.add_wall(WallData::new(a, b, t, WallKind::Wall)).unwrap()
    }

    #[test]
    fn three_collinear_walls_become_one() {
        let mut store = FloorplanStore::new();
        let a = add(&mut store, p(0.0, 0.0), p(10.0, 0.0), 5.0);
        let b = add(&mut store, p(10.0, 0.0), p(20.0, 0.0), 5.0);
        let c = add(&mut store, p(20.0, 0.0), p(30.0, 0.0), 5.0);
        let run = find_all_collinear_walls(&store, a).unwrap();
        let joined = JoinWalls::new(run).execute(&mut store).unwrap().unwrap();

        assert_eq!(store.wall_count(), 1);
        for old in [a, b, c] {
            assert!(store.wall(old).is_err());
        }
        let w = store.wall(joined).unwrap();
        assert!(points_approx_equal(&w.start(), &p(0.0, 0.0)));
        assert!(points_approx_equal(&w.end(), &p(30.0, 0.0)));
    }

    #[test]
    fn split_then_join_round_trip() {
        let mut store = FloorplanStore::new();
        let w = add(&mut store, p(0.0, 0.0), p(100.0, 0.0), 10.0);
        let door = store.add_wall_part(WallPartData::new(w, WallPartKind::Door, p(25.0, 0.0), 10.0, 10.0));
        let win = store.add_wall_part(WallPartData::new(w, WallPartKind::Window, p(75.0, 0.0), 12.0, 10.0));

        let (w1, w2) = SplitWall::new(w, p(60.0, 0.0)).execute(&mut store).unwrap().unwrap();
        let joined = JoinWalls::new(vec![w1, w2]).execute(&mut store).unwrap().unwrap();

        let jw = store.wall(joined).unwrap();
        assert!(points_approx_equal(&jw.start(), &p(0.0, 0.0)));
        assert!(points_approx_equal(&jw.end(), &p(100.0, 0.0)));
        for (part, x) in [(door, 25.0), (win, 75.0)] {
            let wp = store.wall_part(part).unwrap();
            assert_eq!(wp.wall, joined);
            assert!(points_approx_equal(&wp.location, &p(x, 0.0)));
        }
    }

    #[test]
    fn room_entries_collapse_onto_joined_wall() {
        let mut store = FloorplanStore::new();
        let a = add(&mut store, p(0.0, 0.0), p(50.0, 0.0), 10.0);
        let b = add(&mut store, p(50.0, 0.0), p(100.0, 0.0), 10.0);
        let c = add(&mut store, p(100.0, 0.0), p(100.0, 100.0), 10.0);
        let room = store.add_room(RoomData::new(
            "room",
            vec![
                BoundaryEntry::new(a, MiterSide::One),
                BoundaryEntry::new(b, MiterSide::One),
                BoundaryEntry::new(c, MiterSide::One),
            ],
        ));
        let joined = JoinWalls::new(vec![a, b]).execute(&mut store).unwrap().unwrap();
        let entries = &store.room(room).unwrap().boundary_walls;
        assert_eq!(
            entries,
            &vec![
                BoundaryEntry::new(joined, MiterSide::One),
                BoundaryEntry::new(c, MiterSide::One),
            ]
        );
    }

    #[test]
    fn mixed_kinds_are_rejected() {
        let mut store = FloorplanStore::new();
        let a = add(&mut store, p(0.0, 0.0), p(10.0, 0.0), 5.0);
        let d = store
            .add_wall(WallData::new(p(10.0, 0.0), p(20.0, 0.0), 0.005, WallKind::Divider))
            .unwrap();
        assert!(JoinWalls::new(vec![a, d]).execute(&mut store).is_err());
        assert_eq!(store.wall_count(), 2);
    }

    #[test]
    fn join_all_leaves_corners_alone() {
        let mut store = FloorplanStore::new();
        add(&mut store, p(0.0, 0.0), p(50.0, 0.0), 10.0);
        add(&mut store, p(50.0, 0.0), p(100.0, 0.0), 10.0);
        add(&mut store, p(100.0, 0.0), p(100.0, 40.0), 10.0);
        add(&mut store, p(100.0, 40.0), p(100.0, 100.0), 10.0);
        let joined = JoinAllCollinearWalls::new().execute(&mut store).unwrap();
        assert_eq!(joined.len(), 2);
        assert_eq!(store.wall_count(), 2);
    }
}
