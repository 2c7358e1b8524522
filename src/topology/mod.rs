pub mod journal;
pub mod room;
pub mod wall;
pub mod wall_part;

pub use journal::{Journal, Transaction};
pub use room::{BoundaryEntry, MiterSide, RoomData, RoomId};
pub use wall::{CornerSlot, WallCorners, WallData, WallEnd, WallId, WallKind};
pub use wall_part::{WallPartData, WallPartId, WallPartKind};

use crate::error::{OperationError, Result, StoreError};
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::Point2;
use slotmap::SlotMap;

/// Central arena that owns every wall, wall part and room of a floorplan.
///
/// Records reference each other via typed IDs (generational indices), so a
/// wall destroyed by a split or join can never be reached through a stale
/// reference: lookups on its ID simply fail.
#[derive(Debug, Default)]
pub struct FloorplanStore {
    walls: SlotMap<WallId, WallData>,
    wall_parts: SlotMap<WallPartId, WallPartData>,
    rooms: SlotMap<RoomId, RoomData>,
    journal: Journal,
    room_updates: Vec<RoomId>,
}

impl FloorplanStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Wall operations ---

    /// Inserts a wall and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the thickness is not a
    /// positive finite number.
    pub fn add_wall(&mut self, data: WallData) -> Result<WallId> {
        let t = data.thickness();
        if !(t > 0.0 && t.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "wall thickness must be positive, got {t}"
            ))
            .into());
        }
        Ok(self.walls.insert(data))
    }

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall(&self, id: WallId) -> std::result::Result<&WallData, StoreError> {
        self.walls
            .get(id)
            .ok_or_else(|| StoreError::EntityNotFound("wall".into()))
    }

    /// Returns a mutable reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall_mut(&mut self, id: WallId) -> std::result::Result<&mut WallData, StoreError> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| StoreError::EntityNotFound("wall".into()))
    }

    /// Removes a wall. Its parts and room references are left untouched.
    pub fn remove_wall(&mut self, id: WallId) -> Option<WallData> {
        self.walls.remove(id)
    }

    #[must_use]
    pub fn contains_wall(&self, id: WallId) -> bool {
        self.walls.contains_key(id)
    }

    /// Iterates over all walls.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter()
    }

    /// Snapshot of all wall IDs, for loops that mutate the store.
    #[must_use]
    pub fn wall_ids(&self) -> Vec<WallId> {
        self.walls.keys().collect()
    }

    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Walls whose centerline passes within `radius` of `point`.
    #[must_use]
    pub fn walls_near(&self, point: &Point2, radius: f64) -> Vec<WallId> {
        self.walls
            .iter()
            .filter(|(_, w)| point_to_segment_dist(point, &w.start(), &w.end()) <= radius)
            .map(|(id, _)| id)
            .collect()
    }

    // --- Wall part operations ---

    /// Inserts a wall part and returns its ID.
    pub fn add_wall_part(&mut self, data: WallPartData) -> WallPartId {
        self.wall_parts.insert(data)
    }

    /// Returns a reference to the wall part data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall_part(&self, id: WallPartId) -> std::result::Result<&WallPartData, StoreError> {
        self.wall_parts
            .get(id)
            .ok_or_else(|| StoreError::EntityNotFound("wall part".into()))
    }

    /// Returns a mutable reference to the wall part data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall_part_mut(&mut self, id: WallPartId) -> std::result::Result<&mut WallPartData, StoreError> {
        self.wall_parts
            .get_mut(id)
            .ok_or_else(|| StoreError::EntityNotFound("wall part".into()))
    }

    pub fn remove_wall_part(&mut self, id: WallPartId) -> Option<WallPartData> {
        self.wall_parts.remove(id)
    }

    /// IDs of all parts hosted by `wall`.
    #[must_use]
    pub fn parts_on_wall(&self, wall: WallId) -> Vec<WallPartId> {
        self.wall_parts
            .iter()
            .filter(|(_, p)| p.wall == wall)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn wall_parts(&self) -> impl Iterator<Item = (WallPartId, &WallPartData)> {
        self.wall_parts.iter()
    }

    // --- Room operations ---

    /// Inserts a room and returns its ID.
    pub fn add_room(&mut self, data: RoomData) -> RoomId {
        self.rooms.insert(data)
    }

    /// Returns a reference to the room data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn room(&self, id: RoomId) -> std::result::Result<&RoomData, StoreError> {
        self.rooms
            .get(id)
            .ok_or_else(|| StoreError::EntityNotFound("room".into()))
    }

    pub fn remove_room(&mut self, id: RoomId) -> Option<RoomData> {
        self.rooms.remove(id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &RoomData)> {
        self.rooms.iter()
    }

    /// Rooms whose boundary references any of `walls`.
    #[must_use]
    pub fn rooms_referencing(&self, walls: &[WallId]) -> Vec<RoomId> {
        self.rooms
            .iter()
            .filter(|(_, r)| walls.iter().any(|w| r.references(*w)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Replaces a room's boundary list in its own transaction and queues the
    /// room for boundary recomputation.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is not found.
    pub fn set_boundary_walls(&mut self, id: RoomId, entries: Vec<BoundaryEntry>) -> Result<()> {
        self.begin_transaction("boundary walls");
        match self.rooms.get_mut(id) {
            Some(room) => room.boundary_walls = entries,
            None => {
                self.journal.rollback();
                return Err(StoreError::EntityNotFound("room".into()).into());
            }
        }
        self.commit_transaction("boundary walls")?;
        self.request_room_update(id);
        Ok(())
    }

    /// Queues a room for the host's boundary-geometry recomputation.
    pub fn request_room_update(&mut self, id: RoomId) {
        if !self.room_updates.contains(&id) {
            self.room_updates.push(id);
        }
    }

    /// Drains the queued room updates.
    pub fn take_room_updates(&mut self) -> Vec<RoomId> {
        std::mem::take(&mut self.room_updates)
    }

    // --- Transactions ---

    pub fn begin_transaction(&mut self, name: &str) {
        self.journal.begin(name);
    }

    /// Commits the innermost open transaction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoOpenTransaction` if nothing is open.
    pub fn commit_transaction(&mut self, name: &str) -> Result<()> {
        self.journal.commit(name)?;
        Ok(())
    }

    /// Drops the innermost open transaction without recording it.
    pub fn rollback_transaction(&mut self) {
        self.journal.rollback();
    }

    /// Suspends (or resumes) undo recording for the transactions that follow.
    pub fn set_skips_undo(&mut self, skips: bool) {
        self.journal.set_skips_undo(skips);
    }

    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }
}
