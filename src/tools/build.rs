use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{OperationError, Result};
use crate::math::Point2;
use crate::topology::{FloorplanStore, WallData, WallId, WallKind};

use super::input::PointerEvent;
use super::reshape::ReshapeGesture;
use super::snap::{snap_to_grid, snap_to_walls};

const TRANSACTION: &str = "WallBuilding";

/// Drawing a new wall: press to place the start, drag, release to place
/// the end.
///
/// The pointer-down creates a zero-length wall and hands its end to a
/// [`ReshapeGesture`] for the drag.
#[derive(Debug)]
pub struct WallBuilder {
    kind: WallKind,
    start: Option<Point2>,
    gesture: Option<ReshapeGesture>,
}

impl WallBuilder {
    /// Opens the building transaction.
    pub fn activate(store: &mut FloorplanStore, kind: WallKind) -> Self {
        store.begin_transaction(TRANSACTION);
        Self {
            kind,
            start: None,
            gesture: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> WallKind {
        self.kind
    }

    /// Where the wall starts, once placed.
    #[must_use]
    pub fn start(&self) -> Option<Point2> {
        self.start
    }

    /// The wall being drawn, once placed.
    #[must_use]
    pub fn wall(&self) -> Option<WallId> {
        self.gesture.as_ref().map(ReshapeGesture::wall)
    }

    #[must_use]
    pub fn gesture(&self) -> Option<&ReshapeGesture> {
        self.gesture.as_ref()
    }

    /// Places the start point and creates the wall.
    ///
    /// The start snaps to nearby walls, or to the grid if no wall is close.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::GestureInProgress` if a wall is already
    /// being drawn.
    pub fn pointer_down(
        &mut self,
        store: &mut FloorplanStore,
        config: &EngineConfig,
        event: &PointerEvent,
    ) -> Result<WallId> {
        if self.gesture.is_some() {
            return Err(OperationError::GestureInProgress("wall building").into());
        }
        let snap = snap_to_walls(store, event.point, None, config.snap.build_endpoint_distance);
        let start = if !snap.snapped() && config.grid_snap && !event.shift {
            snap_to_grid(&snap.point, config.grid_size)
        } else {
            snap.point
        };
        let thickness = match self.kind {
            WallKind::Wall => config.wall_thickness,
            WallKind::Divider => config.divider_thickness,
        };
        let data = WallData::new(start, start, thickness, self.kind).with_color(config.wall_color.clone());
        let wall = store.add_wall(data)?;
        self.start = Some(start);
        self.gesture = Some(ReshapeGesture::activate_building(store, wall)?);
        debug!(?wall, x = start.x, y = start.y, "wall started");
        Ok(wall)
    }

    /// # Errors
    ///
    /// Returns `OperationError::NoActiveGesture` before the pointer-down.
    pub fn pointer_move(
        &mut self,
        store: &mut FloorplanStore,
        config: &EngineConfig,
        event: &PointerEvent,
    ) -> Result<()> {
        let gesture = self
            .gesture
            .as_mut()
            .ok_or(OperationError::NoActiveGesture("wall building move"))?;
        gesture.pointer_move(store, config, event)
    }

    /// Places the end point and commits the new wall.
    ///
    /// Returns the wall, or `None` if it ended up too short and was
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::NoActiveGesture` before the pointer-down.
    pub fn pointer_up(
        mut self,
        store: &mut FloorplanStore,
        config: &EngineConfig,
        event: &PointerEvent,
    ) -> Result<Option<WallId>> {
        let mut gesture = self
            .gesture
            .take()
            .ok_or(OperationError::NoActiveGesture("wall building release"))?;
        gesture.pointer_up(store, config, event)?;
        let wall = gesture.wall();
        gesture.finish(store)?;
        store.commit_transaction(TRANSACTION)?;
        let built = store.contains_wall(wall).then_some(wall);
        debug!(?built, "wall building finished");
        Ok(built)
    }

    /// Discards the wall being drawn, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the building transaction is no longer open.
    pub fn cancel(self, store: &mut FloorplanStore) -> Result<()> {
        if let Some(gesture) = self.gesture {
            let wall = gesture.wall();
            gesture.cancel(store)?;
            for part in store.parts_on_wall(wall) {
                store.remove_wall_part(part);
            }
            store.remove_wall(wall);
            debug!(?wall, "wall building cancelled");
        }
        store.commit_transaction(TRANSACTION)
    }
}
