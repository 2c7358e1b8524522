//! Interactive wall tools: endpoint dragging and wall drawing.
//!
//! Tools only react to [`PointerEvent`]s; rendering and hit-testing of
//! handles are up to the host.

pub mod build;
pub mod guideline;
pub mod input;
pub mod reshape;
pub mod snap;

pub use build::WallBuilder;
pub use guideline::{find_guidelines, Guideline, GuidelineAxis};
pub use input::PointerEvent;
pub use reshape::ReshapeGesture;
pub use snap::{snap_to_grid, snap_to_walls, WallSnap};

use crate::config::EngineConfig;
use crate::error::{OperationError, Result};
use crate::topology::{FloorplanStore, WallEnd, WallId, WallKind};

/// What the controller is currently doing.
#[derive(Debug, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Reshaping(ReshapeGesture),
    Building(WallBuilder),
}

/// Routes pointer events to the active gesture.
///
/// At most one gesture runs at a time. Events that make no sense in the
/// current state are rejected without touching the store.
#[derive(Debug)]
pub struct InteractionController {
    config: EngineConfig,
    state: ToolState,
    /// Journal depth before the running gesture opened its transactions.
    base_depth: usize,
}

impl InteractionController {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: ToolState::Idle,
            base_depth: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &ToolState {
        &self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ToolState::Idle)
    }

    /// Guidelines of the running drag, empty when idle.
    #[must_use]
    pub fn guidelines(&self) -> &[Guideline] {
        let gesture = match &self.state {
            ToolState::Reshaping(g) => Some(g),
            ToolState::Building(b) => b.gesture(),
            ToolState::Idle => None,
        };
        match gesture {
            Some(g) => g.guidelines(),
            None => &[],
        }
    }

    /// Starts dragging one endpoint of `wall`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::GestureInProgress` unless idle, or an error
    /// if the wall is not found.
    pub fn grab_handle(&mut self, store: &mut FloorplanStore, wall: WallId, end: WallEnd) -> Result<()> {
        self.ensure_idle("grab handle")?;
        self.base_depth = store.journal().depth();
        self.state = ToolState::Reshaping(ReshapeGesture::activate(store, wall, end)?);
        Ok(())
    }

    /// Arms the wall drawing tool for walls of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::GestureInProgress` unless idle.
    pub fn begin_build(&mut self, store: &mut FloorplanStore, kind: WallKind) -> Result<()> {
        self.ensure_idle("begin build")?;
        self.base_depth = store.journal().depth();
        self.state = ToolState::Building(WallBuilder::activate(store, kind));
        Ok(())
    }

    fn ensure_idle(&self, event: &'static str) -> Result<()> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(OperationError::GestureInProgress(event).into())
        }
    }

    /// # Errors
    ///
    /// Returns `OperationError::NoActiveGesture` unless the drawing tool
    /// is armed.
    pub fn pointer_down(&mut self, store: &mut FloorplanStore, event: &PointerEvent) -> Result<WallId> {
        match &mut self.state {
            ToolState::Building(b) => b.pointer_down(store, &self.config, event),
            _ => Err(OperationError::NoActiveGesture("pointer down").into()),
        }
    }

    /// # Errors
    ///
    /// Returns `OperationError::NoActiveGesture` if nothing is being
    /// dragged.
    pub fn pointer_move(&mut self, store: &mut FloorplanStore, event: &PointerEvent) -> Result<()> {
        match &mut self.state {
            ToolState::Reshaping(g) => g.pointer_move(store, &self.config, event),
            ToolState::Building(b) => b.pointer_move(store, &self.config, event),
            ToolState::Idle => Err(OperationError::NoActiveGesture("pointer move").into()),
        }
    }

    /// Releases the drag and returns to idle.
    ///
    /// Returns the wall that was reshaped or built, or `None` if it was
    /// discarded as too short.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::NoActiveGesture` if nothing is being
    /// dragged.
    pub fn pointer_up(&mut self, store: &mut FloorplanStore, event: &PointerEvent) -> Result<Option<WallId>> {
        let dragging = match &self.state {
            ToolState::Reshaping(_) => true,
            ToolState::Building(b) => b.wall().is_some(),
            ToolState::Idle => false,
        };
        if !dragging {
            return Err(OperationError::NoActiveGesture("pointer up").into());
        }
        let released = match std::mem::take(&mut self.state) {
            ToolState::Reshaping(mut g) => g
                .pointer_up(store, &self.config, event)
                .and_then(|()| {
                    let wall = g.wall();
                    g.finish(store)?;
                    Ok(store.contains_wall(wall).then_some(wall))
                }),
            ToolState::Building(b) => b.pointer_up(store, &self.config, event),
            ToolState::Idle => Ok(None),
        };
        if released.is_err() {
            self.unwind(store);
        }
        released
    }

    /// Cancels whatever is running and returns to idle.
    ///
    /// # Errors
    ///
    /// Returns an error if the gesture's transaction is no longer open.
    pub fn escape(&mut self, store: &mut FloorplanStore) -> Result<()> {
        let cancelled = match std::mem::take(&mut self.state) {
            ToolState::Reshaping(g) => g.cancel(store),
            ToolState::Building(b) => b.cancel(store),
            ToolState::Idle => return Ok(()),
        };
        if cancelled.is_err() {
            self.unwind(store);
        }
        cancelled
    }

    /// Closes whatever a failed gesture left open.
    fn unwind(&self, store: &mut FloorplanStore) {
        while store.journal().depth() > self.base_depth {
            store.rollback_transaction();
        }
        store.set_skips_undo(false);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::WallgraphError;
    use crate::math::distance_2d::points_approx_equal;
    use crate::math::Point2;
    use crate::operations::miter::MiterAll;
    use crate::topology::{BoundaryEntry, MiterSide, RoomData, WallData, WallPartData, WallPartKind};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn add(store: &mut FloorplanStore, a: Point2, b: Point2) -> WallId {
        store.add_wall(WallData::new(a, b, 10.0, WallKind::Wall)).unwrap()
    }

    #[test]
    fn idle_controller_rejects_pointer_events() {
        let mut store = FloorplanStore::new();
        let mut ctl = InteractionController::new(EngineConfig::default());
        let ev = PointerEvent::at(10.0, 10.0);
        assert!(matches!(
            ctl.pointer_move(&mut store, &ev),
            Err(WallgraphError::Operation(OperationError::NoActiveGesture(_)))
        ));
        assert!(ctl.pointer_up(&mut store, &ev).is_err());
        assert!(ctl.pointer_down(&mut store, &ev).is_err());
        assert!(ctl.escape(&mut store).is_ok());
        assert!(ctl.is_idle());
    }

    #[test]
    fn one_gesture_at_a_time() {
        let mut store = FloorplanStore::new();
        let w = add(&mut store, p(0.0, 0.0), p(100.0, 0.0));
        let mut ctl = InteractionController::new(EngineConfig::default());
        ctl.grab_handle(&mut store, w, WallEnd::End).unwrap();
        assert!(matches!(
            ctl.begin_build(&mut store, WallKind::Wall),
            Err(WallgraphError::Operation(OperationError::GestureInProgress(_)))
        ));
        assert!(ctl.grab_handle(&mut store, w, WallEnd::Start).is_err());
        ctl.escape(&mut store).unwrap();
        assert!(ctl.is_idle());
        assert_eq!(store.journal().depth(), 0);
    }

    #[test]
    fn drag_onto_neighbour_and_release() {
        let mut store = FloorplanStore::new();
        let w1 = add(&mut store, p(0.0, 0.0), p(100.0, 0.0));
        let w2 = add(&mut store, p(100.0, 0.0), p(100.0, 100.0));
        MiterAll::new().execute(&mut store).unwrap();
        let mut ctl = InteractionController::new(EngineConfig::default());

        ctl.grab_handle(&mut store, w1, WallEnd::End).unwrap();
        ctl.pointer_move(&mut store, &PointerEvent::at(98.0, 50.0)).unwrap();
        assert!(points_approx_equal(&store.wall(w1).unwrap().end(), &p(100.0, 50.0)));
        let released = ctl.pointer_up(&mut store, &PointerEvent::at(98.0, 50.0)).unwrap();

        assert_eq!(released, Some(w1));
        assert!(ctl.is_idle());
        assert!(store.wall(w2).is_err());
        assert_eq!(store.wall_count(), 3);
    }

    #[test]
    fn escape_undoes_the_drag() {
        let mut store = FloorplanStore::new();
        let w = add(&mut store, p(0.0, 0.0), p(100.0, 0.0));
        let win = store.add_wall_part(WallPartData::new(w, WallPartKind::Window, p(60.0, 0.0), 20.0, 10.0));
        let mut ctl = InteractionController::new(EngineConfig::default());

        ctl.grab_handle(&mut store, w, WallEnd::Start).unwrap();
        ctl.pointer_move(&mut store, &PointerEvent::at(40.0, -80.0)).unwrap();
        ctl.escape(&mut store).unwrap();

        assert_eq!(store.wall(w).unwrap().start(), p(0.0, 0.0));
        assert_eq!(store.wall_part(win).unwrap().location, p(60.0, 0.0));
        assert!(!store.journal().committed().last().unwrap().undoable);
    }

    #[test]
    fn release_on_room_wall_queues_room_update() {
        let mut store = FloorplanStore::new();
        let top = add(&mut store, p(0.0, 0.0), p(100.0, 0.0));
        let right = add(&mut store, p(100.0, 0.0), p(100.0, 100.0));
        let bottom = add(&mut store, p(100.0, 100.0), p(0.0, 100.0));
        let left = add(&mut store, p(0.0, 100.0), p(0.0, 0.0));
        let room = store.add_room(RoomData::new(
            "room",
            [top, right, bottom, left]
                .into_iter()
                .map(|w| BoundaryEntry::new(w, MiterSide::One))
                .collect(),
        ));
        MiterAll::new().execute(&mut store).unwrap();
        let stem = add(&mut store, p(50.0, -80.0), p(50.0, -30.0));
        let mut ctl = InteractionController::new(EngineConfig::default());

        ctl.grab_handle(&mut store, stem, WallEnd::End).unwrap();
        ctl.pointer_move(&mut store, &PointerEvent::at(50.0, -2.0)).unwrap();
        ctl.pointer_up(&mut store, &PointerEvent::at(50.0, -2.0)).unwrap();

        assert!(store.wall(top).is_err());
        assert!(points_approx_equal(&store.wall(stem).unwrap().end(), &p(50.0, 0.0)));
        let entries = &store.room(room).unwrap().boundary_walls;
        assert_eq!(entries.len(), 5);
        let rest: Vec<WallId> = entries[2..].iter().map(|e| e.wall).collect();
        assert_eq!(rest, vec![right, bottom, left]);
        assert!(store.take_room_updates().contains(&room));
    }

    #[test]
    fn failed_release_closes_the_gesture_transaction() {
        let mut store = FloorplanStore::new();
        let w = add(&mut store, p(0.0, 0.0), p(100.0, 0.0));
        let mut ctl = InteractionController::new(EngineConfig::default());
        ctl.grab_handle(&mut store, w, WallEnd::End).unwrap();
        store.remove_wall(w);
        assert!(ctl.pointer_up(&mut store, &PointerEvent::at(50.0, 50.0)).is_err());
        assert!(ctl.is_idle());
        assert_eq!(store.journal().depth(), 0);
    }

    #[test]
    fn failed_build_release_closes_both_transactions() {
        let mut store = FloorplanStore::new();
        let mut ctl = InteractionController::new(EngineConfig::default());
        ctl.begin_build(&mut store, WallKind::Wall).unwrap();
        let wall = ctl.pointer_down(&mut store, &PointerEvent::at(0.0, 0.0)).unwrap();
        assert_eq!(store.journal().depth(), 2);
        store.remove_wall(wall);
        assert!(ctl.pointer_up(&mut store, &PointerEvent::at(0.0, 50.0)).is_err());
        assert!(ctl.is_idle());
        assert_eq!(store.journal().depth(), 0);
    }

    #[test]
    fn build_through_the_controller() {
        let mut store = FloorplanStore::new();
        let mut ctl = InteractionController::new(EngineConfig::default());
        ctl.begin_build(&mut store, WallKind::Wall).unwrap();
        assert!(ctl.pointer_up(&mut store, &PointerEvent::at(0.0, 0.0)).is_err());
        ctl.pointer_down(&mut store, &PointerEvent::at(0.0, 0.0)).unwrap();
        ctl.pointer_move(&mut store, &PointerEvent::at(0.0, 70.0)).unwrap();
        let built = ctl.pointer_up(&mut store, &PointerEvent::at(0.0, 70.0)).unwrap();
        assert!(built.is_some());
        assert_eq!(store.wall_count(), 1);
        assert!(ctl.is_idle());
    }

    #[test]
    fn escape_while_building_discards_the_wall() {
        let mut store = FloorplanStore::new();
        let mut ctl = InteractionController::new(EngineConfig::default());
        ctl.begin_build(&mut store, WallKind::Wall).unwrap();
        ctl.pointer_down(&mut store, &PointerEvent::at(0.0, 0.0)).unwrap();
        ctl.pointer_move(&mut store, &PointerEvent::at(50.0, 0.0)).unwrap();
        ctl.escape(&mut store).unwrap();
        assert_eq!(store.wall_count(), 0);
        assert!(ctl.is_idle());
    }
}
