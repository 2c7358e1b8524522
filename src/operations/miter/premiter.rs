use crate::error::Result;
use crate::topology::{FloorplanStore, WallEnd, WallId};

/// Resets all four corners of a wall to their perpendicular defaults.
///
/// # Errors
///
/// Returns an error if the wall is not found.
pub fn premiter_wall(store: &mut FloorplanStore, wall: WallId) -> Result<()> {
    store.wall_mut(wall)?.premiter();
    Ok(())
}

/// Resets only the two corners at one end of a wall.
///
/// # Errors
///
/// Returns an error if the wall is not found.
pub fn premiter_wall_end(store: &mut FloorplanStore, wall: WallId, end: WallEnd) -> Result<()> {
    store.wall_mut(wall)?.premiter_end(end);
    Ok(())
}

/// Resets every wall in the store.
pub fn premiter_all_walls(store: &mut FloorplanStore) {
    for id in store.wall_ids() {
        if let Ok(w) = store.wall_mut(id) {
            w.premiter();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::topology::{CornerSlot, WallData, WallKind};
    use approx::assert_abs_diff_eq;

    #[test]
    fn premiter_end_keeps_other_end() {
        let mut store = FloorplanStore::new();
        let id = store
            .add_wall(WallData::new(
                Point2::new(0.0, 0.0),
                Point2::new(100.0, 0.0),
                10.0,
                WallKind::Wall,
            ))
            .unwrap();
        {
            let w = store.wall_mut(id).unwrap();
            w.corners.set(CornerSlot::Smpt1, Point2::new(1.0, 1.0));
            w.corners.set(CornerSlot::Empt1, Point2::new(2.0, 2.0));
        }
        premiter_wall_end(&mut store, id, WallEnd::End).unwrap();
        let w = store.wall(id).unwrap();
        assert_abs_diff_eq!(w.corners.smpt1.x, 1.0);
        assert_abs_diff_eq!(w.corners.empt1.x, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w.corners.empt1.y, 5.0, epsilon = 1e-12);

        premiter_all_walls(&mut store);
        let w = store.wall(id).unwrap();
        assert_abs_diff_eq!(w.corners.smpt1.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn premiter_missing_wall_fails() {
        let mut store = FloorplanStore::new();
        let id = store
            .add_wall(WallData::new(
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                1.0,
                WallKind::Wall,
            ))
            .unwrap();
        store.remove_wall(id);
        assert!(premiter_wall(&mut store, id).is_err());
    }
}
