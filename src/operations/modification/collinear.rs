use std::collections::HashSet;

use crate::error::Result;
use crate::math::angle_2d::angle_between_deg;
use crate::math::{Point2, PARALLEL_TOLERANCE_DEG};
use crate::operations::query::WallsAtPoint;
use crate::topology::{FloorplanStore, WallData, WallId};

/// Returns true if the walls run in the same or opposite direction, within
/// [`PARALLEL_TOLERANCE_DEG`].
#[must_use]
pub fn are_walls_parallel(a: &WallData, b: &WallData) -> bool {
    let diff = angle_between_deg(a.direction_deg(), b.direction_deg());
    diff < PARALLEL_TOLERANCE_DEG || diff > 180.0 - PARALLEL_TOLERANCE_DEG
}

/// Returns true if `a` and `b` can be merged into one wall.
///
/// They must be the same kind, parallel, and share an endpoint at which
/// every wall present is parallel to both of them; any other wall there is
/// a corner that merging would destroy.
///
/// # Errors
///
/// Returns an error if either wall is not found.
pub fn is_wall_collinear(store: &FloorplanStore, a: WallId, b: WallId) -> Result<bool> {
    if a == b {
        return Ok(false);
    }
    let wa = store.wall(a)?;
    let wb = store.wall(b)?;
    if wa.kind != wb.kind || !are_walls_parallel(wa, wb) {
        return Ok(false);
    }
    for shared in shared_endpoints(wa, wb) {
        if junction_is_straight(store, &shared, wa, wb) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn shared_endpoints(a: &WallData, b: &WallData) -> Vec<Point2> {
    [a.start(), a.end()]
        .into_iter()
        .filter(|p| b.end_at(p).is_some())
        .collect()
}

fn junction_is_straight(store: &FloorplanStore, point: &Point2, a: &WallData, b: &WallData) -> bool {
    WallsAtPoint::new(*point)
        .execute(store)
        .into_iter()
        .filter_map(|id| store.wall(id).ok())
        .all(|w| are_walls_parallel(w, a) && are_walls_parallel(w, b))
}

/// Collects `seed` and every wall transitively collinear with it.
///
/// The seed comes first; the rest follow in discovery order.
///
/// # Errors
///
/// Returns an error if the seed wall is not found.
pub fn find_all_collinear_walls(store: &FloorplanStore, seed: WallId) -> Result<Vec<WallId>> {
    store.wall(seed)?;
    let mut found = vec![seed];
    let mut visited: HashSet<WallId> = HashSet::from([seed]);
    let mut work = vec![seed];
    while let Some(current) = work.pop() {
        let wc = store.wall(current)?;
        let candidates: Vec<WallId> = [wc.start(), wc.end()]
            .iter()
            .flat_map(|p| WallsAtPoint::new(*p).execute(store))
            .collect();
        for other in candidates {
            if visited.contains(&other) {
                continue;
            }
            if is_wall_collinear(store, current, other)? {
                visited.insert(other);
                found.push(other);
                work.push(other);
            }
        }
    }
    Ok(found)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::WallKind;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn add(store: &mut FloorplanStore, a: Point2, b: Point2) -> WallId {
        store.add_wall(WallData::new(a, b, 5.0, WallKind::Wall)).unwrap()
    }

    #[test]
    fn parallel_in_either_direction() {
        let a = WallData::new(p(0.0, 0.0), p(10.0, 0.0), 1.0, WallKind::Wall);
        let b = WallData::new(p(20.0, 0.1), p(10.0, 0.0), 1.0, WallKind::Wall);
        let c = WallData::new(p(0.0, 0.0), p(10.0, 1.0), 1.0, WallKind::Wall);
        assert!(are_walls_parallel(&a, &b));
        assert!(!are_walls_parallel(&a, &c));
    }

    #[test]
    fn straight_run_is_collinear() {
        let mut store = FloorplanStore::new();
        let a = add(&mut store, p(0.0, 0.0), p(10.0, 0.0));
        let b = add(&mut store, p(10.0, 0.0), p(20.0, 0.0));
        assert!(is_wall_collinear(&store, a, b).unwrap());
        assert!(is_wall_collinear(&store, b, a).unwrap());
    }

    #[test]
    fn corner_at_shared_endpoint_blocks_merge() {
        let mut store = FloorplanStore::new();
        let a = add(&mut store, p(0.0, 0.0), p(10.0, 0.0));
        let b = add(&mut store, p(10.0, 0.0), p(20.0, 0.0));
        add(&mut store, p(10.0, 0.0), p(10.0, 10.0));
        assert!(!is_wall_collinear(&store, a, b).unwrap());
    }

    #[test]
    fn different_kinds_never_merge() {
        let mut store = FloorplanStore::new();
        let a = add(&mut store, p(0.0, 0.0), p(10.0, 0.0));
        let b = store
            .add_wall(WallData::new(p(10.0, 0.0), p(20.0, 0.0), 0.005, WallKind::Divider))
            .unwrap();
        assert!(!is_wall_collinear(&store, a, b).unwrap());
    }

    #[test]
    fn discovery_follows_the_whole_run() {
        let mut store = FloorplanStore::new();
        let a = add(&mut store, p(0.0, 0.0), p(10.0, 0.0));
        let b = add(&mut store, p(10.0, 0.0), p(20.0, 0.0));
        let c = add(&mut store, p(20.0, 0.0), p(30.0, 0.0));
        add(&mut store, p(30.0, 0.0), p(30.0, 30.0));
        let mut run = find_all_collinear_walls(&store, b).unwrap();
        assert_eq!(run[0], b);
        run.sort();
        let mut expected = vec![a, b, c];
        expected.sort();
        assert_eq!(run, expected);
    }

    proptest! {
        #[test]
        fn collinearity_is_symmetric(
            a_deg in 0.0f64..360.0,
            b_deg in 0.0f64..360.0,
            c_deg in 0.0f64..360.0,
            la in 1.0f64..50.0,
            lb in 1.0f64..50.0,
            with_third in proptest::bool::ANY,
        ) {
            let mut store = FloorplanStore::new();
            let j = p(0.0, 0.0);
            let at = |deg: f64, len: f64| {
                let r = deg.to_radians();
                p(len * r.cos(), len * r.sin())
            };
            let a = add(&mut store, at(a_deg, la), j);
            let b = add(&mut store, j, at(b_deg, lb));
            if with_third {
                add(&mut store, j, at(c_deg, 20.0));
            }
            prop_assert_eq!(
                is_wall_collinear(&store, a, b).unwrap(),
                is_wall_collinear(&store, b, a).unwrap()
            );
        }
    }
}
