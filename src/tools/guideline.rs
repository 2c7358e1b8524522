use crate::math::Point2;
use crate::topology::{FloorplanStore, WallId};

/// Which way a guideline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidelineAxis {
    Horizontal,
    Vertical,
}

/// A transient alignment hint from another wall's endpoint to the point
/// being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guideline {
    pub from: Point2,
    pub to: Point2,
    pub axis: GuidelineAxis,
}

/// Every endpoint of a wall other than `skip` that lines up with `point`
/// horizontally or vertically, within `tolerance`.
#[must_use]
pub fn find_guidelines(
    store: &FloorplanStore,
    point: &Point2,
    skip: WallId,
    tolerance: f64,
) -> Vec<Guideline> {
    let mut lines = Vec::new();
    for (id, w) in store.walls() {
        if id == skip {
            continue;
        }
        for end in [w.start(), w.end()] {
            if (end.x - point.x).abs() < tolerance {
                lines.push(Guideline {
                    from: end,
                    to: *point,
                    axis: GuidelineAxis::Vertical,
                });
            }
            if (end.y - point.y).abs() < tolerance {
                lines.push(Guideline {
                    from: end,
                    to: *point,
                    axis: GuidelineAxis::Horizontal,
                });
            }
        }
    }
    lines
}
