mod corner;
mod junction;
mod premiter;

pub use corner::{miter_corner, solve_corner_miter, CornerMiter};
pub use junction::{MiterAll, MiterAtPoint, MiterWall};
pub use premiter::{premiter_all_walls, premiter_wall, premiter_wall_end};
