mod closest_crossing;
mod footprint;
mod intersect;

pub use closest_crossing::ClosestCrossingWall;
pub use footprint::is_point_in_wall;
pub use intersect::{all_intersection_points, walls_intersection, walls_share_endpoint, WallsAtPoint};
