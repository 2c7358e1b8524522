mod boundary;
mod collinear;
mod join;
mod split;
mod wall_parts;

pub use boundary::{sort_walls_clockwise_from, updated_entry};
pub use collinear::{are_walls_parallel, find_all_collinear_walls, is_wall_collinear};
pub use join::{JoinAllCollinearWalls, JoinWalls};
pub use split::{split_crossed_walls, SplitAllWalls, SplitWall};
pub use wall_parts::{
    closest_location_on_wall, distance_to_part_extent, maintain_wall_parts, wall_part_extent,
};
