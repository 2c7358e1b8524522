pub mod angle_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type, in document units.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Two points closer than this on both axes are the same point.
pub const POINT_TOLERANCE: f64 = 0.05;

/// Slack allowed in `|ac| + |cb| - |ab|` when testing that `c` lies on `ab`.
pub const SEGMENT_TOLERANCE: f64 = 0.1;

/// Walls shorter than this are destroyed; splits producing them are refused.
pub const MIN_WALL_LENGTH: f64 = 1.0;

/// Two walls whose directions differ by less than this (mod 180°) are parallel.
pub const PARALLEL_TOLERANCE_DEG: f64 = 1.0;

/// Junction angles within this many degrees of 180° need no corner.
pub const STRAIGHT_ANGLE_TOLERANCE_DEG: f64 = 0.1;

/// Sine below which two segments are treated as parallel for intersection.
pub const PARALLEL_SINE: f64 = 1e-9;
