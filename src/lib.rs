pub mod config;
pub mod error;
pub mod math;
pub mod operations;
pub mod tools;
pub mod topology;

pub use error::{Result, WallgraphError};
