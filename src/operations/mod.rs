pub mod miter;
pub mod modification;
pub mod query;
