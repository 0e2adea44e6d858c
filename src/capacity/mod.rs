//! Capacity analysis module
//!
//! Holds the model catalog, the headroom/tier analysis and the report it
//! produces.

mod analyzer;
mod catalog;
mod report;

pub use analyzer::*;
pub use catalog::{Catalog, ModelCategory, ModelSpec};
pub use report::*;
