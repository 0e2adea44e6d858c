//! Configuration module for AICapacity
//!
//! Provides the CLI arguments and the capacity tunables handed to the
//! analyzer.

mod settings;

pub use settings::*;
