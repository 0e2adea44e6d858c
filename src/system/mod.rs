//! System analysis and resource detection module
//!
//! Reads CPU and memory facts from the host through a swappable
//! [`HostSource`] and records every fallback taken.

mod host;
pub mod parse;
mod resources;
#[cfg(test)]
pub(crate) mod testing;

pub use host::{HostSource, LinuxHost, CPUINFO_PATH, FREE_COMMAND, MEMINFO_PATH};
pub use resources::*;
