//! # AICapacity - local AI sizing for shared game servers
//!
//! AICapacity inspects a Linux host's CPU and memory and reports which local
//! AI inference models can run next to two game-server worlds without
//! starving them of RAM.
//!
//! The work happens in three steps:
//!
//! - **Gather**: [`system::ResourceReader`] reads `/proc/cpuinfo` and
//!   `/proc/meminfo` (falling back to `free -g`) into a snapshot, recording
//!   every fallback it takes.
//! - **Analyze**: [`capacity::CapacityAnalyzer`] computes safe and burst
//!   headroom and places each catalog model into a tier.
//! - **Render**: [`render::ReportRenderer`] prints a table and a JSON dump.
//!
//! ## Quick Start
//!
//! ```no_run
//! use aicapacity::capacity::{CapacityAnalyzer, Catalog, HostInfo};
//! use aicapacity::config::{CapacityConfig, OutputFormat};
//! use aicapacity::render::ReportRenderer;
//! use aicapacity::system::{LinuxHost, ResourceReader};
//!
//! let config = CapacityConfig::default();
//! let reading = ResourceReader::new(LinuxHost::new())
//!     .read()
//!     .with_total_fallback(config.fallback_total_ram_gb);
//!
//! let report = CapacityAnalyzer::new(config, Catalog::builtin())
//!     .analyze(&reading, HostInfo::collect());
//!
//! ReportRenderer::new(OutputFormat::Full, true).print(&report).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capacity;
pub mod config;
pub mod error;
pub mod render;
pub mod system;

// Re-export commonly used types
pub use capacity::{CapacityAnalyzer, CapacityReport, Catalog, FitStatus};
pub use config::CapacityConfig;
pub use error::{CapacityError, Result};
pub use system::{LinuxHost, ResourceReader, ResourceReading};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
