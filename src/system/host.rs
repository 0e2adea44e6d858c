//! Host information sources
//!
//! The reader never touches `/proc` or spawns processes directly; it goes
//! through [`HostSource`] so alternative hosts can be substituted.

use crate::error::{CapacityError, IoResultExt, Result};
use std::path::PathBuf;
use std::process::Command;

/// Default CPU descriptor table
pub const CPUINFO_PATH: &str = "/proc/cpuinfo";
/// Default memory descriptor table
pub const MEMINFO_PATH: &str = "/proc/meminfo";
/// Fallback memory utility
pub const FREE_COMMAND: &str = "free";

/// Read-only access to host resource information
pub trait HostSource {
    /// Raw CPU descriptor table
    fn cpu_table(&self) -> Result<String>;

    /// Raw memory descriptor table (kB counters)
    fn memory_table(&self) -> Result<String>;

    /// Output of the fallback memory utility (GB figures)
    fn memory_utility(&self) -> Result<String>;

    /// Logical processors usable by this process.
    ///
    /// Only consulted when the CPU table lists no processors, since affinity
    /// and cgroup limits can make it smaller than the installed count.
    fn logical_processors(&self) -> usize;

    /// Whether the host runs Linux
    fn is_linux(&self) -> bool;
}

/// Production host source backed by procfs and `free -g`
#[derive(Debug, Clone)]
pub struct LinuxHost {
    cpuinfo_path: PathBuf,
    meminfo_path: PathBuf,
    free_command: String,
}

impl Default for LinuxHost {
    fn default() -> Self {
        Self {
            cpuinfo_path: PathBuf::from(CPUINFO_PATH),
            meminfo_path: PathBuf::from(MEMINFO_PATH),
            free_command: FREE_COMMAND.to_string(),
        }
    }
}

impl LinuxHost {
    /// Create a host source reading the standard locations
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the descriptor tables from other paths
    pub fn with_paths(cpuinfo: impl Into<PathBuf>, meminfo: impl Into<PathBuf>) -> Self {
        Self {
            cpuinfo_path: cpuinfo.into(),
            meminfo_path: meminfo.into(),
            ..Self::default()
        }
    }

    /// Use a different program for the fallback memory reading
    pub fn with_free_command(mut self, command: impl Into<String>) -> Self {
        self.free_command = command.into();
        self
    }
}

impl HostSource for LinuxHost {
    fn cpu_table(&self) -> Result<String> {
        std::fs::read_to_string(&self.cpuinfo_path).with_path(&self.cpuinfo_path)
    }

    fn memory_table(&self) -> Result<String> {
        std::fs::read_to_string(&self.meminfo_path).with_path(&self.meminfo_path)
    }

    fn memory_utility(&self) -> Result<String> {
        let display = format!("{} -g", self.free_command);
        let output = Command::new(&self.free_command)
            .arg("-g")
            .output()
            .map_err(|e| CapacityError::command(&display, e.to_string()))?;

        if !output.status.success() {
            return Err(CapacityError::command(
                &display,
                format!("exited with {}", output.status),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn logical_processors(&self) -> usize {
        num_cpus::get()
    }

    fn is_linux(&self) -> bool {
        cfg!(target_os = "linux")
    }
}
