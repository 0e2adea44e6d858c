//! In-memory host source for tests

use super::host::HostSource;
use crate::error::{CapacityError, Result};

/// Host whose tables are fixed strings; `None` makes the source fail
#[derive(Debug, Default, Clone)]
pub(crate) struct FakeHost {
    pub cpuinfo: Option<String>,
    pub meminfo: Option<String>,
    pub free: Option<String>,
    pub threads: usize,
    pub linux: bool,
}

impl HostSource for FakeHost {
    fn cpu_table(&self) -> Result<String> {
        self.cpuinfo
            .clone()
            .ok_or_else(|| CapacityError::host_unavailable("cpuinfo", "missing"))
    }

    fn memory_table(&self) -> Result<String> {
        self.meminfo
            .clone()
            .ok_or_else(|| CapacityError::host_unavailable("meminfo", "missing"))
    }

    fn memory_utility(&self) -> Result<String> {
        self.free
            .clone()
            .ok_or_else(|| CapacityError::command("free -g", "not installed"))
    }

    fn logical_processors(&self) -> usize {
        self.threads
    }

    fn is_linux(&self) -> bool {
        self.linux
    }
}
