//! System resource detection
//!
//! Gathers CPU and memory facts into an immutable [`ResourceSnapshot`].
//! Every fallback taken on the way is recorded as a [`Degradation`] so the
//! report can mark estimated values instead of silently defaulting.

use super::host::HostSource;
use super::parse::{kb_to_whole_gb, parse_cpuinfo, parse_free_output, parse_meminfo};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// CPU model reported when the descriptor table has none
pub const UNKNOWN_CPU_MODEL: &str = "Unknown";

/// Complete resource snapshot for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// CPU information
    pub cpu: CpuInfo,
    /// Memory information
    pub memory: MemoryInfo,
}

/// CPU information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// CPU model name
    pub model: String,
    /// Total number of logical processors
    pub threads: usize,
    /// Physical cores, approximated as half the thread count.
    ///
    /// Assumes hyperthreading is active; wrong on hosts without SMT.
    pub estimated_cores: usize,
    /// AVX2 support
    pub wide_simd: bool,
}

/// Memory information in whole GB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Total physical memory
    pub total_gb: f64,
    /// Memory available for new workloads without swapping
    pub available_gb: f64,
    /// Completely unused memory
    pub free_gb: f64,
    /// Where the figures came from
    pub source: MemorySource,
}

/// Origin of the memory figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySource {
    /// `/proc/meminfo`
    ProcMeminfo,
    /// `free -g`
    FreeCommand,
    /// No source answered
    Unavailable,
}

/// Snapshot field that may hold an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum SnapshotField {
    CpuModel,
    WideSimd,
    ThreadCount,
    TotalRam,
    AvailableRam,
    FreeRam,
}

impl SnapshotField {
    /// Human-readable field name
    pub fn label(&self) -> &'static str {
        match self {
            Self::CpuModel => "CPU model",
            Self::WideSimd => "AVX2 support",
            Self::ThreadCount => "thread count",
            Self::TotalRam => "total RAM",
            Self::AvailableRam => "available RAM",
            Self::FreeRam => "free RAM",
        }
    }
}

/// A fallback taken while reading the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degradation {
    /// Affected field
    pub field: SnapshotField,
    /// What went wrong and what was used instead
    pub reason: String,
}

/// Snapshot plus the record of every degraded field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceReading {
    /// Values as read, defaults included
    pub snapshot: ResourceSnapshot,
    /// Fallbacks taken, in the order they happened
    pub degraded: Vec<Degradation>,
}

impl ResourceReading {
    /// Whether any fallback touched `field`
    pub fn is_degraded(&self, field: SnapshotField) -> bool {
        self.degraded.iter().any(|d| d.field == field)
    }

    /// Substitute a placeholder total when no source reported memory.
    ///
    /// The placeholder is not a measurement; it is recorded as such.
    pub fn with_total_fallback(mut self, fallback_gb: f64) -> Self {
        if self.snapshot.memory.total_gb <= 0.0 {
            warn!(
                fallback_gb,
                "total RAM unknown, assuming placeholder value"
            );
            self.snapshot.memory.total_gb = fallback_gb;
            self.degraded.push(Degradation {
                field: SnapshotField::TotalRam,
                reason: format!("assumed {fallback_gb} GB placeholder"),
            });
        }
        self
    }
}

/// Reads a [`ResourceReading`] from a [`HostSource`]
pub struct ResourceReader<H> {
    host: H,
}

impl<H: HostSource> ResourceReader<H> {
    /// Create a reader over the given host
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Access the underlying host source
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Gather CPU and memory information.
    ///
    /// Never fails: unreadable sources degrade to defaults.
    pub fn read(&self) -> ResourceReading {
        let mut degraded = Vec::new();

        let cpu = self.read_cpu(&mut degraded);
        let memory = self.read_memory(&mut degraded);

        debug!(
            model = %cpu.model,
            threads = cpu.threads,
            wide_simd = cpu.wide_simd,
            total_gb = memory.total_gb,
            source = ?memory.source,
            degraded = degraded.len(),
            "resource snapshot collected"
        );

        ResourceReading {
            snapshot: ResourceSnapshot { cpu, memory },
            degraded,
        }
    }

    fn read_cpu(&self, degraded: &mut Vec<Degradation>) -> CpuInfo {
        let (model, wide_simd, processors) = match self.host.cpu_table() {
            Ok(content) => {
                let table = parse_cpuinfo(&content);
                if !table.has_flags {
                    record(degraded, SnapshotField::WideSimd, "no flags entry, assuming unsupported");
                }
                let model = table.model.unwrap_or_else(|| {
                    record(degraded, SnapshotField::CpuModel, "no model name entry");
                    UNKNOWN_CPU_MODEL.to_string()
                });
                (model, table.wide_simd, table.processors)
            }
            Err(e) => {
                warn!(error = %e, "CPU table unavailable");
                let reason = format!("CPU table unreadable: {e}");
                record(degraded, SnapshotField::CpuModel, &reason);
                record(degraded, SnapshotField::WideSimd, &reason);
                (UNKNOWN_CPU_MODEL.to_string(), false, 0)
            }
        };

        // The table lists every installed CPU; the process-level count is
        // reduced by affinity masks and cgroup quotas.
        let threads = if processors > 0 {
            processors
        } else {
            let usable = self.host.logical_processors();
            warn!(usable, "no processor entries, using CPUs usable by this process");
            record(
                degraded,
                SnapshotField::ThreadCount,
                "no processor entries, counted CPUs usable by this process",
            );
            usable
        };

        CpuInfo {
            model,
            threads,
            estimated_cores: (threads / 2).max(1),
            wide_simd,
        }
    }

    fn read_memory(&self, degraded: &mut Vec<Degradation>) -> MemoryInfo {
        let primary = match self.memory_from_table() {
            Ok(info) => return Self::fill_missing(info, degraded),
            Err(e) => e,
        };
        warn!(error = %primary, "memory table unavailable, trying free -g");

        match self.memory_from_utility() {
            Ok(info) => {
                record(
                    degraded,
                    SnapshotField::TotalRam,
                    &format!("read from free -g after: {primary}"),
                );
                Self::fill_missing(info, degraded)
            }
            Err(fallback) => {
                warn!(error = %fallback, "free -g unavailable, memory unknown");
                let reason = format!("no memory source: {primary}; {fallback}");
                for field in [
                    SnapshotField::TotalRam,
                    SnapshotField::AvailableRam,
                    SnapshotField::FreeRam,
                ] {
                    record(degraded, field, &reason);
                }
                MemoryInfo {
                    total_gb: 0.0,
                    available_gb: 0.0,
                    free_gb: 0.0,
                    source: MemorySource::Unavailable,
                }
            }
        }
    }

    fn memory_from_table(&self) -> Result<PartialMemory> {
        let table = parse_meminfo(&self.host.memory_table()?)?;
        Ok(PartialMemory {
            total_gb: kb_to_whole_gb(table.total_kb),
            available_gb: table.available_kb.map(kb_to_whole_gb),
            free_gb: table.free_kb.map(kb_to_whole_gb),
            source: MemorySource::ProcMeminfo,
        })
    }

    fn memory_from_utility(&self) -> Result<PartialMemory> {
        let out = parse_free_output(&self.host.memory_utility()?)?;
        Ok(PartialMemory {
            total_gb: out.total_gb,
            available_gb: out.available_gb,
            free_gb: out.free_gb,
            source: MemorySource::FreeCommand,
        })
    }

    fn fill_missing(info: PartialMemory, degraded: &mut Vec<Degradation>) -> MemoryInfo {
        MemoryInfo {
            total_gb: info.total_gb as f64,
            available_gb: counter_or_zero(info.available_gb, SnapshotField::AvailableRam, degraded),
            free_gb: counter_or_zero(info.free_gb, SnapshotField::FreeRam, degraded),
            source: info.source,
        }
    }
}

struct PartialMemory {
    total_gb: u64,
    available_gb: Option<u64>,
    free_gb: Option<u64>,
    source: MemorySource,
}

fn counter_or_zero(value: Option<u64>, field: SnapshotField, degraded: &mut Vec<Degradation>) -> f64 {
    match value {
        Some(gb) => gb as f64,
        None => {
            record(degraded, field, "counter not reported, using 0");
            0.0
        }
    }
}

fn record(degraded: &mut Vec<Degradation>, field: SnapshotField, reason: &str) {
    degraded.push(Degradation {
        field,
        reason: reason.to_string(),
    });
}
