//! Capacity analysis
//!
//! Sizes every catalog model against two scenarios: the game servers at
//! their full configured allocation (safe) and at typical usage (burst).

use super::catalog::{Catalog, ModelCategory, ModelSpec};
use super::report::{
    CapacityReport, FitStatus, HostInfo, PerformanceNote, Recommendation, SystemSummary,
};
use crate::config::CapacityConfig;
use crate::system::{CpuInfo, ResourceReading};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Hosts with fewer logical processors struggle with heavy media models
pub const EXTREME_LAG_THREAD_LIMIT: usize = 8;
/// Generative media models above this size lag on small CPUs
pub const EXTREME_LAG_RAM_GB: f64 = 8.0;

/// RAM left for AI models under both scenarios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Headroom {
    /// Game servers at full allocation
    pub safe_gb: f64,
    /// Game servers at typical usage
    pub burst_gb: f64,
}

/// Turns a resource reading into a [`CapacityReport`]
#[derive(Debug, Clone)]
pub struct CapacityAnalyzer {
    config: CapacityConfig,
    catalog: Catalog,
}

impl CapacityAnalyzer {
    /// Create an analyzer over a catalog
    pub fn new(config: CapacityConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    /// Catalog in use
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Compute both headroom figures, clamped at zero
    pub fn headroom(&self, total_ram_gb: f64) -> Headroom {
        let reserved = total_ram_gb - self.config.system_overhead_gb;
        Headroom {
            safe_gb: (reserved - self.config.worst_case_alloc_gb).max(0.0),
            burst_gb: (reserved - self.config.typical_alloc_gb).max(0.0),
        }
    }

    /// Analyze a reading against the catalog
    pub fn analyze(&self, reading: &ResourceReading, host: HostInfo) -> CapacityReport {
        let cpu = &reading.snapshot.cpu;
        let memory = &reading.snapshot.memory;
        let headroom = self.headroom(memory.total_gb);

        info!(
            total_gb = memory.total_gb,
            safe_gb = headroom.safe_gb,
            burst_gb = headroom.burst_gb,
            models = self.catalog.len(),
            "analyzing capacity"
        );

        let recommendations: Vec<Recommendation> = self
            .catalog
            .models()
            .iter()
            .map(|model| {
                let status = classify(model.ram_cost_gb, &headroom);
                let performance_note = performance_note(cpu, model);
                debug!(model = %model.id, %status, note = %performance_note, "classified");
                Recommendation {
                    id: model.id.clone(),
                    model: model.display_name.clone(),
                    category: model.category,
                    status,
                    ram_cost_gb: model.ram_cost_gb,
                    performance_note,
                    description: model.description.clone(),
                }
            })
            .collect();

        CapacityReport {
            host,
            summary: SystemSummary {
                cpu_model: cpu.model.clone(),
                has_wide_simd: cpu.wide_simd,
                threads: cpu.threads,
                total_ram_gb: round2(memory.total_gb),
                available_ram_gb: round2(memory.available_gb),
                safe_headroom_gb: round2(headroom.safe_gb),
                burst_headroom_gb: round2(headroom.burst_gb),
            },
            recommendations,
            degraded: reading.degraded.clone(),
        }
    }
}

/// Place a model cost into a tier; thresholds are inclusive
pub fn classify(ram_cost_gb: f64, headroom: &Headroom) -> FitStatus {
    if ram_cost_gb <= headroom.safe_gb {
        FitStatus::Permanent
    } else if ram_cost_gb <= headroom.burst_gb {
        FitStatus::Conditional
    } else {
        FitStatus::Incompatible
    }
}

/// CPU-bound expectation for a model on this CPU
pub fn performance_note(cpu: &CpuInfo, model: &ModelSpec) -> PerformanceNote {
    if cpu.threads < EXTREME_LAG_THREAD_LIMIT
        && model.category.is_generative_media()
        && model.ram_cost_gb > EXTREME_LAG_RAM_GB
    {
        PerformanceNote::ExtremeLag
    } else if !cpu.wide_simd && model.category != ModelCategory::Llm {
        PerformanceNote::SlowNoWideSimd
    } else {
        PerformanceNote::Ok
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
