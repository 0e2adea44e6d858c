//! Capacity report data model

use super::catalog::ModelCategory;
use crate::error::Result;
use crate::system::Degradation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fitness tier of a model against the two headroom scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitStatus {
    /// Fits even with the game servers at their full allocation
    Permanent,
    /// Fits only while the game servers stay at typical usage
    Conditional,
    /// Fits in neither scenario
    Incompatible,
}

impl FitStatus {
    /// All tiers, best first
    pub const ALL: [FitStatus; 3] = [Self::Permanent, Self::Conditional, Self::Incompatible];

    /// Upper-case label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permanent => "PERMANENT",
            Self::Conditional => "CONDITIONAL",
            Self::Incompatible => "INCOMPATIBLE",
        }
    }
}

impl fmt::Display for FitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU-side expectation, independent of the RAM verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceNote {
    /// Heavy generative media on a small CPU
    #[serde(rename = "EXTREME LAG")]
    ExtremeLag,
    /// Non-LLM workload on a CPU without AVX2
    #[serde(rename = "SLOW (no wide-SIMD)")]
    SlowNoWideSimd,
    /// No CPU concern
    #[serde(rename = "OK")]
    Ok,
}

impl PerformanceNote {
    /// Label used in tables and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtremeLag => "EXTREME LAG",
            Self::SlowNoWideSimd => "SLOW (no wide-SIMD)",
            Self::Ok => "OK",
        }
    }
}

impl fmt::Display for PerformanceNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and when the report was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostInfo {
    /// Host name, empty when it cannot be determined
    pub hostname: String,
    /// Operating system family
    pub platform: String,
    /// Report creation time
    pub generated_at: DateTime<Utc>,
    /// Version of this tool
    pub tool_version: String,
}

impl HostInfo {
    /// Describe the current host
    pub fn collect() -> Self {
        Self {
            hostname: hostname::get()
                .map(|h| h.to_string_lossy().to_string())
                .unwrap_or_default(),
            platform: std::env::consts::OS.to_string(),
            generated_at: Utc::now(),
            tool_version: crate::VERSION.to_string(),
        }
    }
}

/// Headline figures of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSummary {
    /// CPU model name
    pub cpu_model: String,
    /// AVX2 support
    pub has_wide_simd: bool,
    /// Logical processors
    pub threads: usize,
    /// Total RAM, measured or placeholder
    pub total_ram_gb: f64,
    /// RAM available at the time of the reading
    pub available_ram_gb: f64,
    /// Headroom with the game servers at full allocation
    pub safe_headroom_gb: f64,
    /// Headroom with the game servers at typical usage
    pub burst_headroom_gb: f64,
}

/// Verdict for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Catalog id
    pub id: String,
    /// Display name
    pub model: String,
    /// Workload kind
    pub category: ModelCategory,
    /// RAM verdict
    pub status: FitStatus,
    /// Estimated RAM cost
    pub ram_cost_gb: f64,
    /// CPU verdict
    pub performance_note: PerformanceNote,
    /// Catalog description
    pub description: String,
}

/// Full analysis result, consumed by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    /// Run metadata
    pub host: HostInfo,
    /// Resource and headroom summary
    pub summary: SystemSummary,
    /// One entry per catalog model, in catalog order
    pub recommendations: Vec<Recommendation>,
    /// Fallbacks taken while reading the host
    pub degraded: Vec<Degradation>,
}

impl CapacityReport {
    /// Number of models in a tier
    pub fn count(&self, status: FitStatus) -> usize {
        self.recommendations
            .iter()
            .filter(|r| r.status == status)
            .count()
    }

    /// Whether any summary value is an estimate
    pub fn is_estimated(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// Pretty-printed JSON of the whole report
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
