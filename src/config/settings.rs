//! Configuration settings for AICapacity
//!
//! Defines the CLI arguments, the capacity tunables and their defaults.

use crate::error::{CapacityError, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// RAM reserved for the OS, the uptime monitor and the server panel
pub const DEFAULT_SYSTEM_OVERHEAD_GB: f64 = 3.0;
/// Maximum configured allocation of both game servers (2 x 12 GB)
pub const DEFAULT_WORST_CASE_ALLOC_GB: f64 = 24.0;
/// Observed typical usage of both game servers (2 x 2 GB)
pub const DEFAULT_TYPICAL_ALLOC_GB: f64 = 4.0;
/// Placeholder total RAM when no host source reports memory
pub const DEFAULT_FALLBACK_TOTAL_GB: f64 = 32.0;

/// AICapacity - which local AI models fit next to your game servers
#[derive(Parser, Debug, Clone)]
#[command(name = "aicapacity")]
#[command(author = "AICapacity Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check which local AI models can share this server with the game servers")]
#[command(long_about = r#"
AICapacity inspects CPU and memory on a Linux host and reports which local
AI inference models can run alongside two game-server worlds.

Each model is classified as:
  PERMANENT     fits even when the game servers use their full allocation
  CONDITIONAL   fits only while the game servers stay at typical usage
  INCOMPATIBLE  does not fit in either scenario

Examples:
  aicapacity                          # Full report (table + JSON)
  aicapacity --format json            # JSON only, for automation
  aicapacity --worst-case-gb 16       # Game servers capped at 16 GB
  aicapacity --catalog models.json    # Evaluate a custom model list
"#)]
pub struct CliArgs {
    /// RAM reserved for the OS and support services, in GB
    #[arg(long, env = "AICAPACITY_SYSTEM_OVERHEAD_GB", default_value_t = DEFAULT_SYSTEM_OVERHEAD_GB, value_name = "GB")]
    pub system_overhead_gb: f64,

    /// Full configured allocation of the game servers, in GB
    #[arg(long, env = "AICAPACITY_WORST_CASE_GB", default_value_t = DEFAULT_WORST_CASE_ALLOC_GB, value_name = "GB")]
    pub worst_case_gb: f64,

    /// Typical observed usage of the game servers, in GB
    #[arg(long, env = "AICAPACITY_TYPICAL_GB", default_value_t = DEFAULT_TYPICAL_ALLOC_GB, value_name = "GB")]
    pub typical_gb: f64,

    /// Total RAM assumed when the host reports none, in GB
    #[arg(long, env = "AICAPACITY_FALLBACK_TOTAL_GB", default_value_t = DEFAULT_FALLBACK_TOTAL_GB, value_name = "GB")]
    pub fallback_total_gb: f64,

    /// JSON model catalog to evaluate instead of the built-in list
    #[arg(long, env = "AICAPACITY_CATALOG", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "full")]
    pub format: OutputFormat,

    /// Disable coloured table output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose logging to stderr (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format for the report
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table followed by the JSON dump
    #[default]
    Full,
    /// Human-readable table only
    Table,
    /// JSON only
    Json,
}

impl OutputFormat {
    /// Whether the human-readable table is printed
    pub fn includes_table(&self) -> bool {
        matches!(self, Self::Full | Self::Table)
    }

    /// Whether the JSON dump is printed
    pub fn includes_json(&self) -> bool {
        matches!(self, Self::Full | Self::Json)
    }
}

/// Capacity tunables passed to the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// RAM reserved for the OS and support services
    pub system_overhead_gb: f64,
    /// Game servers at their full configured ceiling
    pub worst_case_alloc_gb: f64,
    /// Game servers at typical usage
    pub typical_alloc_gb: f64,
    /// Total RAM placeholder used when memory could not be read
    pub fallback_total_ram_gb: f64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            system_overhead_gb: DEFAULT_SYSTEM_OVERHEAD_GB,
            worst_case_alloc_gb: DEFAULT_WORST_CASE_ALLOC_GB,
            typical_alloc_gb: DEFAULT_TYPICAL_ALLOC_GB,
            fallback_total_ram_gb: DEFAULT_FALLBACK_TOTAL_GB,
        }
    }
}

impl CapacityConfig {
    /// Build and validate the configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let config = Self {
            system_overhead_gb: args.system_overhead_gb,
            worst_case_alloc_gb: args.worst_case_gb,
            typical_alloc_gb: args.typical_gb,
            fallback_total_ram_gb: args.fallback_total_gb,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every tunable is usable.
    ///
    /// The worst case must reserve at least as much as the typical case,
    /// otherwise safe headroom could exceed burst headroom.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("system overhead", self.system_overhead_gb),
            ("worst-case allocation", self.worst_case_alloc_gb),
            ("typical allocation", self.typical_alloc_gb),
            ("fallback total RAM", self.fallback_total_ram_gb),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CapacityError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.worst_case_alloc_gb < self.typical_alloc_gb {
            return Err(CapacityError::config(format!(
                "worst-case allocation ({} GB) is below typical allocation ({} GB)",
                self.worst_case_alloc_gb, self.typical_alloc_gb
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CapacityConfig::default();
        assert_eq!(config.system_overhead_gb, 3.0);
        assert_eq!(config.worst_case_alloc_gb, 24.0);
        assert_eq!(config.typical_alloc_gb, 4.0);
        assert_eq!(config.fallback_total_ram_gb, 32.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_without_flags_uses_defaults() {
        let args = CliArgs::try_parse_from(["aicapacity"]).unwrap();
        let config = CapacityConfig::from_cli(&args).unwrap();
        assert_eq!(config, CapacityConfig::default());
        assert_eq!(args.format, OutputFormat::Full);
        assert!(args.catalog.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::try_parse_from([
            "aicapacity",
            "--worst-case-gb",
            "16",
            "--typical-gb",
            "2.5",
            "--format",
            "json",
        ])
        .unwrap();
        let config = CapacityConfig::from_cli(&args).unwrap();
        assert_eq!(config.worst_case_alloc_gb, 16.0);
        assert_eq!(config.typical_alloc_gb, 2.5);
        assert!(!args.format.includes_table());
        assert!(args.format.includes_json());
    }

    #[test]
    fn test_rejects_negative_values() {
        let config = CapacityConfig {
            system_overhead_gb: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CapacityConfig {
            fallback_total_ram_gb: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_worst_case_below_typical() {
        let config = CapacityConfig {
            worst_case_alloc_gb: 2.0,
            typical_alloc_gb: 4.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("below typical"));
    }
}
