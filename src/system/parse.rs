//! Parsers for host-exposed resource tables
//!
//! All functions here are pure over the text they receive, so they can be
//! exercised with captured `/proc` and `free` output.

use crate::error::{CapacityError, Result};

/// Instruction-set extension that counts as wide SIMD
pub const WIDE_SIMD_FLAG: &str = "avx2";

const KB_PER_MB: u64 = 1024;
const MB_PER_GB: u64 = 1024;

/// CPU facts extracted from `/proc/cpuinfo`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuTable {
    /// Number of `processor` entries, one per logical CPU
    pub processors: usize,
    /// First `model name` entry
    pub model: Option<String>,
    /// Whether any `flags` entry was present at all
    pub has_flags: bool,
    /// Whether a `flags` entry carries [`WIDE_SIMD_FLAG`]
    pub wide_simd: bool,
}

/// Memory counters extracted from `/proc/meminfo`, in kB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryTable {
    /// `MemTotal`
    pub total_kb: u64,
    /// `MemAvailable`, missing before Linux 3.14
    pub available_kb: Option<u64>,
    /// `MemFree`
    pub free_kb: Option<u64>,
}

/// Memory figures reported by `free -g`, already in GB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct FreeOutput {
    pub total_gb: u64,
    pub free_gb: Option<u64>,
    pub available_gb: Option<u64>,
}

/// Parse the CPU descriptor table.
pub fn parse_cpuinfo(content: &str) -> CpuTable {
    let mut table = CpuTable::default();

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "processor" => table.processors += 1,
            "model name" if table.model.is_none() => {
                let model = value.trim();
                if !model.is_empty() {
                    table.model = Some(model.to_string());
                }
            }
            "flags" => {
                table.has_flags = true;
                if value.split_whitespace().any(|flag| flag == WIDE_SIMD_FLAG) {
                    table.wide_simd = true;
                }
            }
            _ => {}
        }
    }

    table
}

/// Parse the memory descriptor table.
///
/// `MemTotal` is mandatory; the other counters are optional because older
/// kernels do not expose `MemAvailable`.
pub fn parse_meminfo(content: &str) -> Result<MemoryTable> {
    let mut total = None;
    let mut available = None;
    let mut free = None;

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(kb) = value.parse::<u64>() else {
            continue;
        };
        match key.trim_end_matches(':') {
            "MemTotal" => total = Some(kb),
            "MemAvailable" => available = Some(kb),
            "MemFree" => free = Some(kb),
            _ => {}
        }
    }

    let total_kb = total.ok_or_else(|| CapacityError::parse("meminfo", "no MemTotal entry"))?;

    Ok(MemoryTable {
        total_kb,
        available_kb: available,
        free_kb: free,
    })
}

/// Parse the output of `free -g`.
///
/// Uses the `Mem:` row: column 1 is total, column 3 free and column 6
/// available. Old procps releases have no `available` header, in which case
/// column 6 is the page cache and is ignored.
pub fn parse_free_output(content: &str) -> Result<FreeOutput> {
    let has_available = content
        .lines()
        .next()
        .is_some_and(|header| header.contains("available"));

    let row = content
        .lines()
        .find(|line| line.trim_start().starts_with("Mem:"))
        .ok_or_else(|| CapacityError::parse("free output", "no Mem: row"))?;

    let columns: Vec<&str> = row.split_whitespace().collect();
    let column = |idx: usize| columns.get(idx).and_then(|v| v.parse::<u64>().ok());

    let total_gb = column(1)
        .ok_or_else(|| CapacityError::parse("free output", format!("bad total column in '{row}'")))?;

    Ok(FreeOutput {
        total_gb,
        free_gb: column(3),
        available_gb: if has_available { column(6) } else { None },
    })
}

/// Convert a kB counter into whole GB, truncating at each step.
pub fn kb_to_whole_gb(kb: u64) -> u64 {
    kb / KB_PER_MB / MB_PER_GB
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPUINFO: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i5-6500 CPU @ 3.20GHz
flags\t\t: fpu vme de pse sse4_2 avx avx2 bmi2

processor\t: 1
model name\t: Some Other Name
flags\t\t: fpu vme de pse sse4_2 avx avx2 bmi2
";

    const MEMINFO: &str = "\
MemTotal:       32781364 kB
MemFree:         1843200 kB
MemAvailable:   20971520 kB
Buffers:          123456 kB
";

    #[test]
    fn test_cpuinfo_takes_first_model_name() {
        let table = parse_cpuinfo(CPUINFO);
        assert_eq!(table.processors, 2);
        assert_eq!(
            table.model.as_deref(),
            Some("Intel(R) Core(TM) i5-6500 CPU @ 3.20GHz")
        );
        assert!(table.has_flags);
        assert!(table.wide_simd);
    }

    #[test]
    fn test_cpuinfo_flag_matches_whole_token() {
        let table = parse_cpuinfo("flags\t: fpu avx avx512f\n");
        assert!(table.has_flags);
        assert!(!table.wide_simd);
        assert!(table.model.is_none());
        assert_eq!(table.processors, 0);
    }

    #[test]
    fn test_cpuinfo_empty() {
        assert_eq!(parse_cpuinfo(""), CpuTable::default());
    }

    #[test]
    fn test_meminfo_counters() {
        let table = parse_meminfo(MEMINFO).unwrap();
        assert_eq!(table.total_kb, 32781364);
        assert_eq!(table.free_kb, Some(1843200));
        assert_eq!(table.available_kb, Some(20971520));
    }

    #[test]
    fn test_meminfo_requires_total() {
        assert!(parse_meminfo("MemFree: 100 kB\n").is_err());
    }

    #[test]
    fn test_kb_to_gb_truncates() {
        // 32781364 kB = 32012 MB = 31.26 GB
        assert_eq!(kb_to_whole_gb(32781364), 31);
        assert_eq!(kb_to_whole_gb(1024 * 1024), 1);
        assert_eq!(kb_to_whole_gb(1024 * 1024 - 1), 0);
    }

    #[test]
    fn test_free_output() {
        let out = "\
               total        used        free      shared  buff/cache   available
Mem:              31          10           2           0          18          20
Swap:              1           0           1
";
        let parsed = parse_free_output(out).unwrap();
        assert_eq!(parsed.total_gb, 31);
        assert_eq!(parsed.free_gb, Some(2));
        assert_eq!(parsed.available_gb, Some(20));
    }

    #[test]
    fn test_free_output_without_available_column() {
        let out = "\
             total       used       free     shared    buffers     cached
Mem:            15         14          1          0          0          9
-/+ buffers/cache:          4         11
";
        let parsed = parse_free_output(out).unwrap();
        assert_eq!(parsed.total_gb, 15);
        assert_eq!(parsed.free_gb, Some(1));
        assert_eq!(parsed.available_gb, None);
    }

    #[test]
    fn test_free_output_garbage() {
        assert!(parse_free_output("command not found").is_err());
        assert!(parse_free_output("Mem: lots").is_err());
    }
}
