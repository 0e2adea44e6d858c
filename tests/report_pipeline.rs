//! End-to-end pipeline over captured host files

use aicapacity::capacity::{CapacityAnalyzer, Catalog, FitStatus, HostInfo, PerformanceNote};
use aicapacity::config::{CapacityConfig, OutputFormat};
use aicapacity::render::ReportRenderer;
use aicapacity::system::{LinuxHost, MemorySource, ResourceReader, SnapshotField};
use std::fs;
use tempfile::TempDir;

const CPUINFO_2T: &str = "\
processor\t: 0
model name\t: Intel(R) Core(TM) i5-7400T CPU @ 2.40GHz
flags\t\t: fpu vme sse4_1 sse4_2 avx avx2
processor\t: 1
model name\t: Intel(R) Core(TM) i5-7400T CPU @ 2.40GHz
flags\t\t: fpu vme sse4_1 sse4_2 avx avx2
";

fn write_host(dir: &TempDir, cpuinfo: &str, meminfo: &str) -> LinuxHost {
    let cpu = dir.path().join("cpuinfo");
    let mem = dir.path().join("meminfo");
    fs::write(&cpu, cpuinfo).unwrap();
    fs::write(&mem, meminfo).unwrap();
    LinuxHost::with_paths(cpu, mem)
}

fn analyzer() -> CapacityAnalyzer {
    CapacityAnalyzer::new(CapacityConfig::default(), Catalog::builtin())
}

#[test]
fn test_32gb_host_end_to_end() {
    let dir = TempDir::new().unwrap();
    let host = write_host(
        &dir,
        CPUINFO_2T,
        "MemTotal: 33554432 kB\nMemFree: 2097152 kB\nMemAvailable: 20971520 kB\n",
    );

    let reading = ResourceReader::new(host).read().with_total_fallback(32.0);
    assert_eq!(reading.snapshot.memory.source, MemorySource::ProcMeminfo);
    assert!(reading.snapshot.cpu.wide_simd);

    let report = analyzer().analyze(&reading, HostInfo::collect());
    assert_eq!(report.summary.safe_headroom_gb, 5.0);
    assert_eq!(report.summary.burst_headroom_gb, 25.0);
    assert_eq!(report.recommendations.len(), 10);

    let flux = report
        .recommendations
        .iter()
        .find(|r| r.id == "flux-schnell")
        .unwrap();
    assert_eq!(flux.status, FitStatus::Conditional);

    let mut out = Vec::new();
    ReportRenderer::new(OutputFormat::Full, false)
        .render(&report, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("i5-7400T"));
    assert!(text.contains("JSON Output for Automation:"));
}

#[test]
fn test_unreadable_host_uses_placeholder() {
    let dir = TempDir::new().unwrap();
    let host = LinuxHost::with_paths(dir.path().join("nope-cpu"), dir.path().join("nope-mem"))
        .with_free_command("definitely-not-a-real-free-binary");

    let reading = ResourceReader::new(host).read().with_total_fallback(32.0);
    assert_eq!(reading.snapshot.memory.source, MemorySource::Unavailable);
    assert_eq!(reading.snapshot.memory.total_gb, 32.0);
    assert!(reading.is_degraded(SnapshotField::TotalRam));
    assert!(reading.is_degraded(SnapshotField::CpuModel));
    assert!(reading.is_degraded(SnapshotField::ThreadCount));

    let report = analyzer().analyze(&reading, HostInfo::collect());
    assert!(report.is_estimated());
    assert_eq!(report.summary.cpu_model, "Unknown");
    // Without AVX2 every non-LLM model is flagged slow unless it lags outright
    assert!(report
        .recommendations
        .iter()
        .filter(|r| r.category != aicapacity::capacity::ModelCategory::Llm)
        .all(|r| r.performance_note != PerformanceNote::Ok));
}

#[test]
fn test_custom_catalog_file() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("models.json");
    fs::write(
        &catalog_path,
        r#"{"models": [
            {"id": "phi3-mini", "category": "LLM", "name": "Phi-3 Mini", "ram_gb": 3.0, "desc": "Small"},
            {"id": "whisper-small", "category": "Audio", "name": "Whisper Small", "ram_gb": 30.0, "desc": "Too big"}
        ]}"#,
    )
    .unwrap();

    let catalog = Catalog::load(&catalog_path).unwrap();
    let host = write_host(
        &dir,
        CPUINFO_2T,
        "MemTotal: 67108864 kB\nMemAvailable: 33554432 kB\nMemFree: 1048576 kB\n",
    );
    let reading = ResourceReader::new(host).read();

    let report = CapacityAnalyzer::new(CapacityConfig::default(), catalog)
        .analyze(&reading, HostInfo::collect());
    assert_eq!(report.recommendations.len(), 2);
    assert_eq!(report.recommendations[0].status, FitStatus::Permanent);
    assert_eq!(report.recommendations[1].status, FitStatus::Permanent);
    // Two processor entries in the table, whatever the build machine has
    assert_eq!(reading.snapshot.cpu.threads, 2);
    assert!(!reading.is_degraded(SnapshotField::ThreadCount));
    assert_eq!(
        report.recommendations[1].performance_note,
        PerformanceNote::ExtremeLag
    );
}
