//! Human-readable capacity table

use crate::capacity::{CapacityReport, FitStatus};
use crate::system::SnapshotField;
use console::Style;
use std::io::{self, Write};

const RULE_WIDTH: usize = 78;
const ESTIMATED: &str = " (estimated)";

/// Writes the banner, model table, legend and caveats
#[derive(Debug, Clone, Copy)]
pub struct TableRenderer {
    colors: bool,
}

impl TableRenderer {
    /// Create a renderer; `colors` forces styling on or off
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    fn status_style(&self, status: FitStatus) -> Style {
        let style = match status {
            FitStatus::Permanent => Style::new().green(),
            FitStatus::Conditional => Style::new().yellow(),
            FitStatus::Incompatible => Style::new().red(),
        };
        style.force_styling(self.colors)
    }

    fn header_style(&self) -> Style {
        Style::new().bold().force_styling(self.colors)
    }

    /// Render the table for `report`
    pub fn render<W: Write>(&self, report: &CapacityReport, out: &mut W) -> io::Result<()> {
        let summary = &report.summary;
        let mark = |field: SnapshotField| {
            if report.degraded.iter().any(|d| d.field == field) {
                ESTIMATED
            } else {
                ""
            }
        };
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(out)?;
        writeln!(out, "{heavy}")?;
        writeln!(
            out,
            "{}",
            self.header_style().apply_to(format!(
                " SERVER AI CAPACITY REPORT ({}GB Total{})",
                format_gb(summary.total_ram_gb),
                mark(SnapshotField::TotalRam)
            ))
        )?;
        writeln!(out, "{heavy}")?;
        if !report.host.hostname.is_empty() {
            writeln!(out, "Host: {} ({})", report.host.hostname, report.host.platform)?;
        }
        writeln!(out, "CPU: {}{}", summary.cpu_model, mark(SnapshotField::CpuModel))?;
        writeln!(
            out,
            "Threads: {}{}   AVX2: {}{}",
            summary.threads,
            mark(SnapshotField::ThreadCount),
            if summary.has_wide_simd { "yes" } else { "no" },
            mark(SnapshotField::WideSimd)
        )?;
        writeln!(
            out,
            "Safe RAM Available (Worst Case): {} GB{}",
            format_gb(summary.safe_headroom_gb),
            mark(SnapshotField::TotalRam)
        )?;
        writeln!(
            out,
            "Burst RAM Available (Best Case): {} GB{}",
            format_gb(summary.burst_headroom_gb),
            mark(SnapshotField::TotalRam)
        )?;
        writeln!(out, "{light}")?;
        writeln!(
            out,
            "{:<20} | {:<7} | {:<12} | {:<10} | {}",
            "MODEL", "TYPE", "STATUS", "RAM COST", "PERFORMANCE"
        )?;
        writeln!(out, "{light}")?;

        for rec in &report.recommendations {
            let line = format!(
                "{:<20} | {:<7} | {:<12} | {:<10} | {}",
                rec.model,
                rec.category.as_str(),
                rec.status.as_str(),
                format!("{} GB", format_gb(rec.ram_cost_gb)),
                rec.performance_note.as_str()
            );
            writeln!(out, "{}", self.status_style(rec.status).apply_to(line))?;
        }

        writeln!(out, "{light}")?;
        let totals: Vec<String> = FitStatus::ALL
            .iter()
            .map(|s| format!("{} {}", report.count(*s), s))
            .collect();
        writeln!(out, "Totals: {}", totals.join(", "))?;

        writeln!(out)?;
        writeln!(out, "* PERMANENT: Safe to run alongside full game-server load.")?;
        writeln!(
            out,
            "* CONDITIONAL: Safe only if game-server usage stays typical (~2GB/world)."
        )?;
        writeln!(
            out,
            "* INCOMPATIBLE: High risk of the OOM killer crashing the game servers."
        )?;

        if report.is_estimated() {
            writeln!(out)?;
            writeln!(out, "Caveats (values marked \"estimated\" are not measurements):")?;
            for d in &report.degraded {
                writeln!(out, "  ! {}: {}", d.field.label(), d.reason)?;
            }
        }

        Ok(())
    }
}

/// Format a GB figure without trailing zeros
pub fn format_gb(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
