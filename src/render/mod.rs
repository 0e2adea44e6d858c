//! Report rendering
//!
//! Emits the human-readable table and the JSON dump of a
//! [`CapacityReport`] without modifying it.

mod table;

pub use table::{format_gb, TableRenderer};

use crate::capacity::CapacityReport;
use crate::config::OutputFormat;
use crate::error::{CapacityError, Result};
use std::io::Write;
use tracing::debug;

/// Writes a report in the selected format
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer {
    format: OutputFormat,
    table: TableRenderer,
}

impl ReportRenderer {
    /// Create a renderer for `format`
    pub fn new(format: OutputFormat, colors: bool) -> Self {
        Self {
            format,
            table: TableRenderer::new(colors),
        }
    }

    /// Render to any writer
    pub fn render<W: Write>(&self, report: &CapacityReport, out: &mut W) -> Result<()> {
        if self.format.includes_table() {
            self.table.render(report, out).map_err(CapacityError::Output)?;
        }

        if self.format.includes_json() {
            let json = report.to_json_pretty()?;
            if self.format.includes_table() {
                writeln!(out, "\nJSON Output for Automation:").map_err(CapacityError::Output)?;
            }
            writeln!(out, "{json}").map_err(CapacityError::Output)?;
        }

        out.flush().map_err(CapacityError::Output)
    }

    /// Render to standard output.
    ///
    /// A reader closing the pipe early ends output without an error.
    pub fn print(&self, report: &CapacityReport) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        ignore_broken_pipe(self.render(report, &mut lock))
    }
}

fn ignore_broken_pipe(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_broken_pipe() => {
            debug!("report reader closed the pipe");
            Ok(())
        }
        other => other,
    }
}
