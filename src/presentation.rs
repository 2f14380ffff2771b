// src/presentation.rs
use std::io::{self, Write};

use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};

use crate::{app::SelectionReport, args::OutputFormat};

pub fn write_report(out: &mut dyn Write, report: &SelectionReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Table => write_table(out, report),
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Plain => write_plain(out, report),
    }
}

fn write_table(out: &mut dyn Write, report: &SelectionReport) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).set_header(["SUITE", "STYLE", "TESTS", "CLASS FILE"]);
    for suite in &report.suites {
        table.add_row([
            suite.class_name.to_string(),
            suite.style.to_string(),
            if suite.restricts_tests { "filtered" } else { "all" }.to_string(),
            suite.origin.as_ref().map(ToString::to_string).unwrap_or_default(),
        ]);
    }
    if !report.suites.is_empty() {
        writeln!(out, "{table}")?;
    }
    writeln!(out, "{}", summary_line(report))
}

fn write_json(out: &mut dyn Write, report: &SelectionReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).map_err(io::Error::other)?;
    writeln!(out)
}

fn write_plain(out: &mut dyn Write, report: &SelectionReport) -> io::Result<()> {
    for suite in &report.suites {
        writeln!(out, "{}", suite.class_name)?;
    }
    Ok(())
}

pub fn summary_line(report: &SelectionReport) -> String {
    format!(
        "[suite-select] {} selected, {} rejected, {} discovered in {} class files ({} skipped)",
        report.filter.admitted, report.filter.rejected, report.scan.discovered, report.scan.examined, report.scan.skipped
    )
}

/// Per-file and per-suite failures, one per line. Nothing when the run was clean.
pub fn write_failures(err: &mut dyn Write, report: &SelectionReport) -> io::Result<()> {
    for failure in &report.scan.failures {
        writeln!(err, "warning: cannot inspect {}: {}", failure.path, failure.reason)?;
    }
    for failure in report.scan.sink_failures.iter().chain(&report.dispatch.failures) {
        writeln!(err, "warning: suite {} was not delivered: {}", failure.suite, failure.reason)?;
    }
    Ok(())
}
