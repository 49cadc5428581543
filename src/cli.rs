//! Command handler functions for the lcovrs CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::model::{Record, Report};
use crate::options::ParseOptions;
use crate::parser;

/// Gaps of at most this many non-instrumented lines are folded into the
/// surrounding range when listing executed lines.
const MAX_BRIDGE_GAP: u32 = 2;

/// Read and parse a report, attaching the path to any failure.
pub fn load(path: &Path, options: &ParseOptions) -> Result<Report> {
    parser::parse_file(path, options)
        .with_context(|| format!("Failed to parse LCOV report {}", path.display()))
}

pub fn cmd_summary(report: &Report) -> Result<String> {
    if report.is_empty() {
        return Ok("No records in report.\n".to_string());
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<60} {:>10} {:>10} {:>10}",
        "FILE", "LINES", "FUNCTIONS", "BRANCHES"
    )?;
    writeln!(out, "{}", "-".repeat(93))?;

    let mut totals = [0u64; 6];
    for (path, record) in report {
        let counts = observed_counts(record);
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
        write_summary_row(&mut out, path, counts)?;
    }

    writeln!(out, "{}", "-".repeat(93))?;
    write_summary_row(&mut out, &format!("TOTAL ({} files)", report.len()), totals)?;
    Ok(out)
}

fn observed_counts(record: &Record) -> [u64; 6] {
    [
        record.lines_hit(),
        record.lines_found(),
        record.functions_hit(),
        record.functions_found(),
        record.branches_hit(),
        record.branches_found(),
    ]
}

fn write_summary_row(out: &mut String, label: &str, counts: [u64; 6]) -> Result<()> {
    let [lh, lf, fh, ff, bh, bf] = counts;
    writeln!(
        out,
        "{:<60} {:>10} {:>10} {:>10}",
        label,
        format!("{lh}/{lf}"),
        format!("{fh}/{ff}"),
        format!("{bh}/{bf}"),
    )?;
    Ok(())
}

/// List executed line numbers, either for every file or just `source`.
pub fn cmd_lines(report: &Report, source: Option<&str>) -> Result<String> {
    let mut out = String::new();

    if let Some(source) = source {
        let Some(record) = report.get(source) else {
            bail!("No record for '{source}' in report");
        };
        writeln!(out, "{}", executed_ranges(record))?;
        return Ok(out);
    }

    for (path, record) in report {
        writeln!(out, "{path}: {}", executed_ranges(record))?;
    }
    Ok(out)
}

/// Serialize the whole report as JSON.
pub fn cmd_json(report: &Report, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    json.push('\n');
    Ok(json)
}

fn executed_ranges(record: &Record) -> String {
    let executed: Vec<u32> = record.executed_lines().into_iter().collect();
    if executed.is_empty() {
        return "(none)".to_string();
    }
    let instrumented: Vec<u32> = record.lines.keys().copied().collect();
    format_line_ranges(&executed, &instrumented)
}

/// Coalesce sorted line numbers into `(start, end)` ranges, bridging gaps of
/// at most [`MAX_BRIDGE_GAP`] lines when no line in the gap is instrumented.
///
/// Both slices must be sorted and deduplicated.
#[must_use]
pub fn coalesce_ranges(lines: &[u32], instrumented: &[u32]) -> Vec<(u32, u32)> {
    let Some((&first, rest)) = lines.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let (mut start, mut end) = (first, first);
    for &line in rest {
        let gap = line - end - 1;
        if gap <= MAX_BRIDGE_GAP
            && (end + 1..line).all(|l| instrumented.binary_search(&l).is_err())
        {
            end = line;
        } else {
            ranges.push((start, end));
            start = line;
            end = line;
        }
    }
    ranges.push((start, end));
    ranges
}

/// Format line numbers as compact ranges, e.g. `1-3, 7, 9-10`.
#[must_use]
pub fn format_line_ranges(lines: &[u32], instrumented: &[u32]) -> String {
    coalesce_ranges(lines, instrumented)
        .iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
