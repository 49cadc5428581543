//! Report assembly: splits a line sequence into records and hands each
//! record's directives to a [`RecordBuilder`].
//!
//! A report is a sequence of records:
//!
//! ```text
//! [TN:<test name>]
//! SF:<path to source file>
//! <directives...>
//! end_of_record
//! ```
//!
//! Blank lines are tolerated between records only. A record that runs into
//! the end of input without `end_of_record` is accepted as complete. Any
//! error aborts the whole parse.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::{debug, trace};

use crate::builder::RecordBuilder;
use crate::error::{LcovError, Result};
use crate::model::{Record, Report};
use crate::options::ParseOptions;

const END_OF_RECORD: &str = "end_of_record";

/// Parse a report from any sequence of lines.
pub fn parse_lines<I>(lines: I, options: &ParseOptions) -> Result<Report>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    assemble(lines.into_iter().map(Ok), options)
}

/// Parse the full text of a report.
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<Report> {
    parse_lines(text.lines(), options)
}

/// Parse a report line by line from a buffered reader, so the full input
/// need not be in memory at once.
pub fn parse_reader<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Report> {
    assemble(reader.lines().map(|line| line.map_err(LcovError::from)), options)
}

/// Open and parse an LCOV file.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Report> {
    let file = File::open(path.as_ref())?;
    parse_reader(BufReader::new(file), options)
}

impl FromStr for Report {
    type Err = LcovError;

    fn from_str(s: &str) -> Result<Self> {
        parse_str(s, &ParseOptions::default())
    }
}

fn assemble<I, S>(mut lines: I, options: &ParseOptions) -> Result<Report>
where
    I: Iterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let mut report = Report::default();
    while let Some(record) = next_record(&mut lines, options)? {
        debug!(
            "sealed record {} ({} lines, {} functions, {} branches)",
            record.filename,
            record.lines.len(),
            record.functions.len(),
            record.branches.len()
        );
        if let Some(previous) = report.insert(record) {
            debug!("record for {} replaced an earlier one", previous.filename);
        }
    }
    Ok(report)
}

/// Pull the next record off the line cursor. Returns `None` once input is
/// exhausted at a record boundary.
fn next_record<I, S>(lines: &mut I, options: &ParseOptions) -> Result<Option<Record>>
where
    I: Iterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let mut test = None;
    let filename = loop {
        let Some(raw) = lines.next().transpose()? else {
            return Ok(None);
        };
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(':') {
            Some(("TN", name)) => test = Some(name.to_string()),
            Some(("SF", filename)) => break filename.to_string(),
            _ => return Err(LcovError::MalformedRecordStart(line.to_string())),
        }
    };

    let mut builder = RecordBuilder::new(filename, test, options);
    for raw in lines {
        let raw = raw?;
        let line = raw.as_ref().trim();
        if line == END_OF_RECORD {
            return Ok(Some(builder.finish()));
        }
        builder.apply(line)?;
    }

    trace!("{}: input ended without end_of_record", builder.filename());
    Ok(Some(builder.finish()))
}
