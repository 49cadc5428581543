/// Accumulates the directives of a single LCOV record.
///
/// Reference: https://ltp.sourceforge.net/coverage/lcov/geninfo.1.php
///
/// Directives handled inside a record:
///   TN:<test name>
///   FN:<line>,<function name>
///   FNDA:<execution count>,<function name>
///   FNF:<number of functions found>
///   FNH:<number of functions hit>
///   BRDA:<line>,<block>,<branch>,<taken>   ("-" means not evaluated)
///   BRF:<branches found>
///   BRH:<branches hit>                     (BFH accepted as a synonym)
///   DA:<line number>,<execution count>[,<checksum>]
///   LF:<lines found>
///   LH:<lines hit>
///
/// `SF:` and `end_of_record` delimit records and are handled by the parser.
use std::collections::btree_map::Entry;
use std::str::FromStr;

use log::trace;

use crate::error::{LcovError, Result};
use crate::model::{Branch, Function, Record};
use crate::options::ParseOptions;

/// Mutable, in-progress record. Sealed into a `Record` by [`finish`].
///
/// [`finish`]: RecordBuilder::finish
pub struct RecordBuilder<'a> {
    record: Record,
    options: &'a ParseOptions,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(filename: String, test: Option<String>, options: &'a ParseOptions) -> Self {
        let mut record = Record::new(filename);
        record.test = test;
        Self { record, options }
    }

    pub fn filename(&self) -> &str {
        &self.record.filename
    }

    /// Interpret one trimmed directive line against the record.
    pub fn apply(&mut self, line: &str) -> Result<()> {
        let (directive, content) = line.split_once(':').unwrap_or((line, ""));

        match directive {
            "TN" => {
                self.record.test = Some(content.to_string());
            }
            "SF" => {
                return Err(LcovError::UnterminatedRecord {
                    open: self.record.filename.clone(),
                    next: content.to_string(),
                });
            }
            "FN" => self.add_function(content)?,
            "FNDA" => self.set_function_executions(content)?,
            "FNF" => {
                let declared = parse_count(directive, content)?;
                self.record.totals.functions_found = declared;
                self.check("FNF", declared, self.record.functions_found())?;
            }
            "FNH" => {
                let declared = parse_count(directive, content)?;
                self.record.totals.functions_hit = declared;
                self.check("FNH", declared, self.record.functions_hit())?;
            }
            "BRDA" => self.add_branch(content)?,
            "BRF" => {
                self.record.totals.branches_found = parse_count(directive, content)?;
            }
            "BRH" | "BFH" => {
                self.record.totals.branches_hit = parse_count(directive, content)?;
            }
            "DA" => self.add_line(content)?,
            "LF" => {
                let declared = parse_count(directive, content)?;
                self.record.totals.lines_found = declared;
                self.check("LF", declared, self.record.lines_found())?;
            }
            "LH" => {
                let declared = parse_count(directive, content)?;
                self.record.totals.lines_hit = declared;
                self.check("LH", declared, self.record.lines_hit())?;
            }
            _ => return Err(LcovError::UnrecognizedDirective(line.to_string())),
        }

        Ok(())
    }

    pub fn finish(self) -> Record {
        self.record
    }

    fn check(&self, directive: &'static str, declared: u64, actual: u64) -> Result<()> {
        if self.options.ignore_incorrect_counts || declared == actual {
            return Ok(());
        }
        Err(LcovError::CountMismatch {
            directive,
            declared,
            actual,
        })
    }

    // FN:<line>,<function name>
    // Names may themselves contain commas (C++ signatures), so only the
    // first comma separates the fields.
    fn add_function(&mut self, content: &str) -> Result<()> {
        let (line, name) = content
            .split_once(',')
            .ok_or_else(|| LcovError::malformed("FN", content))?;
        let line: u32 = parse_field("FN", content, line)?;
        if line == 0 || name.is_empty() {
            return Err(LcovError::malformed("FN", content));
        }

        match self.record.functions.entry(name.to_string()) {
            Entry::Occupied(_) => Err(LcovError::DuplicateFunction(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Function::new(name.to_string(), line));
                Ok(())
            }
        }
    }

    // FNDA:<execution count>,<function name>
    fn set_function_executions(&mut self, content: &str) -> Result<()> {
        let (count, name) = content
            .split_once(',')
            .ok_or_else(|| LcovError::malformed("FNDA", content))?;
        let count: u64 = parse_field("FNDA", content, count)?;

        let function = self
            .record
            .functions
            .get_mut(name)
            .ok_or_else(|| LcovError::UnknownFunction(name.to_string()))?;
        function.executions = Some(count);
        Ok(())
    }

    // BRDA:<line>,<block>,<branch>,<taken>
    fn add_branch(&mut self, content: &str) -> Result<()> {
        let parts: Vec<&str> = content.split(',').collect();
        let &[line, block, branch, taken] = parts.as_slice() else {
            return Err(LcovError::malformed("BRDA", content));
        };

        let executions = if taken == "-" {
            None
        } else {
            Some(parse_field("BRDA", content, taken)?)
        };
        self.record.branches.insert(Branch {
            line: parse_field("BRDA", content, line)?,
            block_number: parse_field("BRDA", content, block)?,
            branch_number: parse_field("BRDA", content, branch)?,
            executions,
        });
        Ok(())
    }

    // DA:<line number>,<execution count>[,<checksum>]
    fn add_line(&mut self, content: &str) -> Result<()> {
        let mut parts = content.splitn(3, ',');
        let (Some(line), Some(count)) = (parts.next(), parts.next()) else {
            return Err(LcovError::malformed("DA", content));
        };
        let line: u32 = parse_field("DA", content, line)?;
        let count: u64 = parse_field("DA", content, count)?;

        match self.record.lines.entry(line) {
            Entry::Vacant(slot) => {
                slot.insert(count);
            }
            Entry::Occupied(mut slot) if self.options.merge_duplicate_line_hit_counts => {
                trace!("{}: merging duplicate DA for line {line}", self.record.filename);
                let merged = slot.get().saturating_add(count);
                slot.insert(merged);
            }
            Entry::Occupied(_) => return Err(LcovError::DuplicateLine(line)),
        }
        Ok(())
    }
}

fn parse_count(directive: &str, content: &str) -> Result<u64> {
    parse_field(directive, content, content)
}

fn parse_field<T: FromStr>(directive: &str, content: &str, field: &str) -> Result<T> {
    field
        .trim()
        .parse()
        .map_err(|_| LcovError::malformed(directive, content))
}
