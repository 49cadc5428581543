//! In-memory representation of a parsed LCOV report. The parser produces a
//! `Report`, a read-only mapping from source filename to `Record`.

use std::collections::{btree_map, BTreeMap, BTreeSet};

use serde::Serialize;

/// A function declared with `FN` and optionally hit-counted with `FNDA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    /// Line the function starts on.
    pub line: u32,
    /// `None` until an `FNDA` entry reports a count.
    pub executions: Option<u64>,
}

impl Function {
    pub fn new(name: String, line: u32) -> Self {
        Self {
            name,
            line,
            executions: None,
        }
    }

    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.executions.is_some_and(|n| n > 0)
    }
}

/// A single branch arm from a `BRDA` entry. Identity covers every field, so
/// two entries differing only in their taken count are distinct branches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Branch {
    pub line: u32,
    pub block_number: u32,
    pub branch_number: u32,
    /// `None` when the enclosing block was never evaluated (`-`), which is
    /// not the same as a branch evaluated zero times.
    pub executions: Option<u64>,
}

impl Branch {
    #[must_use]
    pub fn is_taken(&self) -> bool {
        self.executions.is_some_and(|n| n > 0)
    }
}

/// Summary counts as declared by the report author (FNF/FNH/BRF/BRH/LF/LH).
/// Zero when the corresponding directive is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub functions_found: u64,
    pub functions_hit: u64,
    pub branches_found: u64,
    pub branches_hit: u64,
    pub lines_found: u64,
    pub lines_hit: u64,
}

/// Coverage data for a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub filename: String,
    pub test: Option<String>,
    /// Line number -> execution count.
    pub lines: BTreeMap<u32, u64>,
    /// Function name -> function. Keys always equal `Function::name`.
    pub functions: BTreeMap<String, Function>,
    pub branches: BTreeSet<Branch>,
    pub totals: Totals,
}

impl Record {
    pub fn new(filename: String) -> Self {
        Self {
            filename,
            ..Default::default()
        }
    }

    /// Line numbers with a non-zero execution count, in ascending order.
    pub fn executed_lines(&self) -> BTreeSet<u32> {
        self.lines
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&line, _)| line)
            .collect()
    }

    #[must_use]
    pub fn lines_found(&self) -> u64 {
        self.lines.len() as u64
    }

    #[must_use]
    pub fn lines_hit(&self) -> u64 {
        self.lines.values().filter(|&&count| count > 0).count() as u64
    }

    #[must_use]
    pub fn functions_found(&self) -> u64 {
        self.functions.len() as u64
    }

    #[must_use]
    pub fn functions_hit(&self) -> u64 {
        self.functions.values().filter(|f| f.is_hit()).count() as u64
    }

    #[must_use]
    pub fn branches_found(&self) -> u64 {
        self.branches.len() as u64
    }

    #[must_use]
    pub fn branches_hit(&self) -> u64 {
        self.branches.iter().filter(|b| b.is_taken()).count() as u64
    }
}

/// The complete result of parsing an LCOV report, keyed by source filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    records: BTreeMap<String, Record>,
}

impl Report {
    /// Build a report from sealed records. A later record for a filename
    /// replaces an earlier one.
    pub fn build(records: impl IntoIterator<Item = Record>) -> Self {
        let mut report = Report::default();
        for record in records {
            report.insert(record);
        }
        report
    }

    pub(crate) fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.filename.clone(), record)
    }

    pub fn get(&self, filename: &str) -> Option<&Record> {
        self.records.get(filename)
    }

    #[must_use]
    pub fn contains(&self, filename: &str) -> bool {
        self.records.contains_key(filename)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Record> {
        self.records.iter()
    }

    /// Filename -> executed line numbers, for consumers that only need to
    /// know which lines ran.
    pub fn executed_line_sets(&self) -> BTreeMap<&str, BTreeSet<u32>> {
        self.records
            .iter()
            .map(|(filename, record)| (filename.as_str(), record.executed_lines()))
            .collect()
    }

    pub fn into_records(self) -> impl Iterator<Item = Record> {
        self.records.into_values()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = (&'a String, &'a Record);
    type IntoIter = btree_map::Iter<'a, String, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Report {
    type Item = (String, Record);
    type IntoIter = btree_map::IntoIter<String, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_lines(filename: &str, lines: &[(u32, u64)]) -> Record {
        let mut record = Record::new(filename.to_string());
        record.lines.extend(lines.iter().copied());
        record
    }

    #[test]
    fn test_executed_lines_skips_zero_counts() {
        let record = record_with_lines("/src/lib.rs", &[(3, 0), (1, 5), (2, 1)]);
        let executed: Vec<u32> = record.executed_lines().into_iter().collect();
        assert_eq!(executed, vec![1, 2]);
        assert_eq!(record.lines_found(), 3);
        assert_eq!(record.lines_hit(), 2);
    }

    #[test]
    fn test_function_hit_requires_positive_count() {
        let mut f = Function::new("main".to_string(), 1);
        assert!(!f.is_hit());
        f.executions = Some(0);
        assert!(!f.is_hit());
        f.executions = Some(2);
        assert!(f.is_hit());
    }

    #[test]
    fn test_branch_summaries() {
        let mut record = Record::new("/src/lib.rs".to_string());
        for (branch_number, executions) in [(0, Some(4)), (1, Some(0)), (2, None)] {
            record.branches.insert(Branch {
                line: 7,
                block_number: 0,
                branch_number,
                executions,
            });
        }
        assert_eq!(record.branches_found(), 3);
        assert_eq!(record.branches_hit(), 1);
    }

    #[test]
    fn test_report_build_later_record_wins() {
        let report = Report::build(vec![
            record_with_lines("/src/a.rs", &[(1, 1)]),
            record_with_lines("/src/b.rs", &[(1, 0)]),
            record_with_lines("/src/a.rs", &[(9, 9)]),
        ]);
        assert_eq!(report.len(), 2);
        let a = report.get("/src/a.rs").unwrap();
        assert_eq!(a.lines.get(&9), Some(&9));
        assert!(!a.lines.contains_key(&1));
        assert_eq!(report.filenames().collect::<Vec<_>>(), vec!["/src/a.rs", "/src/b.rs"]);
    }

    #[test]
    fn test_executed_line_sets() {
        let report = Report::build(vec![
            record_with_lines("/src/a.rs", &[(1, 1), (2, 0)]),
            record_with_lines("/src/b.rs", &[(4, 0)]),
        ]);
        let sets = report.executed_line_sets();
        assert_eq!(sets["/src/a.rs"], BTreeSet::from([1]));
        assert!(sets["/src/b.rs"].is_empty());
    }

    #[test]
    fn test_serialize_report() {
        let mut record = record_with_lines("/src/a.rs", &[(1, 2)]);
        record
            .functions
            .insert("f".to_string(), Function::new("f".to_string(), 1));
        let json = serde_json::to_value(Report::build(vec![record])).unwrap();
        assert_eq!(json["/src/a.rs"]["lines"]["1"], 2);
        assert!(json["/src/a.rs"]["functions"]["f"]["executions"].is_null());
    }
}
