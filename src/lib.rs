//! Parser for LCOV `.info` coverage reports.
//!
//! ```
//! use lcovrs::{parse_str, ParseOptions};
//!
//! let report = parse_str("SF:/src/lib.rs\nDA:1,2\nDA:2,0\nend_of_record\n", &ParseOptions::default())?;
//! let record = report.get("/src/lib.rs").unwrap();
//! assert_eq!(record.executed_lines().into_iter().collect::<Vec<_>>(), vec![1]);
//! # Ok::<(), lcovrs::LcovError>(())
//! ```

pub mod builder;
pub mod cli;
pub mod error;
pub mod model;
pub mod options;
pub mod parser;

pub use error::{LcovError, Result};
pub use model::{Branch, Function, Record, Report, Totals};
pub use options::ParseOptions;
pub use parser::{parse_file, parse_lines, parse_reader, parse_str};
