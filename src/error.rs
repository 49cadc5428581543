use thiserror::Error;

#[derive(Error, Debug)]
pub enum LcovError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected record to begin with SF (actual: {0})")]
    MalformedRecordStart(String),

    #[error("Unrecognized directive in record: {0}")]
    UnrecognizedDirective(String),

    #[error("Malformed {directive} directive: '{payload}'")]
    MalformedDirective { directive: String, payload: String },

    #[error("Function already contained in record: {0}")]
    DuplicateFunction(String),

    #[error("FNDA references undeclared function: {0}")]
    UnknownFunction(String),

    #[error("Duplicate DA entry for line: {0}")]
    DuplicateLine(u32),

    #[error("Unexpected {directive} count (actual: {actual}; expected: {declared})")]
    CountMismatch {
        directive: &'static str,
        declared: u64,
        actual: u64,
    },

    #[error("Record for '{open}' is missing end_of_record before SF:{next}")]
    UnterminatedRecord { open: String, next: String },
}

impl LcovError {
    pub(crate) fn malformed(directive: &str, payload: &str) -> Self {
        LcovError::MalformedDirective {
            directive: directive.to_string(),
            payload: payload.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LcovError>;
