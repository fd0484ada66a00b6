use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a mining run.
///
/// None of these are recoverable: the driver propagates them with `?` and the
/// binary reports the display string as a single diagnostic line.
#[derive(Error, Debug)]
pub enum AprioriError {
    /// Wrong number of positional arguments or an unknown flag.
    #[error("invalid arguments: {usage}")]
    InvalidArguments { usage: String },

    /// Input path does not resolve to a readable file.
    #[error("file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    #[error("threshold '{input}' is not a number")]
    ThresholdNotANumber { input: String },

    #[error("threshold {value} is not a valid percent, use a number between {min} and {max}")]
    ThresholdOutOfRange { value: f64, min: f64, max: f64 },

    /// A line of the transaction source could not be split into its fields.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AprioriError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AprioriError>;
