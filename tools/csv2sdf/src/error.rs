//! Error type for CSV to SDF conversion

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Error type for a conversion run.
///
/// Row numbers are 1-based line numbers of the input table.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to open input {path:?}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create output {path:?}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Row {row}: failed to read input: {source}")]
    Read {
        row: usize,
        #[source]
        source: io::Error,
    },

    #[error("Row {row}: expected 4 fields, found {fields}")]
    MalformedRow { row: usize, fields: usize },

    #[error("Row {row}: invalid timer {value:?}: {source}")]
    InvalidTimer {
        row: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Row {row}: failed to write record: {source}")]
    Write {
        row: usize,
        #[source]
        source: io::Error,
    },

    #[error("Failed to flush output {path:?}: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read input filename: {0}")]
    Prompt(#[source] io::Error),

    #[error("No input filename given")]
    NoInputPath,
}
