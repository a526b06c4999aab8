//! csv2sdf library
//!
//! Converts comma-delimited event tables into `.sdf` script data files.
//! The binary is a thin wrapper; everything here takes explicit paths and
//! streams so it can run headless.

pub mod convert;
pub mod error;
pub mod path;
pub mod row;

pub use convert::{ConvertConfig, ConvertStats, Converter, convert, convert_stream};
pub use error::ConvertError;
pub use path::{INPUT_PROMPT, prompt_for_path, resolve_input, resolve_output_path};
pub use row::{DELIMITER, FIELD_COUNT, parse_row, split_row};

// Re-export the format types callers need to inspect output
pub use sdf_common::{ByteOrder, Record, SDF_EXT};
