//! Input and output path resolution

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use sdf_common::SDF_EXT;

use crate::error::ConvertError;

/// Prompt shown when no input file is given on the command line
pub const INPUT_PROMPT: &str = "Enter CSV filename:  ";

/// Replace the final extension of `input` with `.sdf`.
///
/// No collision check is made; an existing file at the returned path is
/// overwritten by the conversion.
pub fn resolve_output_path(input: &Path) -> PathBuf {
    input.with_extension(SDF_EXT)
}

/// Use the command line path if present, otherwise ask `prompt` for one
pub fn resolve_input<F>(arg: Option<PathBuf>, prompt: F) -> Result<PathBuf, ConvertError>
where
    F: FnOnce() -> Result<PathBuf, ConvertError>,
{
    match arg {
        Some(path) => Ok(path),
        None => prompt(),
    }
}

/// Write [`INPUT_PROMPT`] to `output` and read one line from `input` as a path
pub fn prompt_for_path<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<PathBuf, ConvertError> {
    output
        .write_all(INPUT_PROMPT.as_bytes())
        .and_then(|_| output.flush())
        .map_err(ConvertError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(ConvertError::Prompt)?;

    let path = line.trim_end_matches(['\n', '\r']);
    if path.is_empty() {
        return Err(ConvertError::NoInputPath);
    }
    Ok(PathBuf::from(path))
}
