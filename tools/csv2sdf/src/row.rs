//! Row extraction from the input table
//!
//! Rows are split on every comma. There is no quoting, so a field that
//! contains a comma shifts the fields after it.

use sdf_common::Record;

use crate::error::ConvertError;

/// Field delimiter of the input table
pub const DELIMITER: char = ',';

/// Fields read from each row: timer, system, command, parameters
pub const FIELD_COUNT: usize = 4;

/// Split one input line into its fields.
///
/// An empty line has no fields. A trailing `\r` left over from CRLF input is
/// dropped.
pub fn split_row(line: &str) -> Vec<&str> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return Vec::new();
    }
    line.split(DELIMITER).collect()
}

/// Parse one input line into a record.
///
/// `row` is the 1-based line number, used for error reporting only.
pub fn parse_row(line: &str, row: usize) -> Result<Record, ConvertError> {
    let fields = split_row(line);
    if fields.len() < FIELD_COUNT {
        return Err(ConvertError::MalformedRow {
            row,
            fields: fields.len(),
        });
    }
    if fields.len() > FIELD_COUNT {
        tracing::debug!(
            "Row {}: ignoring {} extra field(s)",
            row,
            fields.len() - FIELD_COUNT
        );
    }

    let timer = fields[0]
        .trim()
        .parse::<i64>()
        .map_err(|source| ConvertError::InvalidTimer {
            row,
            value: fields[0].to_string(),
            source,
        })?;

    Ok(Record::new(timer, fields[1], fields[2], fields[3]))
}
