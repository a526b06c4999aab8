//! Sequential SDF decoder
//!
//! The format has no index, so records can only be read front to back.

use std::fmt;
use std::io::{self, BufRead, ErrorKind};
use std::string::FromUtf8Error;

use crate::record::{ByteOrder, Record, TIMER_SIZE};

/// Text fields of a record, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    System,
    Command,
    Parameters,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::System => "system",
            Field::Command => "command",
            Field::Parameters => "parameters",
        };
        f.write_str(name)
    }
}

/// Error type for SDF decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Truncated timer at offset {offset}")]
    TruncatedTimer { offset: u64 },

    #[error("Unterminated {field} field at offset {offset}")]
    UnterminatedField { offset: u64, field: Field },

    #[error("Invalid UTF-8 in {field} field at offset {offset}")]
    InvalidUtf8 {
        offset: u64,
        field: Field,
        #[source]
        source: FromUtf8Error,
    },
}

/// Reads records one at a time from a byte stream.
///
/// Iteration stops after the first error.
pub struct SdfReader<R> {
    inner: R,
    order: ByteOrder,
    offset: u64,
    failed: bool,
}

impl<R: BufRead> SdfReader<R> {
    /// Reader using the native byte order
    pub fn new(inner: R) -> Self {
        Self::with_byte_order(inner, ByteOrder::Native)
    }

    pub fn with_byte_order(inner: R, order: ByteOrder) -> Self {
        Self {
            inner,
            order,
            offset: 0,
            failed: false,
        }
    }

    /// Byte offset of the next unread record
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next record, or `None` at a clean end of stream
    pub fn read_record(&mut self) -> Result<Option<Record>, DecodeError> {
        let start = self.offset;
        let mut timer = [0u8; TIMER_SIZE];
        let mut filled = 0;
        while filled < TIMER_SIZE {
            match self.inner.read(&mut timer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < TIMER_SIZE {
            return Err(DecodeError::TruncatedTimer { offset: start });
        }
        self.offset += TIMER_SIZE as u64;

        let system = self.read_field(Field::System)?;
        let command = self.read_field(Field::Command)?;
        let parameters = self.read_field(Field::Parameters)?;

        Ok(Some(Record {
            timer: self.order.timer_from_bytes(timer),
            system,
            command,
            parameters,
        }))
    }

    fn read_field(&mut self, field: Field) -> Result<String, DecodeError> {
        let offset = self.offset;
        let mut buf = Vec::new();
        let n = self.inner.read_until(0, &mut buf)?;
        self.offset += n as u64;

        if buf.pop() != Some(0) {
            return Err(DecodeError::UnterminatedField { offset, field });
        }
        String::from_utf8(buf).map_err(|source| DecodeError::InvalidUtf8 {
            offset,
            field,
            source,
        })
    }
}

impl<R: BufRead> Iterator for SdfReader<R> {
    type Item = Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode every record in an in-memory SDF buffer
pub fn decode_records(data: &[u8], order: ByteOrder) -> Result<Vec<Record>, DecodeError> {
    SdfReader::with_byte_order(data, order).collect()
}
