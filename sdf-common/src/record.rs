//! SDF record binary format (.sdf)
//!
//! One record per scripted event. POD format - no magic bytes, no header.
//!
//! # Layout
//! ```text
//! 0x00: timer i64 (byte order of the producing platform)
//! 0x08: system name (UTF-8, NUL-terminated)
//!  ...: command name (UTF-8, NUL-terminated)
//!  ...: parameters (UTF-8, NUL-terminated)
//! ```
//!
//! Records are written back to back. A reader can only find record
//! boundaries by walking the fields in order.

use std::io::{self, Write};

/// Size of the timer field in bytes
pub const TIMER_SIZE: usize = 8;

/// Byte order used for the timer field.
///
/// The engine reads the timer in whatever order the machine that produced the
/// file used, so `Native` is the default. `Little` and `Big` pin the order for
/// callers that know what the consuming build expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

impl ByteOrder {
    /// Encode a timer value
    pub fn timer_to_bytes(self, timer: i64) -> [u8; TIMER_SIZE] {
        match self {
            ByteOrder::Native => timer.to_ne_bytes(),
            ByteOrder::Little => timer.to_le_bytes(),
            ByteOrder::Big => timer.to_be_bytes(),
        }
    }

    /// Decode a timer value
    pub fn timer_from_bytes(self, bytes: [u8; TIMER_SIZE]) -> i64 {
        match self {
            ByteOrder::Native => i64::from_ne_bytes(bytes),
            ByteOrder::Little => i64::from_le_bytes(bytes),
            ByteOrder::Big => i64::from_be_bytes(bytes),
        }
    }
}

/// A single scripted event.
///
/// Text fields are stored verbatim. A field that itself contains a NUL byte
/// is written as-is and will split the record for any reader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Delay before the command fires, interpreted by the engine
    pub timer: i64,
    /// Target subsystem name
    pub system: String,
    /// Command name
    pub command: String,
    /// Command parameters (opaque)
    pub parameters: String,
}

impl Record {
    pub fn new(
        timer: i64,
        system: impl Into<String>,
        command: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Self {
            timer,
            system: system.into(),
            command: command.into(),
            parameters: parameters.into(),
        }
    }

    /// Size of the encoded record in bytes
    pub fn encoded_len(&self) -> usize {
        TIMER_SIZE + self.system.len() + self.command.len() + self.parameters.len() + 3
    }

    /// Append the encoded record to `buf`
    pub fn encode_into(&self, buf: &mut Vec<u8>, order: ByteOrder) {
        buf.reserve(self.encoded_len());
        buf.extend_from_slice(&order.timer_to_bytes(self.timer));
        for field in [&self.system, &self.command, &self.parameters] {
            buf.extend_from_slice(field.as_bytes());
            buf.push(0);
        }
    }

    /// Encode the record into a new buffer
    pub fn to_bytes(&self, order: ByteOrder) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf, order);
        buf
    }

    /// Write the encoded record with a single `write_all`.
    ///
    /// Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, w: &mut W, order: ByteOrder) -> io::Result<usize> {
        let bytes = self.to_bytes(order);
        w.write_all(&bytes)?;
        Ok(bytes.len())
    }
}
