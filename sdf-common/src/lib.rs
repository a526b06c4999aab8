//! Shared types for the SDF script data format
//!
//! An `.sdf` file is consumed by the engine's scripted-event subsystem. It is a
//! plain concatenation of records with no header, footer or record count.
//!
//! # Modules
//!
//! - [`record`] - The `Record` type and its binary encoder
//! - [`reader`] - Sequential record decoder (`SdfReader`)

pub mod reader;
pub mod record;

pub use reader::{DecodeError, Field, SdfReader, decode_records};
pub use record::{ByteOrder, Record, TIMER_SIZE};

/// Script data file extension without dot
pub const SDF_EXT: &str = "sdf";
