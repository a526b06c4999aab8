//! CSV to SDF conversion
//!
//! A single pass: each input line is parsed, encoded and appended to the
//! output before the next line is read. The first failure ends the run and
//! leaves the output holding every record written before it.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use sdf_common::ByteOrder;

use crate::error::ConvertError;
use crate::path::resolve_output_path;
use crate::row::parse_row;

/// Settings for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Input CSV table
    pub input: PathBuf,
    /// Output .sdf file, created or truncated
    pub output: PathBuf,
    /// Byte order of the timer field
    pub byte_order: ByteOrder,
}

impl ConvertConfig {
    /// Config writing next to `input` with the `.sdf` extension
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = resolve_output_path(&input);
        Self {
            input,
            output,
            byte_order: ByteOrder::Native,
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Records written
    pub records: usize,
    /// Bytes written
    pub bytes: u64,
}

/// Converts one CSV table into one SDF file
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Run the conversion.
    ///
    /// The input is opened before the output is created, so a missing input
    /// leaves the file system untouched.
    pub fn run(&self) -> Result<ConvertStats, ConvertError> {
        let ConvertConfig {
            input,
            output,
            byte_order,
        } = &self.config;

        tracing::info!("Opening {:?} for conversion", input);
        let reader = File::open(input).map_err(|source| ConvertError::OpenInput {
            path: input.clone(),
            source,
        })?;
        let writer = File::create(output).map_err(|source| ConvertError::CreateOutput {
            path: output.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(writer);
        let written = convert_stream(BufReader::new(reader), &mut writer, *byte_order);

        // Earlier records stay on disk even when a later row fails
        let flushed = writer.flush();
        let stats = written?;
        flushed.map_err(|source| ConvertError::Flush {
            path: output.clone(),
            source,
        })?;

        tracing::info!("Wrote file {:?}", output);
        if stats.records == 0 {
            tracing::warn!("No records in {:?}, output is empty", input);
        }
        tracing::info!("{} records, {} bytes", stats.records, stats.bytes);
        Ok(stats)
    }
}

/// Convert `input` to `output` with native timer byte order
pub fn convert(input: &Path, output: &Path) -> Result<ConvertStats, ConvertError> {
    Converter::new(ConvertConfig {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        byte_order: ByteOrder::Native,
    })
    .run()
}

/// Encode every line of `input` as a record appended to `output`.
///
/// Each record is encoded in full before it is written, so a failing row
/// contributes no bytes.
pub fn convert_stream<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    order: ByteOrder,
) -> Result<ConvertStats, ConvertError> {
    let mut stats = ConvertStats::default();
    let mut buf = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let row = index + 1;
        let line = line.map_err(|source| ConvertError::Read { row, source })?;
        let record = parse_row(&line, row)?;

        buf.clear();
        record.encode_into(&mut buf, order);
        output
            .write_all(&buf)
            .map_err(|source| ConvertError::Write { row, source })?;

        stats.records += 1;
        stats.bytes += buf.len() as u64;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdf_common::{Record, decode_records};
    use std::io::{self, Cursor};
    use tempfile::tempdir;

    const SCENARIO: &str = "10,audio,play,explosion.wav\n-5,gfx,flash,0xFF0000\n";

    fn scenario_bytes() -> Vec<u8> {
        let mut expected = 10i64.to_ne_bytes().to_vec();
        expected.extend_from_slice(b"audio\0play\0explosion.wav\0");
        expected.extend_from_slice(&(-5i64).to_ne_bytes());
        expected.extend_from_slice(b"gfx\0flash\0");
        expected.extend_from_slice(b"0xFF0000\0");
        expected
    }

    #[test]
    fn test_stream_scenario() {
        let mut out = Vec::new();
        let stats = convert_stream(Cursor::new(SCENARIO), &mut out, ByteOrder::Native).unwrap();

        assert_eq!(out, scenario_bytes());
        assert_eq!(stats.records, 2);
        assert_eq!(stats.bytes, out.len() as u64);
    }

    #[test]
    fn test_stream_round_trip_preserves_order() {
        let input = "1,a,b,c\n2,d,e,\n-3,f,g,h=1;i=2\n+4,j,k,l\n";
        let mut out = Vec::new();
        convert_stream(Cursor::new(input), &mut out, ByteOrder::Native).unwrap();

        let decoded = decode_records(&out, ByteOrder::Native).unwrap();
        assert_eq!(
            decoded,
            vec![
                Record::new(1, "a", "b", "c"),
                Record::new(2, "d", "e", ""),
                Record::new(-3, "f", "g", "h=1;i=2"),
                Record::new(4, "j", "k", "l"),
            ]
        );
        let total: usize = decoded.iter().map(Record::encoded_len).sum();
        assert_eq!(total, out.len());
    }

    #[test]
    fn test_stream_stops_at_malformed_row() {
        let input = "1,a,b,c\n2,d,e\n3,f,g,h\n";
        let mut out = Vec::new();
        let err = convert_stream(Cursor::new(input), &mut out, ByteOrder::Native).unwrap_err();

        assert!(matches!(err, ConvertError::MalformedRow { row: 2, fields: 3 }));
        assert_eq!(out, Record::new(1, "a", "b", "c").to_bytes(ByteOrder::Native));
    }

    #[test]
    fn test_stream_crlf_input() {
        let mut out = Vec::new();
        convert_stream(
            Cursor::new("10,audio,play,explosion.wav\r\n-5,gfx,flash,0xFF0000\r\n"),
            &mut out,
            ByteOrder::Native,
        )
        .unwrap();
        assert_eq!(out, scenario_bytes());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_write_failure() {
        let err = convert_stream(Cursor::new(SCENARIO), &mut FailingWriter, ByteOrder::Native)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Write { row: 1, .. }));
    }

    #[test]
    fn test_config_for_input() {
        let config = ConvertConfig::for_input("levels/intro.csv");
        assert_eq!(config.output, PathBuf::from("levels/intro.sdf"));
        assert_eq!(config.byte_order, ByteOrder::Native);
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("events.csv");
        std::fs::write(&input, SCENARIO).unwrap();

        let converter = Converter::new(ConvertConfig::for_input(&input));
        let stats = converter.run().unwrap();

        let data = std::fs::read(dir.path().join("events.sdf")).unwrap();
        assert_eq!(data, scenario_bytes());
        assert_eq!(stats.bytes, data.len() as u64);
    }

    #[test]
    fn test_run_is_idempotent() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("events.csv");
        let output = dir.path().join("events.sdf");
        std::fs::write(&input, SCENARIO).unwrap();

        convert(&input, &output).unwrap();
        let first = std::fs::read(&output).unwrap();
        convert(&input, &output).unwrap();
        let second = std::fs::read(&output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_overwrites_existing_output() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("events.csv");
        let output = dir.path().join("events.sdf");
        std::fs::write(&input, "1,a,b,c\n").unwrap();
        std::fs::write(&output, vec![0xAA; 256]).unwrap();

        convert(&input, &output).unwrap();
        let data = std::fs::read(&output).unwrap();
        assert_eq!(data, Record::new(1, "a", "b", "c").to_bytes(ByteOrder::Native));
    }

    #[test]
    fn test_run_missing_input_creates_nothing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("missing.csv");
        let output = dir.path().join("missing.sdf");

        let err = convert(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::OpenInput { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_keeps_partial_output() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("broken.csv");
        let output = dir.path().join("broken.sdf");
        std::fs::write(&input, "1,a,b,c\n2,d,e,f\nlater,g,h,i\n4,j,k,l\n").unwrap();

        let err = convert(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidTimer { row: 3, .. }));

        let data = std::fs::read(&output).unwrap();
        let decoded = decode_records(&data, ByteOrder::Native).unwrap();
        assert_eq!(
            decoded,
            vec![Record::new(1, "a", "b", "c"), Record::new(2, "d", "e", "f")]
        );
    }

    #[test]
    fn test_run_empty_input() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("empty.csv");
        let output = dir.path().join("empty.sdf");
        std::fs::write(&input, "").unwrap();

        let stats = convert(&input, &output).unwrap();
        assert_eq!(stats, ConvertStats::default());
        assert_eq!(std::fs::read(&output).unwrap().len(), 0);
    }

    #[test]
    fn test_run_pinned_byte_order() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("be.csv");
        std::fs::write(&input, "1,a,b,c\n").unwrap();

        let mut config = ConvertConfig::for_input(&input);
        config.byte_order = ByteOrder::Big;
        Converter::new(config.clone()).run().unwrap();

        let data = std::fs::read(&config.output).unwrap();
        assert_eq!(&data[..8], &[0, 0, 0, 0, 0, 0, 0, 1]);
    }
}
