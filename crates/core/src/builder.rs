//! Structure builder: text records to a linked [`Sequence`].
//!
//! # Input Format
//!
//! ```text
//! <payload>;<cross index>
//! ```
//!
//! One record per line. The line is split on its *last* `;`, so payloads may
//! contain the delimiter. The cross index is a base-10 signed integer; values
//! outside `[0, count)` mean "no cross reference". Blank lines are ignored.
//!
//! Malformed lines are logged and skipped; the sequence is built from the
//! remaining records.

use std::path::Path;

use crate::error::{ParseError, Result};
use crate::node::Sequence;

const DELIMITER: u8 = b';';

/// A parsed input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Payload bytes, verbatim
    pub payload: Vec<u8>,

    /// Requested cross target position; out-of-range values mean none
    pub cross_index: i64,
}

impl Record {
    pub fn new(payload: impl Into<Vec<u8>>, cross_index: i64) -> Self {
        Self {
            payload: payload.into(),
            cross_index,
        }
    }
}

/// Result of parsing a whole input text.
#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    /// Well-formed records, in input order
    pub records: Vec<Record>,

    /// Lines that were dropped
    pub skipped: Vec<ParseError>,

    /// Non-blank lines seen
    pub lines: usize,
}

/// Parse one line (without its trailing `\n`).
///
/// Returns `Ok(None)` for blank lines.
///
/// # Errors
/// - `ParseError::MissingDelimiter` if the line has no `;`
/// - `ParseError::InvalidCrossIndex` if the text after the last `;` is not an
///   integer (surrounding ASCII whitespace is allowed)
pub fn parse_line(line: &[u8], line_no: usize) -> std::result::Result<Option<Record>, ParseError> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }

    let sep = line
        .iter()
        .rposition(|&b| b == DELIMITER)
        .ok_or(ParseError::MissingDelimiter { line: line_no })?;

    let (payload, index) = (&line[..sep], &line[sep + 1..]);
    let cross_index = std::str::from_utf8(index)
        .ok()
        .and_then(|text| text.trim_matches(|c: char| c.is_ascii_whitespace()).parse::<i64>().ok())
        .ok_or_else(|| ParseError::InvalidCrossIndex {
            line: line_no,
            value: String::from_utf8_lossy(index).into_owned(),
        })?;

    Ok(Some(Record::new(payload, cross_index)))
}

/// Parse every line of `text`, skipping (and logging) malformed ones.
pub fn parse_records(text: &[u8]) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for (i, line) in text.split(|&b| b == b'\n').enumerate() {
        match parse_line(line, i + 1) {
            Ok(Some(record)) => {
                parsed.lines += 1;
                parsed.records.push(record);
            }
            Ok(None) => {}
            Err(err) => {
                parsed.lines += 1;
                tracing::warn!(%err, "skipping malformed record");
                parsed.skipped.push(err);
            }
        }
    }

    parsed
}

/// Read and parse a record file.
///
/// # Errors
/// `Error::Io` if the file cannot be read. Malformed lines are not errors.
pub fn load_records(path: &Path) -> Result<ParsedInput> {
    let text = std::fs::read(path)?;
    let parsed = parse_records(&text);
    tracing::debug!(
        path = %path.display(),
        records = parsed.records.len(),
        skipped = parsed.skipped.len(),
        "loaded records"
    );
    Ok(parsed)
}

/// Link records into a sequence.
///
/// One node per record, in order. Node `i`'s cross reference is node
/// `records[i].cross_index` when that is a valid position (itself included),
/// otherwise none. Zero records yield the empty sequence.
pub fn build(records: &[Record]) -> Sequence {
    let count = records.len();
    Sequence::from_positions(records.iter().map(|record| {
        let cross = usize::try_from(record.cross_index)
            .ok()
            .filter(|&c| c < count);
        (record.payload.clone(), cross)
    }))
}

/// Load a record file and build its sequence.
pub fn build_from_file(path: &Path) -> Result<Sequence> {
    Ok(build(&load_records(path)?.records))
}
