//! Error types for crosslink.
//!
//! All operations return structured errors rather than panicking. Malformed
//! input records are recoverable (the builder skips them); codec errors mean
//! the bytes or the graph cannot be represented faithfully.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Parse: a text record could not be turned into a `(payload, index)` pair
/// - Codec: encoding or decoding the binary layout failed
/// - Framing: the optional versioned container is invalid
/// - CRC: framed body corruption detected
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Text record could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Binary codec error (truncated input, dangling cross reference, ...)
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Framed container error (bad magic, unknown version, ...)
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// A raw arena names a node that does not exist
    #[error("{field} link to node {index} outside arena of {len} nodes")]
    InvalidLink {
        field: &'static str,
        index: usize,
        len: usize,
    },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text record errors. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has no `;` separating payload from cross index
    #[error("line {line}: missing ';' delimiter")]
    MissingDelimiter { line: usize },

    /// The text after the last `;` is not a base-10 signed integer
    #[error("line {line}: invalid cross index {value:?}")]
    InvalidCrossIndex { line: usize, value: String },
}

/// Binary codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before a field was complete
    #[error("unexpected end of input at offset {offset}: need {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Bytes remain after the last encoded node
    #[error("{remaining} trailing bytes after {count} nodes")]
    TrailingBytes { count: u32, remaining: usize },

    /// A node's cross reference targets a node not reachable from the head
    #[error("node at position {position} has a cross reference outside the sequence")]
    DanglingCross { position: usize },

    /// Following `forward` from the head revisited a node
    #[error("forward chain revisits a node after {visited} nodes")]
    ForwardCycle { visited: usize },

    /// Node count does not fit the signed 32-bit cross index
    #[error("sequence of {count} nodes exceeds the encodable maximum {max}")]
    TooManyNodes { count: usize, max: usize },

    /// Payload length does not fit the 32-bit length prefix
    #[error("payload of {len} bytes at position {position} exceeds u32 length prefix")]
    PayloadTooLarge { position: usize, len: usize },
}

/// Framed container errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Header version is not one this build can read
    #[error("unsupported frame version {version}")]
    UnsupportedVersion { version: u16 },

    /// Frame is too short to contain a valid header
    #[error("frame too short: need at least {required} bytes, got {actual}")]
    FrameTooShort { required: usize, actual: usize },

    /// Body length doesn't match header specification
    #[error("body length mismatch: header says {expected}, got {actual}")]
    BodyLengthMismatch { expected: usize, actual: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
