//! Optional versioned container around the codec body.
//!
//! The plain codec layout has no magic or version. When a file needs to be
//! recognizable and corruption-checked, the body is wrapped in a frame:
//!
//! # Frame Format
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  0x58 0x4C 0x4E 0x4B ("XLNK")
//! +------------------+
//! | version (2)      |  u16 little-endian, currently 1
//! +------------------+
//! | body_len (4)     |  u32 length of the codec body
//! +------------------+
//! | crc32 (4)        |  u32 checksum of the body
//! +------------------+
//! | body             |  plain codec layout (body_len bytes)
//! | (variable)       |
//! +------------------+
//! ```
//!
//! The body is byte-for-byte the plain layout, so unwrapping a frame always
//! yields something [`codec::decode`] accepts.

use crate::codec;
use crate::error::{Error, FramingError, Result};
use crate::node::Sequence;

/// Magic number for framed files: "XLNK"
pub const MAGIC: [u8; 4] = [0x58, 0x4C, 0x4E, 0x4B];

/// Current frame version
pub const VERSION: u16 = 1;

/// Size of the frame header in bytes
const HEADER_SIZE: usize = 14;

/// Wrap a codec body in a frame.
pub fn wrap(body: &[u8]) -> Result<Vec<u8>> {
    let body_len = u32::try_from(body.len()).map_err(|_| FramingError::BodyLengthMismatch {
        expected: u32::MAX as usize,
        actual: body.len(),
    })?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + body.len());
    frame.extend_from_slice(&MAGIC);
    frame.extend_from_slice(&VERSION.to_le_bytes());
    frame.extend_from_slice(&body_len.to_le_bytes());
    frame.extend_from_slice(&crc32fast::hash(body).to_le_bytes());
    frame.extend_from_slice(body);
    Ok(frame)
}

/// Validate a frame and return its body.
///
/// # Errors
/// - `FramingError::FrameTooShort` if the buffer cannot hold the header
/// - `FramingError::InvalidMagic` if the magic number doesn't match
/// - `FramingError::UnsupportedVersion` for any version but [`VERSION`]
/// - `FramingError::BodyLengthMismatch` if the body length disagrees with the header
/// - `Error::Crc` if the body checksum fails
pub fn unwrap(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < HEADER_SIZE {
        return Err(FramingError::FrameTooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != MAGIC {
        return Err(FramingError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(FramingError::UnsupportedVersion { version }.into());
    }

    let body_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    let crc32 = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);

    let body = &bytes[HEADER_SIZE..];
    if body.len() != body_len {
        return Err(FramingError::BodyLengthMismatch {
            expected: body_len,
            actual: body.len(),
        }
        .into());
    }

    let computed = crc32fast::hash(body);
    if computed != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed,
        });
    }

    Ok(body)
}

/// Encode a sequence and wrap it in a frame.
pub fn encode_framed(sequence: &Sequence) -> Result<Vec<u8>> {
    wrap(&codec::encode(sequence)?)
}

/// Decode either a framed file or a plain codec body.
///
/// Input starting with [`MAGIC`] must be a valid frame; anything else is
/// decoded as the plain layout.
pub fn decode_auto(bytes: &[u8]) -> Result<Sequence> {
    if bytes.starts_with(&MAGIC) {
        codec::decode(unwrap(bytes)?)
    } else {
        codec::decode(bytes)
    }
}
