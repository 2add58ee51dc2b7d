//! Little-endian byte I/O for the binary codec.
//!
//! `ByteWriter` appends fixed-width integers and length-prefixed byte strings;
//! `ByteReader` reads them back with bounds checks, reporting the offset at
//! which the input ran out.
//!
//! # Example
//! ```
//! use crosslink_core::wire::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u32(7);
//! writer.write_prefixed(b"hi").unwrap();
//! writer.write_i32(-1);
//!
//! let bytes = writer.finish();
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u32().unwrap(), 7);
//! assert_eq!(reader.read_prefixed().unwrap(), b"hi");
//! assert_eq!(reader.read_i32().unwrap(), -1);
//! assert!(reader.is_empty());
//! ```

use crate::error::{CodecError, Result};

/// Appends little-endian values to a growable buffer.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a `u32` length followed by the raw bytes.
    ///
    /// # Errors
    /// Returns `CodecError::PayloadTooLarge` if `data` is longer than
    /// `u32::MAX`. The reported position is the writer's byte offset.
    pub fn write_prefixed(&mut self, data: &[u8]) -> Result<()> {
        let len = u32::try_from(data.len()).map_err(|_| CodecError::PayloadTooLarge {
            position: self.bytes.len(),
            len: data.len(),
        })?;
        self.write_u32(len);
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Finish writing and return the output bytes.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Reads little-endian values from a byte slice.
///
/// # Invariants
/// - `position` never exceeds `data.len()`
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Read exactly `count` bytes.
    ///
    /// # Errors
    /// `CodecError::UnexpectedEof` if fewer than `count` bytes remain.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if count > available {
            return Err(CodecError::UnexpectedEof {
                offset: self.position,
                needed: count,
                available,
            }
            .into());
        }
        let slice = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Read a `u32` length followed by that many bytes.
    pub fn read_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32()? as usize;
        self.read_bytes(len)
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_little_endian_layout() {
        let mut writer = ByteWriter::new();
        writer.write_u32(0x0403_0201);
        writer.write_i32(-2);
        assert_eq!(
            writer.finish(),
            vec![0x01, 0x02, 0x03, 0x04, 0xFE, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_prefixed_empty() {
        let mut writer = ByteWriter::new();
        writer.write_prefixed(b"").unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0, 0, 0, 0]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_prefixed().unwrap(), b"");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_past_end() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&data);

        let err = reader.read_u32().unwrap_err();
        assert!(matches!(
            err,
            Error::Codec(CodecError::UnexpectedEof {
                offset: 0,
                needed: 4,
                available: 3
            })
        ));
        // A failed read consumes nothing
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_prefixed_length_exceeds_input() {
        // Length says 10, only 2 bytes follow
        let data = [10, 0, 0, 0, b'a', b'b'];
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            reader.read_prefixed(),
            Err(Error::Codec(CodecError::UnexpectedEof {
                offset: 4,
                needed: 10,
                available: 2
            }))
        ));
    }

    #[test]
    fn test_remaining() {
        let data = [0u8; 9];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.remaining(), 9);
        reader.read_u32().unwrap();
        assert_eq!(reader.remaining(), 5);
        reader.read_i32().unwrap();
        assert_eq!(reader.remaining(), 1);
        assert!(!reader.is_empty());
        reader.read_bytes(1).unwrap();
        assert!(reader.is_empty());
    }
}
