//! Binary codec for linked sequences.
//!
//! Links are written as positions in visitation order, never as addresses,
//! so a decoded sequence has the same topology as the encoded one while
//! owning a fresh arena.
//!
//! # Layout
//!
//! ```text
//! +----------------------+
//! | count (4)            |  u32 number of nodes
//! +----------------------+
//! | payload_len (4)      |  u32            \
//! | payload (variable)   |  payload_len     } repeated `count` times
//! | cross (4)            |  i32, -1 = none /
//! +----------------------+
//! ```
//!
//! All integers are little-endian. There is no magic or version field; see
//! [`crate::framing`] for the checksummed container.

use std::path::Path;

use crate::error::{CodecError, Result};
use crate::node::Sequence;
use crate::wire::{ByteReader, ByteWriter};

/// Cross index written for "no cross reference".
pub const NO_CROSS: i32 = -1;

/// Smallest encoded entry: length prefix plus cross index.
const MIN_ENTRY_SIZE: usize = 8;

/// Largest count whose positions all fit the `i32` cross field.
const MAX_NODES: usize = i32::MAX as usize;

/// Encode a sequence into the binary layout.
///
/// Nodes are numbered by walking `forward` from the head.
///
/// # Errors
/// - `CodecError::ForwardCycle` if the forward chain revisits a node
/// - `CodecError::DanglingCross` if a cross link targets a node outside the
///   forward chain
/// - `CodecError::TooManyNodes` / `CodecError::PayloadTooLarge` if a value
///   does not fit its field
pub fn encode(sequence: &Sequence) -> Result<Vec<u8>> {
    let order = visitation_order(sequence)?;
    if order.len() > MAX_NODES {
        return Err(CodecError::TooManyNodes {
            count: order.len(),
            max: MAX_NODES,
        }
        .into());
    }

    // Arena slot -> position, for exactly the visited nodes
    let mut positions: Vec<Option<i32>> = vec![None; sequence.len()];
    for (pos, &slot) in order.iter().enumerate() {
        positions[slot] = Some(pos as i32);
    }

    let payload_bytes: usize = sequence.iter().map(|(_, n)| n.payload.len()).sum();
    let mut writer = ByteWriter::with_capacity(4 + order.len() * MIN_ENTRY_SIZE + payload_bytes);
    writer.write_u32(order.len() as u32);

    for (position, (_, node)) in sequence.iter().enumerate() {
        if u32::try_from(node.payload.len()).is_err() {
            return Err(CodecError::PayloadTooLarge {
                position,
                len: node.payload.len(),
            }
            .into());
        }
        writer.write_prefixed(&node.payload)?;

        let cross = match node.cross {
            Some(target) => positions
                .get(target.index())
                .copied()
                .flatten()
                .ok_or(CodecError::DanglingCross { position })?,
            None => NO_CROSS,
        };
        writer.write_i32(cross);
    }

    tracing::debug!(nodes = order.len(), bytes = writer.len(), "encoded sequence");
    Ok(writer.finish())
}

/// Arena slots in visitation order.
fn visitation_order(sequence: &Sequence) -> Result<Vec<usize>> {
    let mut seen = vec![false; sequence.len()];
    let mut order = Vec::with_capacity(sequence.len());
    let mut cursor = sequence.head();

    while let Some(id) = cursor {
        let slot = id.index();
        if seen[slot] {
            return Err(CodecError::ForwardCycle {
                visited: order.len(),
            }
            .into());
        }
        seen[slot] = true;
        order.push(slot);
        cursor = sequence.node(id).and_then(|node| node.forward);
    }

    Ok(order)
}

/// Decode the binary layout into a new sequence.
///
/// Cross indices outside `[0, count)` (including `-1`) decode as none.
///
/// # Errors
/// - `CodecError::UnexpectedEof` if the input ends inside a field, or the
///   count cannot fit in the remaining bytes
/// - `CodecError::TrailingBytes` if input remains after the last node
pub fn decode(bytes: &[u8]) -> Result<Sequence> {
    let mut reader = ByteReader::new(bytes);
    let count = reader.read_u32()?;

    // Reject impossible counts before allocating for them
    let needed = (count as usize).saturating_mul(MIN_ENTRY_SIZE);
    if needed > reader.remaining() {
        return Err(CodecError::UnexpectedEof {
            offset: reader.position(),
            needed,
            available: reader.remaining(),
        }
        .into());
    }

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let payload = reader.read_prefixed()?.to_vec();
        let cross = reader.read_i32()?;
        entries.push((payload, usize::try_from(cross).ok()));
    }

    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes {
            count,
            remaining: reader.remaining(),
        }
        .into());
    }

    tracing::debug!(nodes = count, bytes = bytes.len(), "decoded sequence");
    // Out-of-range positions are dropped by the arena constructor
    Ok(Sequence::from_positions(entries))
}

/// Encode `sequence` and write it to `path`.
///
/// Returns the number of bytes written.
pub fn save(sequence: &Sequence, path: &Path) -> Result<usize> {
    let bytes = encode(sequence)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}

/// Read `path` and decode it.
pub fn load(path: &Path) -> Result<Sequence> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build, Record};
    use crate::error::Error;
    use crate::node::{Node, NodeId};

    #[test]
    fn test_single_node_layout() {
        let seq = build(&[Record::new("x", -1)]);
        let bytes = encode(&seq).unwrap();
        assert_eq!(
            bytes,
            vec![0x01, 0, 0, 0, 0x01, 0, 0, 0, 0x78, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_empty_sequence() {
        let bytes = encode(&Sequence::empty()).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_mixed_cross() {
        let records = vec![
            Record::new("head", 3),
            Record::new("self", 1),
            Record::new("back", 0),
            Record::new("none", -1),
            Record::new(&b"\x00;\xff\n"[..], 2),
        ];
        let seq = build(&records);
        let decoded = decode(&encode(&seq).unwrap()).unwrap();

        assert!(decoded.topology_eq(&seq));
        assert_eq!(decoded.node(NodeId(1)).unwrap().cross, Some(NodeId(1)));
        assert_eq!(decoded.node(NodeId(3)).unwrap().cross, None);
    }

    #[test]
    fn test_decode_out_of_range_cross_is_none() {
        let mut writer = ByteWriter::new();
        writer.write_u32(2);
        writer.write_prefixed(b"a").unwrap();
        writer.write_i32(2); // == count
        writer.write_prefixed(b"b").unwrap();
        writer.write_i32(-7);

        let seq = decode(&writer.finish()).unwrap();
        assert!(seq.iter().all(|(_, node)| node.cross.is_none()));
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = encode(&build(&[Record::new("abc", 0)])).unwrap();
        for cut in 0..bytes.len() {
            assert!(
                matches!(decode(&bytes[..cut]), Err(Error::Codec(CodecError::UnexpectedEof { .. }))),
                "cut at {cut} should fail"
            );
        }
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let mut bytes = encode(&build(&[Record::new("a", 0)])).unwrap();
        bytes.push(0);
        assert!(matches!(
            decode(&bytes),
            Err(Error::Codec(CodecError::TrailingBytes { count: 1, remaining: 1 }))
        ));
    }

    #[test]
    fn test_decode_huge_count() {
        let bytes = u32::MAX.to_le_bytes();
        assert!(matches!(
            decode(&bytes),
            Err(Error::Codec(CodecError::UnexpectedEof { offset: 4, .. }))
        ));
    }

    #[test]
    fn test_dangling_cross() {
        // Slot 1 is in the arena but not on the forward chain from slot 0
        let nodes = vec![
            Node {
                cross: Some(NodeId(1)),
                ..Node::new("reachable")
            },
            Node::new("orphan"),
        ];
        let seq = Sequence::from_raw_parts(nodes, Some(NodeId(0))).unwrap();
        assert!(matches!(
            encode(&seq),
            Err(Error::Codec(CodecError::DanglingCross { position: 0 }))
        ));
    }

    #[test]
    fn test_forward_cycle() {
        let nodes = vec![
            Node {
                forward: Some(NodeId(1)),
                ..Node::new("a")
            },
            Node {
                forward: Some(NodeId(0)),
                backward: Some(NodeId(0)),
                ..Node::new("b")
            },
        ];
        let seq = Sequence::from_raw_parts(nodes, Some(NodeId(0))).unwrap();
        assert!(matches!(
            encode(&seq),
            Err(Error::Codec(CodecError::ForwardCycle { visited: 2 }))
        ));
    }

    #[test]
    fn test_encode_uses_visitation_order() {
        // Arena stored back to front: slot 1 is the head
        let nodes = vec![
            Node {
                backward: Some(NodeId(1)),
                cross: Some(NodeId(1)),
                ..Node::new("second")
            },
            Node {
                forward: Some(NodeId(0)),
                ..Node::new("first")
            },
        ];
        let seq = Sequence::from_raw_parts(nodes, Some(NodeId(1))).unwrap();
        let decoded = decode(&encode(&seq).unwrap()).unwrap();

        let view: Vec<_> = decoded
            .iter()
            .map(|(_, n)| (n.payload.clone(), n.cross))
            .collect();
        assert_eq!(
            view,
            vec![(b"first".to_vec(), None), (b"second".to_vec(), Some(NodeId(0)))]
        );
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outlet.out");
        let seq = build(&[Record::new("a", 1), Record::new("b", 0)]);

        let written = save(&seq, &path).unwrap();
        assert_eq!(written, 4 + 2 * (4 + 1 + 4));
        assert!(load(&path).unwrap().topology_eq(&seq));

        assert!(matches!(
            load(&dir.path().join("missing.out")),
            Err(Error::Io(_))
        ));
    }
}
