//! crosslink-core: topology-preserving codec for cross-linked sequences
//!
//! This library turns a list of `(payload, cross index)` records into a
//! doubly-linked sequence whose nodes also carry an arbitrary "cross"
//! reference, and encodes that graph to a compact binary form and back:
//! - Parses `payload;index` text records, skipping malformed lines
//! - Links nodes forward, backward, and across by arena index
//! - Encodes links as positions so decoding rebuilds the same topology
//! - Optionally wraps the encoding in a checksummed, versioned frame
//!
//! # Architecture
//!
//! - `node`: Record model (arena of nodes, `Sequence` handle)
//! - `builder`: Text records to sequence
//! - `wire`: Little-endian byte reading/writing
//! - `codec`: Sequence to bytes and back
//! - `framing`: Magic/version/CRC container
//! - `inspect`: Human-readable dump
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **No raw pointers**: `backward` and `cross` are indices, never owners
//! - **Single pass**: Encoding and decoding are linear in the input

pub mod builder;
pub mod codec;
pub mod error;
pub mod framing;
pub mod inspect;
pub mod node;
pub mod wire;

// Re-export commonly used types
pub use builder::{build, Record};
pub use codec::{decode, encode};
pub use error::{Error, Result};
pub use node::{Node, NodeId, Sequence};
