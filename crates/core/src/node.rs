//! Record model: an arena of nodes linked by index.
//!
//! A [`Sequence`] owns every node in a single `Vec`. Links between nodes
//! (`forward`, `backward`, `cross`) are [`NodeId`]s into that arena, so no
//! link can outlive the sequence and no node is freed on its own.
//!
//! # Invariants
//!
//! For sequences produced by the builder or the codec:
//! - following `forward` from `head` visits every node exactly once
//! - `a.forward == Some(b)` iff `b.backward == Some(a)`
//! - `cross` may point anywhere in the arena, including the node itself
//!
//! [`Sequence::from_raw_parts`] only checks that ids are in bounds; the codec
//! reports any other violation when it encodes such a sequence.

use crate::error::{Error, Result};

/// Index of a node inside its owning [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single record in the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Opaque payload bytes
    pub payload: Vec<u8>,

    /// Next node in sequence order
    pub forward: Option<NodeId>,

    /// Previous node in sequence order
    pub backward: Option<NodeId>,

    /// Arbitrary same-sequence reference
    pub cross: Option<NodeId>,
}

impl Node {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            ..Self::default()
        }
    }
}

/// An ordered, arena-backed sequence of nodes with a designated head.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    nodes: Vec<Node>,
    head: Option<NodeId>,
}

impl Sequence {
    /// The empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a sequence whose arena order is also its visitation order.
    ///
    /// Node `i` is linked to `i - 1` and `i + 1`; `cross[i]` resolves to node
    /// `cross[i]` when it is a valid arena position, otherwise none.
    pub(crate) fn from_positions<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Vec<u8>, Option<usize>)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();
        let count = entries.len();

        let nodes = entries
            .into_iter()
            .enumerate()
            .map(|(i, (payload, cross))| Node {
                payload,
                forward: (i + 1 < count).then_some(NodeId(i + 1)),
                backward: i.checked_sub(1).map(NodeId),
                cross: cross.filter(|&c| c < count).map(NodeId),
            })
            .collect();

        Self {
            nodes,
            head: (count > 0).then_some(NodeId(0)),
        }
    }

    /// Assemble a sequence from an arbitrary arena.
    ///
    /// Every link and the head must name a slot in `nodes`. Chain shape is not
    /// checked here.
    pub fn from_raw_parts(nodes: Vec<Node>, head: Option<NodeId>) -> Result<Self> {
        let in_bounds = |id: Option<NodeId>| id.map_or(true, |id| id.0 < nodes.len());

        if !in_bounds(head) {
            return Err(out_of_bounds("head", head, nodes.len()));
        }
        for node in &nodes {
            for (field, link) in [
                ("forward", node.forward),
                ("backward", node.backward),
                ("cross", node.cross),
            ] {
                if !in_bounds(link) {
                    return Err(out_of_bounds(field, link, nodes.len()));
                }
            }
        }

        Ok(Self { nodes, head })
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes owned by the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Walk `forward` from the head.
    ///
    /// Stops after `len()` steps, so a malformed forward cycle cannot make the
    /// iterator run forever.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            sequence: self,
            next: self.head,
            remaining: self.nodes.len(),
        }
    }

    /// Position of `target` in visitation order, by linear scan from the head.
    pub fn position_of(&self, target: NodeId) -> Option<usize> {
        self.iter().position(|(id, _)| id == target)
    }

    /// True when both sequences have the same count, the same payload at each
    /// position, and the same cross target position (or none) at each position.
    pub fn topology_eq(&self, other: &Sequence) -> bool {
        let ours = self.positional_view();
        let theirs = other.positional_view();
        ours.is_some() && ours == theirs
    }

    /// `(payload, cross position)` per visited node, or `None` when a cross
    /// link leaves the forward chain.
    fn positional_view(&self) -> Option<Vec<(&[u8], Option<usize>)>> {
        let mut positions = vec![None; self.nodes.len()];
        for (pos, (id, _)) in self.iter().enumerate() {
            positions[id.0] = Some(pos);
        }

        self.iter()
            .map(|(_, node)| match node.cross {
                Some(c) => positions[c.0].map(|p| (node.payload.as_slice(), Some(p))),
                None => Some((node.payload.as_slice(), None)),
            })
            .collect()
    }
}

/// Iterator over `(NodeId, &Node)` in visitation order.
pub struct Iter<'a> {
    sequence: &'a Sequence,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        let node = self.sequence.node(id)?;
        self.remaining -= 1;
        self.next = node.forward;
        Some((id, node))
    }
}

fn out_of_bounds(field: &'static str, id: Option<NodeId>, len: usize) -> Error {
    Error::InvalidLink {
        field,
        index: id.map_or(0, NodeId::index),
        len,
    }
}
