//! The assembly graph the chainer walks: oriented node identifiers,
//! nodes with their outgoing overlap edges, and the graph itself.

pub mod node_name;
pub mod orientation;

pub use self::node_name::*;
pub use self::orientation::*;

use fnv::FnvHashMap;
use log::trace;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::parser::ChainError;

/// Identifies one orientation of an assembly segment. The forward
/// and reverse complement of a segment share `id` and are distinct
/// nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct NodeId {
    pub id: u64,
    pub orientation: Orientation,
}

impl NodeId {
    #[inline]
    pub fn new(id: u64, orientation: Orientation) -> Self {
        NodeId { id, orientation }
    }

    #[inline]
    pub fn forward(id: u64) -> Self {
        Self::new(id, Orientation::Forward)
    }

    #[inline]
    pub fn backward(id: u64) -> Self {
        Self::new(id, Orientation::Backward)
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.orientation.is_reverse()
    }

    /// The same segment on the opposite strand
    #[inline]
    pub fn flip(&self) -> Self {
        Self::new(self.id, self.orientation.flip())
    }
}

/// Writes the segment number followed by the FASTG reversal marker,
/// e.g. `12` or `12'`.
impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.id, self.orientation)
    }
}

/// A node in the assembly graph together with its outgoing edges.
/// Each successor is stored as `(child, overlap)`, in the order the
/// edges were read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GraphNode {
    pub id: NodeId,
    pub length: usize,
    pub successors: Vec<(NodeId, usize)>,
}

impl GraphNode {
    pub fn new(id: NodeId, length: usize) -> Self {
        GraphNode {
            id,
            length,
            successors: Vec::new(),
        }
    }

    pub fn successors(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.successors.iter().copied()
    }
}

/// The adjacency structure of an assembly graph, keyed on oriented
/// node ID.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct AssemblyGraph {
    nodes: FnvHashMap<NodeId, GraphNode>,
}

impl AssemblyGraph {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.successors.len()).sum()
    }

    pub fn get(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Look up a node that must be present; every hit's node has to
    /// exist in the graph for chaining to proceed.
    pub fn node(&self, id: &NodeId) -> Result<&GraphNode, ChainError> {
        self.nodes.get(id).ok_or(ChainError::MissingNode(*id))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert a node, or update the length of an existing one while
    /// keeping its edges.
    pub fn insert(&mut self, id: NodeId, length: usize) -> &mut GraphNode {
        let node = self
            .nodes
            .entry(id)
            .or_insert_with(|| GraphNode::new(id, length));
        node.length = length;
        node
    }

    /// Append an edge `from -> to`. Endpoints that haven't been seen
    /// yet are created with length 0.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        overlap: usize,
    ) -> Result<(), ChainError> {
        if overlap == 0 {
            return Err(ChainError::InvalidOverlap(from, to));
        }
        trace!("edge {} -> {} ({})", from, to, overlap);
        self.nodes.entry(to).or_insert_with(|| GraphNode::new(to, 0));
        self.nodes
            .entry(from)
            .or_insert_with(|| GraphNode::new(from, 0))
            .successors
            .push((to, overlap));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId::forward(12).to_string(), "12");
        assert_eq!(NodeId::backward(12).to_string(), "12'");
        assert_eq!(NodeId::forward(3).flip(), NodeId::backward(3));
        assert_ne!(NodeId::forward(3), NodeId::backward(3));
    }

    #[test]
    fn edges_keep_insertion_order() {
        let a = NodeId::forward(1);
        let b = NodeId::forward(2);
        let c = NodeId::backward(3);

        let mut graph = AssemblyGraph::new();
        graph.insert(a, 100);
        graph.add_edge(a, c, 55).unwrap();
        graph.add_edge(a, b, 55).unwrap();

        let node = graph.node(&a).unwrap();
        assert_eq!(node.length, 100);
        assert_eq!(node.successors, vec![(c, 55), (b, 55)]);

        // endpoints are created on demand
        assert_eq!(graph.get(&b).map(|n| n.length), Some(0));
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 2);

        // a later insert sets the length but keeps edges
        graph.insert(a, 120);
        assert_eq!(graph.node(&a).unwrap().successors.len(), 2);
        assert_eq!(graph.node(&a).unwrap().length, 120);
    }

    #[test]
    fn zero_overlap_rejected() {
        let mut graph = AssemblyGraph::new();
        let a = NodeId::forward(1);
        let b = NodeId::forward(2);
        assert_eq!(
            graph.add_edge(a, b, 0),
            Err(ChainError::InvalidOverlap(a, b))
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn missing_node_is_an_error() {
        let graph = AssemblyGraph::new();
        let id = NodeId::backward(7);
        assert_eq!(graph.node(&id), Err(ChainError::MissingNode(id)));
    }
}
