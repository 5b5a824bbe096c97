// digraph.rs
// ──────────────────────────────────────────────────────────────────────────────
// Incrementally built directed graph over caller-defined labels.  A label is
// mapped to its identity key by a caller-supplied function; the first time a
// key is seen a node is allocated for it.  Edges are unweighted and stored
// once per (from, to) pair, so repeated upserts never add traversal weight.
// The graph is expected to be acyclic from whichever root is later queried;
// the path counting in `paths.rs` verifies that.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::io::Write;

use super::error::GraphError;

/// Represents a unique identifier for a node in the graph.
pub type NodeId = usize;

#[derive(Clone, Debug)]
pub(super) struct Node<L> {
    pub(super) label: L,
    pub(super) succ: Vec<NodeId>, // In insertion order
}

/// A directed graph that counts distinct root-to-sink paths.
pub struct PathCountingGraph<L, K, F> {
    key_of: F,
    pub(super) nodes: Vec<Node<L>>,
    index: HashMap<K, NodeId>,
    edges: HashSet<(NodeId, NodeId)>,
}

impl<L, K, F> PathCountingGraph<L, K, F>
where
    K: Eq + Hash + Debug,
    F: Fn(&L) -> K,
{
    pub fn new(key_of: F) -> Self {
        Self {
            key_of,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: HashSet::new(),
        }
    }

    /// Ensures a node for `label` exists and, when `from` is given, that the
    /// edge `from -> label` exists too (upserting `from` if needed).
    ///
    /// Idempotent: repeating a call with the same arguments changes nothing.
    /// Returns the id of the `label` node.
    pub fn upsert_node(&mut self, label: L, from: Option<L>) -> NodeId {
        let to = self.intern(label);
        if let Some(from) = from {
            let from = self.intern(from);
            if self.edges.insert((from, to)) {
                self.nodes[from].succ.push(to);
            }
        }
        to
    }

    /// Returns the id of the node for `label`, if it has been upserted.
    pub fn get_node_id(&self, label: &L) -> Option<NodeId> {
        self.index.get(&(self.key_of)(label)).copied()
    }

    /// Returns the label stored for a node id.
    pub fn get_label(&self, id: NodeId) -> Option<&L> {
        self.nodes.get(id).map(|node| &node.label)
    }

    pub fn contains(&self, label: &L) -> bool {
        self.get_node_id(label).is_some()
    }

    /// Labels of the direct successors of `label`, in edge insertion order.
    ///
    /// # Errors
    /// Returns `GraphError::UnknownNode` if `label` was never upserted.
    pub fn successors(&self, label: &L) -> Result<Vec<&L>, GraphError> {
        let id = self.resolve(label)?;
        Ok(self.nodes[id]
            .succ
            .iter()
            .map(|&next| &self.nodes[next].label)
            .collect())
    }

    /// Every node without outgoing edges, in insertion order.
    pub fn sinks(&self) -> impl Iterator<Item = &L> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.succ.is_empty())
            .map(|node| &node.label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Writes every node key with its successor keys, one node per line.
    pub fn write_adjacency(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "=== GRAPH ADJACENCY ===")?;
        writeln!(
            writer,
            "Nodes: {}, Edges: {}",
            self.node_count(),
            self.edge_count()
        )?;
        for node in &self.nodes {
            let successors: Vec<K> = node
                .succ
                .iter()
                .map(|&next| (self.key_of)(&self.nodes[next].label))
                .collect();
            writeln!(writer, "{:?} -> {:?}", (self.key_of)(&node.label), successors)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    pub(super) fn resolve(&self, label: &L) -> Result<NodeId, GraphError> {
        self.get_node_id(label)
            .ok_or_else(|| GraphError::UnknownNode(format!("{:?}", (self.key_of)(label))))
    }

    pub(super) fn describe(&self, id: NodeId) -> String {
        format!("{:?}", (self.key_of)(&self.nodes[id].label))
    }

    fn intern(&mut self, label: L) -> NodeId {
        let key = (self.key_of)(&label);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            label,
            succ: Vec::new(),
        });
        self.index.insert(key, id);
        id
    }
}
