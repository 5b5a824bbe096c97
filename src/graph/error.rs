use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for path counting operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The requested root (or queried node) was never upserted.
    #[error("Node {0} is not in the graph")]
    UnknownNode(String),

    /// Topological ordering stalled: some reachable node kept a non-zero
    /// in-degree, so the reachable subgraph is not acyclic.
    #[error("Cycle detected through node {node}: {unresolved} reachable node(s) could not be ordered")]
    CycleDetected { node: String, unresolved: usize },

    /// The number of paths does not fit in 64 bits.
    #[error("Path count overflowed at node {0}")]
    Overflow(String),
}
