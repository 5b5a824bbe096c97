// error module
mod error;
// digraph module
mod digraph;
// paths module
mod paths;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use digraph::{NodeId, PathCountingGraph};
pub use error::GraphError;
