// error module
mod error;
// store module
mod store;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use error::PartitionError;
pub use store::{Entry, PartitionStore};
