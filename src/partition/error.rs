use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for partition (union-find) operations.
/// Every variant is a caller error; none of them is transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// `make_set` was called with no elements.
    #[error("Cannot create a set from an empty list of elements")]
    EmptySet,

    /// An element's key is already registered (or repeated within one batch).
    #[error("Key {0} is already registered in the partition")]
    DuplicateKey(String),

    /// A query referenced a key that was never registered.
    #[error("Key {0} was never registered in the partition")]
    UnknownKey(String),
}
