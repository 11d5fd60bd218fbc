use thiserror::Error;

/// Errors from accumulator operations.
///
/// Every precondition violation aborts the call with no partial state
/// change; none of these conditions are transient, so callers re-issue
/// corrected input rather than retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccumulatorError {
    /// Mutating call from a caller other than the authorized inserter.
    #[error("caller is not the authorized inserter")]
    PermissionDenied,
    /// The commitment equals the reserved empty-slot value.
    #[error("commitment equals the reserved empty value")]
    InvalidCommitment,
    /// The commitment is already stored at some leaf.
    #[error("commitment is already present in the accumulator")]
    DuplicateCommitment,
    /// The leaf count has reached capacity.
    #[error("tree is full (capacity {capacity}, count {count})")]
    TreeFull {
        /// Maximum number of leaves (`2^depth`).
        capacity: u64,
        /// Current number of inserted leaves.
        count: u64,
    },
    /// An index outside `[0, leaf_count)` was given to a read or proof
    /// operation.
    #[error("index {index} is out of range (count {count})")]
    InvalidIndex {
        /// The offending index.
        index: u64,
        /// Current number of inserted leaves.
        count: u64,
    },
    /// A sibling path whose length differs from the tree depth.
    #[error("proof has {actual} siblings, expected {expected}")]
    InvalidProofLength {
        /// The tree depth.
        expected: u8,
        /// Number of siblings supplied.
        actual: usize,
    },
    /// The supplied commitment does not match the stored leaf at the
    /// claimed index.
    #[error("commitment does not match the stored leaf at index {index}")]
    CommitmentMismatch {
        /// The claimed leaf index.
        index: u64,
    },
    /// Invalid construction or deserialization input.
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// The backing store failed or returned data inconsistent with the
    /// accumulator state.
    #[error("store error: {0}")]
    StoreError(String),
}
