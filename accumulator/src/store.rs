use nameveil_costs::CostResult;

use crate::{AccumulatorError, Commitment};

/// Abstract storage for the per-leaf commitment array.
///
/// Uses `&self` (interior mutability) so one store value can serve the
/// single writer and concurrent readers. Returns `CostResult` to track
/// storage I/O costs.
pub trait CommitmentStore {
    /// Retrieve the commitment stored at `index`, or `None` if the slot was
    /// never written.
    fn get_commitment(&self, index: u64) -> CostResult<Option<Commitment>, AccumulatorError>;

    /// Store `commitment` at `index`. Slots are written once, in insertion
    /// order; the accumulator never overwrites a filled slot.
    fn put_commitment(
        &self,
        index: u64,
        commitment: Commitment,
    ) -> CostResult<(), AccumulatorError>;

    /// Whether `commitment` is stored at any index.
    ///
    /// The reference semantics are a linear scan of stored leaves; an
    /// implementation may answer from a hash index instead without changing
    /// observable behavior.
    fn has_commitment(&self, commitment: &Commitment) -> CostResult<bool, AccumulatorError>;
}
