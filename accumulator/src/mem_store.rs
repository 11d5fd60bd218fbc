use std::{
    cell::RefCell,
    collections::{BTreeMap, HashSet},
};

use nameveil_costs::{CostResult, CostsExt, OperationCost};

use crate::{AccumulatorError, Commitment, CommitmentStore};

/// In-memory commitment store backed by a `BTreeMap`.
///
/// Keeps a reverse index so existence checks are O(1) instead of a leaf
/// scan. Useful for tests and ephemeral computations. All operations are
/// zero-cost (no storage I/O is tracked).
#[derive(Debug, Default, Clone)]
pub struct MemStore {
    slots: RefCell<BTreeMap<u64, Commitment>>,
    index: RefCell<HashSet<Commitment>>,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommitmentStore for MemStore {
    fn get_commitment(&self, index: u64) -> CostResult<Option<Commitment>, AccumulatorError> {
        Ok(self.slots.borrow().get(&index).copied()).wrap_with_cost(OperationCost::default())
    }

    fn put_commitment(
        &self,
        index: u64,
        commitment: Commitment,
    ) -> CostResult<(), AccumulatorError> {
        self.slots.borrow_mut().insert(index, commitment);
        self.index.borrow_mut().insert(commitment);
        Ok(()).wrap_with_cost(OperationCost::default())
    }

    fn has_commitment(&self, commitment: &Commitment) -> CostResult<bool, AccumulatorError> {
        Ok(self.index.borrow().contains(commitment)).wrap_with_cost(OperationCost::default())
    }
}
