//! Proof verification.
//!
//! Recombines a supplied sibling path with a claimed leaf and compares the
//! re-derived root to the published one. Pure with respect to caller
//! identity — any party may verify.

use nameveil_costs::{cost_return_on_error, CostResult, CostsExt, OperationCost};

use crate::{
    hash::combine, AccumulatorError, Commitment, CommitmentAccumulator, CommitmentStore,
    InclusionProof,
};

/// Fold a sibling path over a leaf to re-derive a root.
///
/// Consumes one sibling per level, combining on the side dictated by the
/// index bit at that level. No accumulator state is needed; external
/// verifiers and circuits replicate exactly this computation.
pub fn root_from_path(leaf: &Commitment, leaf_index: u64, siblings: &[[u8; 32]]) -> [u8; 32] {
    let mut computed = *leaf;
    let mut idx = leaf_index;
    for sibling in siblings {
        computed = if idx & 1 == 0 {
            combine(&computed, sibling)
        } else {
            combine(sibling, &computed)
        };
        idx >>= 1;
    }
    computed
}

impl CommitmentAccumulator {
    /// Verify that `commitment` is included at `leaf_index` under the
    /// currently published root.
    ///
    /// Hard failures before any hashing: `InvalidProofLength` when the
    /// sibling path length differs from the tree depth, `InvalidIndex`
    /// when `leaf_index >= leaf_count`, and `CommitmentMismatch` when the
    /// stored leaf at that index differs from `commitment`. Otherwise
    /// returns whether the recombined path reaches the published root.
    pub fn verify<S: CommitmentStore>(
        &self,
        commitment: &Commitment,
        leaf_index: u64,
        proof: &InclusionProof,
        store: &S,
    ) -> CostResult<bool, AccumulatorError> {
        let mut cost = OperationCost::default();

        if proof.siblings.len() != self.depth() as usize {
            return Err(AccumulatorError::InvalidProofLength {
                expected: self.depth(),
                actual: proof.siblings.len(),
            })
            .wrap_with_cost(cost);
        }
        if leaf_index >= self.leaf_count() {
            return Err(AccumulatorError::InvalidIndex {
                index: leaf_index,
                count: self.leaf_count(),
            })
            .wrap_with_cost(cost);
        }
        let stored = cost_return_on_error!(&mut cost, self.get_commitment(leaf_index, store));
        if stored != *commitment {
            return Err(AccumulatorError::CommitmentMismatch { index: leaf_index })
                .wrap_with_cost(cost);
        }

        cost.hash_node_calls += self.depth() as u32;
        Ok(root_from_path(commitment, leaf_index, &proof.siblings) == self.root())
            .wrap_with_cost(cost)
    }
}
