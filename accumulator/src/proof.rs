//! Inclusion proof generation.
//!
//! A proof is the ordered list of sibling hashes, one per level from the
//! leaf upward. Siblings are recomputed from the authoritative leaf store
//! by walking the logical zero-padded tree — never from the frontier
//! cache — so proof generation independently re-derives what incremental
//! insertion maintains. Subtrees that lie entirely at or past the leaf
//! count resolve to the precomputed empty hash for their level, keeping
//! generation close to O(depth) instead of naively exponential.

use bincode::{Decode, Encode};
use nameveil_costs::{cost_return_on_error, CostResult, CostsExt, OperationCost};

use crate::{AccumulatorError, CommitmentAccumulator, CommitmentStore};

/// An inclusion proof: one sibling hash per tree level, leaf level first.
///
/// Always exactly `depth` entries. Proofs target the root that is current
/// at generation time; they keep verifying against later roots only
/// because unfilled positions resolve to the same empty values both times.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct InclusionProof {
    /// Sibling hashes from leaf level up to just below the root.
    pub siblings: Vec<[u8; 32]>,
}

impl InclusionProof {
    /// Number of sibling hashes (equals the tree depth it was built for).
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// True iff the proof carries no siblings.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, AccumulatorError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| AccumulatorError::InvalidData(format!("proof encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects sibling counts outside the valid depth range [1, 32].
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, AccumulatorError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 64 * 1024 }>();
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| AccumulatorError::InvalidData(format!("proof decode error: {}", e)))?;
        if !(1..=32).contains(&proof.siblings.len()) {
            return Err(AccumulatorError::InvalidData(format!(
                "proof has {} siblings, outside the valid depth range",
                proof.siblings.len()
            )));
        }
        Ok(proof)
    }
}

impl CommitmentAccumulator {
    /// Generate an inclusion proof for the leaf at `leaf_index`.
    ///
    /// Read-only; fails with [`AccumulatorError::InvalidIndex`] when
    /// `leaf_index >= leaf_count`. The returned path recombines with the
    /// stored commitment to the currently published root.
    pub fn generate_proof<S: CommitmentStore>(
        &self,
        leaf_index: u64,
        store: &S,
    ) -> CostResult<InclusionProof, AccumulatorError> {
        let mut cost = OperationCost::default();
        if leaf_index >= self.leaf_count() {
            return Err(AccumulatorError::InvalidIndex {
                index: leaf_index,
                count: self.leaf_count(),
            })
            .wrap_with_cost(cost);
        }

        let mut siblings = Vec::with_capacity(self.depth() as usize);
        for level in 0..self.depth() as usize {
            let sibling_index = (leaf_index >> level) ^ 1;
            let sibling =
                cost_return_on_error!(&mut cost, self.subtree_hash(level, sibling_index, store));
            siblings.push(sibling);
        }
        Ok(InclusionProof { siblings }).wrap_with_cost(cost)
    }

    /// Recursively compute the hash of the subtree rooted at `index` on
    /// `level`, reading leaves from the store and shortcutting all-empty
    /// subtrees to their precomputed hash.
    fn subtree_hash<S: CommitmentStore>(
        &self,
        level: usize,
        index: u64,
        store: &S,
    ) -> CostResult<[u8; 32], AccumulatorError> {
        let mut cost = OperationCost::default();

        // The subtree covers leaves [index << level, (index + 1) << level).
        let first_leaf = index << level;
        if first_leaf >= self.leaf_count() {
            return Ok(self.empty_hash(level)).wrap_with_cost(cost);
        }

        if level == 0 {
            let slot = cost_return_on_error!(&mut cost, store.get_commitment(index));
            return match slot {
                Some(commitment) => Ok(commitment).wrap_with_cost(cost),
                None => Err(AccumulatorError::StoreError(format!(
                    "expected commitment at index {} but found none",
                    index
                )))
                .wrap_with_cost(cost),
            };
        }

        let left = cost_return_on_error!(&mut cost, self.subtree_hash(level - 1, 2 * index, store));
        let right =
            cost_return_on_error!(&mut cost, self.subtree_hash(level - 1, 2 * index + 1, store));
        cost.hash_node_calls += 1;
        Ok(crate::combine(&left, &right)).wrap_with_cost(cost)
    }
}
