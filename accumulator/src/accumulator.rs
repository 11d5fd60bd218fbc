use nameveil_costs::{cost_return_on_error, CostResult, CostsExt, OperationCost};

use crate::{
    hash::{combine, empty_subtree_hashes, validate_depth},
    AccumulatorError, Commitment, CommitmentStore, EMPTY_COMMITMENT,
};

/// The identity a caller presents to mutating operations.
///
/// The accumulator itself is identity-blind beyond a single equality gate
/// against the inserter fixed at construction; how identities are minted
/// and transferred is up to the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallerId(pub [u8; 32]);

/// Everything observers need from one successful insertion.
///
/// Records are produced in insertion order and are the only externally
/// observable history; the accumulator keeps no log of its own, and the
/// previous root lives only in this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionRecord {
    /// The inserted commitment.
    pub commitment: Commitment,
    /// The leaf index it was assigned.
    pub leaf_index: u64,
    /// The root that was current before this insertion.
    pub prev_root: [u8; 32],
    /// The root published by this insertion.
    pub new_root: [u8; 32],
}

/// A fixed-depth append-only Merkle commitment accumulator.
///
/// Leaves live in a [`CommitmentStore`]; this struct carries only the
/// published root, the leaf count, and the per-level frontier cache that
/// makes insertion O(depth). The invariant maintained across every
/// operation: `root` equals the bottom-up hash of the logical tree in
/// which all `2^depth` positions at or past `leaf_count` hold
/// [`EMPTY_COMMITMENT`].
#[derive(Debug, Clone)]
pub struct CommitmentAccumulator {
    depth: u8,
    leaf_count: u64,
    root: [u8; 32],
    /// `frontier[level]` holds the pending left sibling at that level: the
    /// hash of the rightmost complete subtree still waiting for its right
    /// neighbor. Slots whose level has no pending subtree are only ever
    /// written, never read.
    frontier: Vec<[u8; 32]>,
    /// Precomputed all-empty subtree hashes, one per level `0..=depth`.
    empty: Vec<[u8; 32]>,
    authorized: CallerId,
}

impl CommitmentAccumulator {
    /// Create an empty accumulator of the given depth with a fixed
    /// authorized inserter.
    ///
    /// Depth must be between 1 and 32 inclusive; capacity is `2^depth`.
    /// The initial root is the hash of the fully empty tree, which is
    /// never the all-zero value.
    pub fn new(depth: u8, authorized: CallerId) -> Result<Self, AccumulatorError> {
        validate_depth(depth)?;
        let empty = empty_subtree_hashes(depth);
        let frontier = empty[..depth as usize].to_vec();
        let root = empty[depth as usize];
        Ok(Self {
            depth,
            leaf_count: 0,
            root,
            frontier,
            empty,
            authorized,
        })
    }

    /// Reconstitute an accumulator from persisted state.
    ///
    /// The frontier must be exactly `depth` entries. Consistency beyond
    /// range checks is the caller's responsibility; [`Self::deserialize`]
    /// is the usual entry point.
    pub(crate) fn from_state(
        depth: u8,
        leaf_count: u64,
        root: [u8; 32],
        frontier: Vec<[u8; 32]>,
        authorized: CallerId,
    ) -> Result<Self, AccumulatorError> {
        validate_depth(depth)?;
        let capacity = 1u64 << depth;
        if leaf_count > capacity {
            return Err(AccumulatorError::InvalidData(format!(
                "leaf count {} exceeds capacity {} for depth {}",
                leaf_count, capacity, depth
            )));
        }
        if frontier.len() != depth as usize {
            return Err(AccumulatorError::InvalidData(format!(
                "frontier has {} levels, expected {}",
                frontier.len(),
                depth
            )));
        }
        Ok(Self {
            depth,
            leaf_count,
            root,
            frontier,
            empty: empty_subtree_hashes(depth),
            authorized,
        })
    }

    /// The currently published root.
    pub fn root(&self) -> [u8; 32] {
        self.root
    }

    /// Number of commitments inserted so far.
    pub fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    /// Tree depth fixed at construction.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Maximum number of leaves (`2^depth`).
    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// True iff no further insertion can succeed.
    pub fn is_full(&self) -> bool {
        self.leaf_count == self.capacity()
    }

    /// The identity of the authorized inserter.
    pub fn authorized(&self) -> CallerId {
        self.authorized
    }

    /// Hash of the all-empty subtree at `level` (`0..=depth`).
    pub(crate) fn empty_hash(&self, level: usize) -> [u8; 32] {
        self.empty[level]
    }

    /// Frontier cache slot at `level` (`0..depth`).
    pub(crate) fn frontier_slot(&self, level: usize) -> [u8; 32] {
        self.frontier[level]
    }

    /// The commitment stored at `index`.
    ///
    /// Fails with [`AccumulatorError::InvalidIndex`] when
    /// `index >= leaf_count`, and with `StoreError` if the store is missing
    /// a slot the accumulator has assigned (store inconsistency).
    pub fn get_commitment<S: CommitmentStore>(
        &self,
        index: u64,
        store: &S,
    ) -> CostResult<Commitment, AccumulatorError> {
        let mut cost = OperationCost::default();
        if index >= self.leaf_count {
            return Err(AccumulatorError::InvalidIndex {
                index,
                count: self.leaf_count,
            })
            .wrap_with_cost(cost);
        }
        let slot = cost_return_on_error!(&mut cost, store.get_commitment(index));
        match slot {
            Some(commitment) => Ok(commitment).wrap_with_cost(cost),
            None => Err(AccumulatorError::StoreError(format!(
                "expected commitment at index {} but found none (count={})",
                index, self.leaf_count
            )))
            .wrap_with_cost(cost),
        }
    }

    /// Whether `commitment` exists anywhere among stored leaves.
    pub fn commitment_exists<S: CommitmentStore>(
        &self,
        commitment: &Commitment,
        store: &S,
    ) -> CostResult<bool, AccumulatorError> {
        store.has_commitment(commitment)
    }

    /// Append a commitment, restricted to the authorized inserter.
    ///
    /// Preconditions, checked in order, each a hard failure with no
    /// partial mutation:
    /// 1. `caller` matches the authorized inserter, else `PermissionDenied`;
    /// 2. `commitment` is not the reserved empty value, else
    ///    `InvalidCommitment`;
    /// 3. the tree is not full, else `TreeFull`;
    /// 4. `commitment` is not already stored, else `DuplicateCommitment`.
    ///
    /// On success the commitment is stored at index `leaf_count`, the
    /// frontier is updated level by level (exactly `depth` node hashes,
    /// reported through the cost context), and the new root is published.
    /// All in-memory state is written only after every store operation has
    /// succeeded, so a store failure leaves the accumulator unchanged.
    pub fn insert<S: CommitmentStore>(
        &mut self,
        caller: CallerId,
        commitment: Commitment,
        store: &S,
    ) -> CostResult<InsertionRecord, AccumulatorError> {
        let mut cost = OperationCost::default();

        if caller != self.authorized {
            return Err(AccumulatorError::PermissionDenied).wrap_with_cost(cost);
        }
        if commitment == EMPTY_COMMITMENT {
            return Err(AccumulatorError::InvalidCommitment).wrap_with_cost(cost);
        }
        if self.leaf_count >= self.capacity() {
            return Err(AccumulatorError::TreeFull {
                capacity: self.capacity(),
                count: self.leaf_count,
            })
            .wrap_with_cost(cost);
        }
        let duplicate = cost_return_on_error!(&mut cost, store.has_commitment(&commitment));
        if duplicate {
            return Err(AccumulatorError::DuplicateCommitment).wrap_with_cost(cost);
        }

        let leaf_index = self.leaf_count;
        cost_return_on_error!(&mut cost, store.put_commitment(leaf_index, commitment));

        // Frontier walk. On an even index this node is a left child: its
        // right sibling subtree is still all-empty, and the node value is
        // parked in the frontier for the insertion that fills that sibling.
        // On an odd index the pending left sibling is consumed.
        let mut current = commitment;
        let mut idx = leaf_index;
        for level in 0..self.depth as usize {
            if idx & 1 == 0 {
                self.frontier[level] = current;
                current = combine(&current, &self.empty[level]);
            } else {
                current = combine(&self.frontier[level], &current);
            }
            idx >>= 1;
        }
        cost.hash_node_calls += self.depth as u32;

        let prev_root = self.root;
        self.root = current;
        self.leaf_count += 1;

        Ok(InsertionRecord {
            commitment,
            leaf_index,
            prev_root,
            new_root: current,
        })
        .wrap_with_cost(cost)
    }
}
