//! Byte codec for persisting accumulator state between sessions.
//!
//! Format:
//! ```text
//! version:    u8 (0x01)
//! depth:      u8
//! authorized: [u8; 32]
//! leaf_count: u64 BE
//! root:       [u8; 32]
//! frontier:   depth × [u8; 32]
//! ```
//!
//! Empty-subtree hashes are recomputed on load, not serialized. The input
//! length must match the depth exactly; trailing bytes are rejected.

use crate::{AccumulatorError, CallerId, CommitmentAccumulator};

const STATE_VERSION: u8 = 0x01;

impl CommitmentAccumulator {
    /// Serialize the accumulator state to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let depth = self.depth() as usize;
        let mut buf = Vec::with_capacity(2 + 32 + 8 + 32 + depth * 32);
        buf.push(STATE_VERSION);
        buf.push(self.depth());
        buf.extend_from_slice(&self.authorized().0);
        buf.extend_from_slice(&self.leaf_count().to_be_bytes());
        buf.extend_from_slice(&self.root());
        for level in 0..depth {
            buf.extend_from_slice(&self.frontier_slot(level));
        }
        buf
    }

    /// Deserialize an accumulator from bytes produced by
    /// [`Self::serialize`].
    pub fn deserialize(data: &[u8]) -> Result<Self, AccumulatorError> {
        if data.len() < 2 {
            return Err(AccumulatorError::InvalidData(
                "truncated state header".to_string(),
            ));
        }
        if data[0] != STATE_VERSION {
            return Err(AccumulatorError::InvalidData(format!(
                "unknown state version: 0x{:02x}",
                data[0]
            )));
        }
        let depth = data[1];
        crate::hash::validate_depth(depth)?;

        let expected_len = 2 + 32 + 8 + 32 + depth as usize * 32;
        if data.len() != expected_len {
            return Err(AccumulatorError::InvalidData(format!(
                "state for depth {} must be {} bytes, got {}",
                depth,
                expected_len,
                data.len()
            )));
        }

        let mut pos = 2;
        let authorized: [u8; 32] = data[pos..pos + 32]
            .try_into()
            .map_err(|_| AccumulatorError::InvalidData("bad authorized id".to_string()))?;
        pos += 32;
        let leaf_count = u64::from_be_bytes(
            data[pos..pos + 8]
                .try_into()
                .map_err(|_| AccumulatorError::InvalidData("bad leaf count".to_string()))?,
        );
        pos += 8;
        let root: [u8; 32] = data[pos..pos + 32]
            .try_into()
            .map_err(|_| AccumulatorError::InvalidData("bad root".to_string()))?;
        pos += 32;

        let mut frontier = Vec::with_capacity(depth as usize);
        for _ in 0..depth {
            let slot: [u8; 32] = data[pos..pos + 32]
                .try_into()
                .map_err(|_| AccumulatorError::InvalidData("bad frontier slot".to_string()))?;
            frontier.push(slot);
            pos += 32;
        }

        Self::from_state(depth, leaf_count, root, frontier, CallerId(authorized))
    }
}
