use crate::error::{ChainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 hash as hex string, used to link blocks and detect tampering.
pub type BlockHash = String;

/// An immutable block committing to a weight payload and to its
/// predecessor's hash.
///
/// A block is built once, either as genesis or via [`Block::next`], and never
/// mutated afterwards. Its `hash` covers every other field, so altering any
/// of them after creation is detectable with [`Block::is_valid`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Position in the chain; genesis is 0.
    pub index: u64,
    /// When the block was created.
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied payload. No range constraint.
    pub weight: i64,
    /// Hash of this block (covers all other fields).
    pub hash: BlockHash,
    /// Hash of the preceding block; empty for genesis.
    pub previous_hash: BlockHash,
}

/// The digest input: every field of a block except `hash` itself.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Digestible<'a> {
    index: u64,
    timestamp: &'a DateTime<Utc>,
    weight: i64,
    previous_hash: &'a str,
}

impl Block {
    /// Create the genesis block: index 0, weight 0, no predecessor.
    pub fn genesis() -> Result<Self> {
        Self::with_timestamp(0, Utc::now(), 0, BlockHash::new())
    }

    /// Build the successor of `previous` carrying the given weight.
    ///
    /// On failure no block is produced, so a caller can never append a
    /// half-built block.
    pub fn next(previous: &Block, weight: i64) -> Result<Self> {
        Self::with_timestamp(
            previous.index + 1,
            Utc::now(),
            weight,
            previous.hash.clone(),
        )
        .map_err(|source| ChainError::HashComputation {
            weight,
            source: Box::new(source),
        })
    }

    /// Create a block with an explicit timestamp (for testing / determinism).
    /// The `hash` is computed from all other fields.
    pub fn with_timestamp(
        index: u64,
        timestamp: DateTime<Utc>,
        weight: i64,
        previous_hash: BlockHash,
    ) -> Result<Self> {
        let mut block = Self {
            index,
            timestamp,
            weight,
            hash: BlockHash::new(),
            previous_hash,
        };
        block.hash = block.compute_hash()?;
        Ok(block)
    }

    /// Compute the SHA-256 hex digest over the block's non-hash fields.
    ///
    /// Deterministic for identical field values, stored timestamp included:
    /// the fields are serialized to canonical JSON and digested, so
    /// re-validation must use the block's recorded timestamp, never a fresh
    /// one.
    pub fn compute_hash(&self) -> Result<BlockHash> {
        let payload = serde_json::to_vec(&Digestible {
            index: self.index,
            timestamp: &self.timestamp,
            weight: self.weight,
            previous_hash: &self.previous_hash,
        })?;
        let mut hasher = Sha256::new();
        hasher.update(&payload);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Check `current` against its claimed predecessor.
    ///
    /// True iff the index advances by one, `current` links to `previous` by
    /// hash, and `current.hash` matches the recomputed digest. A failed check
    /// is `Ok(false)`; only a hash recomputation failure is an error.
    pub fn is_valid(current: &Block, previous: &Block) -> Result<bool> {
        let recomputed = current.compute_hash()?;
        Ok(previous.index + 1 == current.index
            && previous.hash == current.previous_hash
            && recomputed == current.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned(weight: i64) -> Block {
        Block::with_timestamp(0, Utc::now(), weight, BlockHash::new()).unwrap()
    }

    #[test]
    fn genesis_invariants() {
        let g = Block::genesis().unwrap();
        assert_eq!(g.index, 0);
        assert_eq!(g.weight, 0);
        assert!(g.previous_hash.is_empty());
        assert_eq!(g.hash, g.compute_hash().unwrap());
    }

    #[test]
    fn next_links_to_parent() {
        let g = Block::genesis().unwrap();
        let b = Block::next(&g, 42).unwrap();
        assert_eq!(b.index, 1);
        assert_eq!(b.previous_hash, g.hash);
        assert!(Block::is_valid(&b, &g).unwrap());
    }

    #[test]
    fn deterministic_with_same_inputs() {
        let ts = Utc::now();
        let b1 = Block::with_timestamp(3, ts, -9, "abc".into()).unwrap();
        let b2 = Block::with_timestamp(3, ts, -9, "abc".into()).unwrap();
        assert_eq!(b1.hash, b2.hash);
        assert_eq!(b1.compute_hash().unwrap(), b1.compute_hash().unwrap());
    }

    #[test]
    fn digest_ignores_stored_hash() {
        let mut b = pinned(5);
        let original = b.compute_hash().unwrap();
        b.hash = "garbage".into();
        assert_eq!(b.compute_hash().unwrap(), original);
    }

    #[test]
    fn tampered_weight_detected() {
        let g = Block::genesis().unwrap();
        let mut b = Block::next(&g, 42).unwrap();
        b.weight = 43;
        assert!(!Block::is_valid(&b, &g).unwrap());
    }

    #[test]
    fn tampered_index_detected() {
        let g = Block::genesis().unwrap();
        let mut b = Block::next(&g, 42).unwrap();
        b.index = 2;
        assert!(!Block::is_valid(&b, &g).unwrap());
    }

    #[test]
    fn tampered_previous_hash_detected() {
        let g = Block::genesis().unwrap();
        let mut b = Block::next(&g, 42).unwrap();
        b.previous_hash = g.previous_hash.clone();
        assert!(!Block::is_valid(&b, &g).unwrap());
    }

    #[test]
    fn tampered_timestamp_detected() {
        let g = Block::genesis().unwrap();
        let mut b = Block::next(&g, 42).unwrap();
        b.timestamp = b.timestamp + chrono::Duration::seconds(1);
        assert!(!Block::is_valid(&b, &g).unwrap());
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let g = Block::genesis().unwrap();
        let json = serde_json::to_value(&g).unwrap();
        let obj = json.as_object().unwrap();
        for field in ["index", "timestamp", "weight", "hash", "previousHash"] {
            assert!(obj.contains_key(field), "missing field {}", field);
        }
        assert_eq!(obj.len(), 5);
    }
}
