use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{GENESIS_PREVIOUS_HASH, HASH_HEX_LEN};

/// What a block carries: either the genesis anchor or one secret share
/// contributed by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockPayload {
    Genesis,
    Share { author: String, x: u64, y: u64 },
}

impl BlockPayload {
    pub fn author(&self) -> &str {
        match self {
            BlockPayload::Genesis => "genesis",
            BlockPayload::Share { author, .. } => author,
        }
    }
}

/// A single block in the share ledger. Immutable once mined and appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub previous_hash: String,
    pub nonce: u64,   // Proof-of-Work nonce
    pub hash: String, // Cached hash of the block
    pub payload: BlockPayload,
}

impl Block {
    /// Create the genesis block (first block in the chain). Genesis is hashed
    /// but never mined: it has no predecessor to validate against.
    pub fn genesis() -> Self {
        let mut block = Self {
            index: 0,
            timestamp: Utc::now().timestamp(),
            previous_hash: String::from(GENESIS_PREVIOUS_HASH),
            nonce: 0,
            hash: String::new(),
            payload: BlockPayload::Genesis,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Create a new block (not mined yet). Call `mine()` to perform PoW.
    pub fn new(index: u64, previous_hash: String, payload: BlockPayload) -> Self {
        let mut block = Self {
            index,
            timestamp: Utc::now().timestamp(),
            previous_hash,
            nonce: 0,
            hash: String::new(),
            payload,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Compute the SHA-256 hash of this block using its fields
    /// (excluding the `hash` field itself). The payload is serialized
    /// deterministically as JSON and included in the preimage.
    pub fn compute_hash(&self) -> String {
        let payload_json = serde_json::to_string(&self.payload).expect("serialize payload");
        let preimage = format!(
            "{}:{}:{}:{}:{}",
            self.index, self.timestamp, self.previous_hash, self.nonce, payload_json
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest)
    }

    /// Perform Proof-of-Work by finding a nonce that yields a hash
    /// starting with `difficulty` leading zeros (in hex). Blocking loop,
    /// runs to completion; `difficulty = 0` succeeds without touching the
    /// nonce.
    pub fn mine(&mut self, difficulty: u32) {
        assert!(
            difficulty as usize <= HASH_HEX_LEN,
            "difficulty exceeds digest length"
        );
        let target_prefix = "0".repeat(difficulty as usize);
        loop {
            self.hash = self.compute_hash();
            if self.hash.starts_with(&target_prefix) {
                break;
            }
            self.nonce = self.nonce.wrapping_add(1);
        }
        info!("block mined: {} by {}", self.hash, self.payload.author());
    }

    /// Validate that the block's cached `hash` matches its content and
    /// satisfies the PoW difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        let expected = self.compute_hash();
        if self.hash != expected {
            return false;
        }
        self.hash
            .chars()
            .take(difficulty as usize)
            .all(|c| c == '0')
    }

    /// The share point carried by this block, `None` for genesis.
    pub fn share(&self) -> Option<(u64, u64)> {
        match self.payload {
            BlockPayload::Genesis => None,
            BlockPayload::Share { x, y, .. } => Some((x, y)),
        }
    }
}
