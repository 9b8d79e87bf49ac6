pub mod block;
pub mod model;

pub use block::{Block, BlockPayload};
pub use model::Ledger;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 3;

/// Sentinel previous-hash of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Length of a SHA-256 digest in hex characters; upper bound for difficulty.
pub const HASH_HEX_LEN: usize = 64;
