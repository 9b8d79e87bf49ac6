use super::{Block, BlockPayload, GENESIS_PREVIOUS_HASH, HASH_HEX_LEN};

/// Append-only, genesis-anchored chain of share blocks with Proof-of-Work.
///
/// The ledger owns its blocks exclusively: it grows monotonically via
/// `append` and nothing mutates a block after it has been chained.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    difficulty: u32,
}

impl Ledger {
    /// Initialize a new ledger with a genesis block.
    pub fn new(difficulty: u32) -> Self {
        assert!(
            difficulty as usize <= HASH_HEX_LEN,
            "difficulty exceeds digest length"
        );
        let mut ledger = Self {
            chain: Vec::new(),
            difficulty,
        };
        ledger.chain.push(Block::genesis());
        ledger
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Mine and append a new block carrying one share `(x, y)` contributed
    /// by `author`. Distinctness of `x` across shares is the caller's
    /// responsibility; duplicates surface later during reconstruction.
    pub fn append(&mut self, author: &str, x: u64, y: u64) -> &Block {
        let index = self.chain.len() as u64;
        let prev_hash = self.last_block().hash.clone();

        let payload = BlockPayload::Share {
            author: author.to_string(),
            x,
            y,
        };
        let mut block = Block::new(index, prev_hash, payload);
        block.mine(self.difficulty);

        self.chain.push(block);
        self.last_block()
    }

    /// All share blocks (everything except genesis), in append order.
    pub fn valid_shares(&self) -> impl Iterator<Item = &Block> {
        self.chain
            .iter()
            .filter(|b| !matches!(b.payload, BlockPayload::Genesis))
    }

    /// Read-only view of the whole chain, genesis included.
    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Validate the entire chain: linkage, hashes and PoW.
    pub fn is_valid_chain(&self) -> bool {
        if self.chain.is_empty() {
            return false;
        }

        // Validate genesis block immutability
        let genesis = &self.chain[0];
        if genesis.index != 0
            || genesis.previous_hash != GENESIS_PREVIOUS_HASH
            || !matches!(genesis.payload, BlockPayload::Genesis)
            || genesis.hash != genesis.compute_hash()
        {
            return false;
        }

        // Validate the rest of the chain
        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let prev = &self.chain[i - 1];

            // Check linkage
            if current.previous_hash != prev.hash {
                return false;
            }

            // Check hash integrity + difficulty
            if !current.is_valid(self.difficulty) {
                return false;
            }
        }

        true
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }
}
