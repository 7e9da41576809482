use crate::block::Block;
use crate::error::Result;
use serde::Serialize;

/// An append-only, caller-owned sequence of hash-linked blocks.
///
/// A chain always holds at least the genesis block: it is constructed only
/// through [`Chain::genesis`] and grows only through [`Chain::extend`], so
/// the tip is always present. Serializes as a plain JSON array of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Start a new chain holding only the genesis block.
    pub fn genesis() -> Result<Self> {
        Ok(Self {
            blocks: vec![Block::genesis()?],
        })
    }

    /// Build the next block from the tip and append it.
    ///
    /// A failed build appends nothing; the chain is unchanged on error.
    pub fn extend(&mut self, weight: i64) -> Result<&Block> {
        let block = Block::next(self.tip(), weight)?;
        self.blocks.push(block);
        Ok(&self.blocks[self.blocks.len() - 1])
    }

    /// The most recently appended block.
    pub fn tip(&self) -> &Block {
        // never empty: genesis() seeds one block and extend() only appends
        &self.blocks[self.blocks.len() - 1]
    }

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Audit the whole chain: genesis invariants plus every adjacent pair
    /// checked with [`Block::is_valid`].
    pub fn validate(&self) -> Result<bool> {
        let genesis = &self.blocks[0];
        if genesis.index != 0
            || !genesis.previous_hash.is_empty()
            || genesis.hash != genesis.compute_hash()?
        {
            return Ok(false);
        }
        for pair in self.blocks.windows(2) {
            if !Block::is_valid(&pair[1], &pair[0])? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fork choice: pick the longer of two chains. Ties favor `b`.
    ///
    /// Length is the entire policy; weights are never compared.
    pub fn longer(a: Chain, b: Chain) -> Chain {
        if a.len() > b.len() {
            a
        } else {
            b
        }
    }

    /// Render the chain as 2-space-indented JSON, one object per block.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
