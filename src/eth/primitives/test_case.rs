use display_json::DebugAsJson;

use crate::eth::primitives::BlockNumber;

/// Proof request candidate as read from a dataset, before block resolution.
#[derive(DebugAsJson, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TestCase {
    pub address: String,

    /// Storage key to prove. `None` requests the account proof only.
    pub storage_slot: Option<String>,

    /// `None` means the row must inherit the block of a previous row.
    pub block_number: Option<BlockNumber>,
}

impl TestCase {
    pub fn new(address: impl Into<String>, storage_slot: Option<String>, block_number: Option<BlockNumber>) -> Self {
        Self {
            address: address.into(),
            storage_slot,
            block_number,
        }
    }
}

/// Proof request with a concrete block number.
#[derive(DebugAsJson, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedTestCase {
    pub effective_block: BlockNumber,

    /// Block number as it appeared in the input, kept for diagnostics.
    pub original_block: Option<BlockNumber>,

    pub address: String,
    pub storage_slot: Option<String>,
}

impl ResolvedTestCase {
    /// Storage keys parameter of `eth_getProof`: zero or one key.
    pub fn storage_keys(&self) -> Vec<String> {
        self.storage_slot.iter().cloned().collect()
    }

    /// Whether the block number was filled from a previous row.
    pub fn is_carried_forward(&self) -> bool {
        self.original_block.is_none()
    }
}
