use display_json::DebugAsJson;

use crate::eth::primitives::BlockNumber;

/// Dataset row produced by the block crawler.
///
/// Rows are not unique: a transaction usually yields one row for its receiver and one for its sender.
#[derive(DebugAsJson, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CrawlRow {
    /// Absent only for the trailing noise rows that exercise malformed input handling.
    pub block_number: Option<BlockNumber>,
    pub address: String,
    pub storage_slot: Option<String>,
    pub randomized_account: bool,
    pub randomized_slot: bool,
}

impl CrawlRow {
    /// Creates a row taken as-is from chain data.
    pub fn baseline(block_number: BlockNumber, address: impl Into<String>, storage_slot: Option<String>) -> Self {
        Self {
            block_number: Some(block_number),
            address: address.into(),
            storage_slot,
            randomized_account: false,
            randomized_slot: false,
        }
    }

    /// Checks if any part of the row was replaced by random data.
    pub fn is_noise(&self) -> bool {
        self.randomized_account || self.randomized_slot
    }
}
