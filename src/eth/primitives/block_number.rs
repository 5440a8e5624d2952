use std::str::FromStr;

use alloy_primitives::U64;
use anyhow::anyhow;
use display_json::DebugAsJson;

#[derive(DebugAsJson, derive_more::Display, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct BlockNumber(pub U64);

impl BlockNumber {
    pub const ZERO: BlockNumber = BlockNumber(U64::ZERO);

    /// Count how many blocks there is between itself and the othe block.
    ///
    /// Assumes that self is the lower-end of the range.
    pub fn count_to(self, higher_end: BlockNumber) -> u64 {
        if higher_end >= self { higher_end.as_u64() - self.as_u64() + 1 } else { 0 }
    }

    /// Formats the number as a `0x`-prefixed quantity, as expected by JSON-RPC block parameters.
    pub fn to_hex(&self) -> String {
        format!("0x{:x}", self.as_u64())
    }

    pub fn as_u64(&self) -> u64 {
        self.0.to::<u64>()
    }
}

// -----------------------------------------------------------------------------
// Conversions: Other -> Self
// -----------------------------------------------------------------------------

impl From<u64> for BlockNumber {
    fn from(value: u64) -> Self {
        Self(U64::from(value))
    }
}

impl FromStr for BlockNumber {
    type Err = anyhow::Error;

    /// Parses decimal (dataset files) or `0x`-prefixed hexadecimal (RPC responses).
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match U64::from_str(s.trim()) {
            Ok(parsed) => Ok(Self(parsed)),
            Err(e) => {
                tracing::debug!(reason = ?e, value = %s, "failed to parse block number");
                Err(anyhow!("Failed to parse field '{}' with value '{}'", "blockNumber", s))
            }
        }
    }
}
