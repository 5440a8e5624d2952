use std::str::FromStr;

use anyhow::anyhow;
use display_json::DebugAsJson;
use strum::VariantNames;

use crate::eth::primitives::BlockTag;
use crate::eth::primitives::ResolvedTestCase;

// -----------------------------------------------------------------------------
// Mode
// -----------------------------------------------------------------------------

/// Block targeting strategy of a benchmark pass.
#[derive(DebugAsJson, strum::Display, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum BenchmarkMode {
    /// Proofs at the block each row was observed in.
    #[serde(rename = "real-blocks")]
    #[strum(to_string = "REAL-BLOCKS")]
    RealBlocks,

    /// Proofs at the chain head, whatever the row block is.
    #[serde(rename = "sim-latest")]
    #[strum(to_string = "SIM-LATEST")]
    SimLatest,
}

impl BenchmarkMode {
    /// Block tag sent in the `eth_getProof` params for the row.
    pub fn block_tag(self, row: &ResolvedTestCase) -> BlockTag {
        match self {
            Self::RealBlocks => BlockTag::Number(row.effective_block),
            Self::SimLatest => BlockTag::Latest,
        }
    }
}

// -----------------------------------------------------------------------------
// Selection
// -----------------------------------------------------------------------------

/// Benchmark passes requested on the command line.
#[derive(DebugAsJson, strum::Display, strum::VariantNames, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub enum ModeSelection {
    #[default]
    #[serde(rename = "real-blocks")]
    #[strum(to_string = "real-blocks")]
    RealBlocks,

    #[serde(rename = "sim-latest")]
    #[strum(to_string = "sim-latest")]
    SimLatest,

    #[serde(rename = "both")]
    #[strum(to_string = "both")]
    Both,
}

impl ModeSelection {
    /// Passes to execute, in execution order.
    pub fn modes(self) -> Vec<BenchmarkMode> {
        match self {
            Self::RealBlocks => vec![BenchmarkMode::RealBlocks],
            Self::SimLatest => vec![BenchmarkMode::SimLatest],
            Self::Both => vec![BenchmarkMode::RealBlocks, BenchmarkMode::SimLatest],
        }
    }
}

impl FromStr for ModeSelection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_ref() {
            "real-blocks" | "real" => Ok(Self::RealBlocks),
            "sim-latest" | "sim" | "latest" => Ok(Self::SimLatest),
            "both" => Ok(Self::Both),
            s => Err(anyhow!("unknown benchmark mode: \"{}\" - valid values are {:?}", s, ModeSelection::VARIANTS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eth::primitives::BlockNumber;

    fn row(effective: u64, original: Option<u64>) -> ResolvedTestCase {
        ResolvedTestCase {
            effective_block: BlockNumber::from(effective),
            original_block: original.map(BlockNumber::from),
            address: "0x00000000000000000000000000000000000000aa".to_owned(),
            storage_slot: None,
        }
    }

    #[test]
    fn block_tag_mapping() {
        let carried = row(100, None);
        assert_eq!(BenchmarkMode::RealBlocks.block_tag(&carried), BlockTag::Number(BlockNumber::from(100u64)));
        assert_eq!(BenchmarkMode::SimLatest.block_tag(&carried), BlockTag::Latest);
        assert_eq!(BenchmarkMode::SimLatest.block_tag(&row(7, Some(7))), BlockTag::Latest);
    }

    #[test]
    fn labels() {
        assert_eq!(BenchmarkMode::RealBlocks.to_string(), "REAL-BLOCKS");
        assert_eq!(BenchmarkMode::SimLatest.to_string(), "SIM-LATEST");
    }

    #[test]
    fn selection_parsing_and_order() {
        assert_eq!(ModeSelection::from_str("both").unwrap().modes(), vec![BenchmarkMode::RealBlocks, BenchmarkMode::SimLatest]);
        assert_eq!(ModeSelection::from_str(" SIM-LATEST ").unwrap(), ModeSelection::SimLatest);
        assert_eq!(ModeSelection::from_str("real").unwrap(), ModeSelection::RealBlocks);
        assert_eq!(ModeSelection::default().modes(), vec![BenchmarkMode::RealBlocks]);
        assert!(ModeSelection::from_str("pending").is_err());
    }
}
