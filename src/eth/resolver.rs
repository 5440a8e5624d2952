//! Carry-forward resolution of missing block numbers.

use crate::eth::primitives::BlockNumber;
use crate::eth::primitives::ResolvedTestCase;
use crate::eth::primitives::TestCase;

/// Output of [`BlockNumberResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub rows: Vec<ResolvedTestCase>,

    /// Rows without a block number that appeared before any row with one.
    pub dropped: usize,

    /// Resolved rows whose block number was inherited from a previous row.
    pub carried: usize,
}

/// Fills missing block numbers with the last concrete block number seen so far.
///
/// Rows are processed strictly left to right: no lookahead and no reordering.
#[derive(Debug, Default)]
pub struct BlockNumberResolver {
    last_seen: Option<BlockNumber>,
}

impl BlockNumberResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a single row, updating the last seen block number.
    ///
    /// Returns `None` if the row has no block number and none was seen before.
    pub fn resolve_one(&mut self, row: TestCase) -> Option<ResolvedTestCase> {
        if let Some(number) = row.block_number {
            self.last_seen = Some(number);
        }
        let effective_block = self.last_seen?;

        Some(ResolvedTestCase {
            effective_block,
            original_block: row.block_number,
            address: row.address,
            storage_slot: row.storage_slot,
        })
    }

    /// Resolves all rows in input order.
    pub fn resolve(&mut self, rows: impl IntoIterator<Item = TestCase>) -> Resolution {
        let mut resolved = Vec::new();
        let mut dropped = 0;

        for row in rows {
            match self.resolve_one(row) {
                Some(row) => resolved.push(row),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::warn!(%dropped, "dropped rows without block number and no previous block number to carry forward");
        }
        let carried = resolved.iter().filter(|row| row.is_carried_forward()).count();
        tracing::info!(resolved = %resolved.len(), %carried, %dropped, "resolved block numbers");

        Resolution {
            rows: resolved,
            dropped,
            carried,
        }
    }
}
