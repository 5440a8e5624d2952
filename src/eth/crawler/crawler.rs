use std::time::Duration;

use alloy_primitives::U64;
use display_json::DebugAsJson;
use itertools::Itertools;

use crate::alias::JsonValue;
use crate::eth::ConfigurationError;
use crate::eth::crawler::CrawlSink;
use crate::eth::crawler::NoiseGenerator;
use crate::eth::crawler::noise::DEFAULT_NOISE_TRAILING_ROWS;
use crate::eth::primitives::BlockNumber;
use crate::eth::primitives::BlockTag;
use crate::eth::primitives::CrawlRow;
use crate::ext::DisplayExt;
use crate::ext::not;
use crate::infra::RpcClient;

/// Transaction count that marks a receiver as a contract of interest.
pub const CONTRACT_OF_INTEREST_NONCE: u64 = 1;

/// First key requested from `debug_storageRangeAt`.
pub const STORAGE_RANGE_START_KEY: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Number of storage entries requested from `debug_storageRangeAt`.
pub const STORAGE_RANGE_MAX_RESULTS: u64 = 16;

/// Position of the sampled key among the sorted storage keys.
const SAMPLED_SLOT_POSITION: usize = 3;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Wait between two blocks.
    pub pause: Duration,

    /// Emit randomized rows next to the baseline rows.
    pub noisy: bool,

    /// Fully randomized rows appended after the range when `noisy` is set.
    pub noise_trailing_rows: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            pause: Duration::ZERO,
            noisy: false,
            noise_trailing_rows: DEFAULT_NOISE_TRAILING_ROWS,
        }
    }
}

#[derive(DebugAsJson, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CrawlReport {
    pub blocks_processed: u64,
    pub blocks_skipped: u64,
    pub transactions: u64,
    pub contracts: u64,
    pub rows: u64,
}

#[derive(Debug, Default)]
struct BlockStats {
    transactions: u64,
    contracts: u64,
    rows: u64,
}

impl CrawlReport {
    fn add(&mut self, stats: &BlockStats) {
        self.blocks_processed += 1;
        self.transactions += stats.transactions;
        self.contracts += stats.contracts;
        self.rows += stats.rows;
    }
}

/// Walks a block range and turns its transactions into proof dataset rows.
pub struct BlockCrawler {
    chain: RpcClient,
    options: CrawlOptions,
    noise: NoiseGenerator,
}

impl BlockCrawler {
    pub fn new(chain: RpcClient, options: CrawlOptions) -> Self {
        Self {
            chain,
            options,
            noise: NoiseGenerator::new(),
        }
    }

    /// Crawls `[start, end]`, pushing rows to `sink` as they are produced.
    ///
    /// `end` is clamped to the chain head. Blocks that cannot be retrieved are skipped.
    pub async fn crawl<S: CrawlSink>(&self, start: BlockNumber, end: BlockNumber, sink: &mut S) -> anyhow::Result<CrawlReport> {
        check_block_range(start, end)?;

        // clamp range to chain head
        let head = self.chain.fetch_block_number().await?;
        let end = if end > head {
            tracing::warn!(%end, %head, "end block is ahead of chain head, clamping to head");
            head
        } else {
            end
        };

        let total = start.count_to(end);
        if total == 0 {
            tracing::warn!(%start, %head, "start block is ahead of chain head, no blocks to crawl");
        }
        tracing::info!(%start, %end, %total, noisy = %self.options.noisy, pause = %self.options.pause.to_string_ext(), "starting crawl");

        // crawl blocks
        let mut report = CrawlReport::default();
        for (index, number) in (start.as_u64()..=end.as_u64()).map(BlockNumber::from).enumerate() {
            match self.crawl_block(number, sink).await? {
                Some(stats) => {
                    tracing::info!(
                        %number,
                        progress = %format!("{}/{}", index + 1, total),
                        transactions = %stats.transactions,
                        contracts = %stats.contracts,
                        rows = %stats.rows,
                        "crawled block"
                    );
                    report.add(&stats);
                }
                None => report.blocks_skipped += 1,
            }

            if not(self.options.pause.is_zero()) && number < end {
                tokio::time::sleep(self.options.pause).await;
            }
        }

        // append trailing noise
        if self.options.noisy {
            for _ in 0..self.options.noise_trailing_rows {
                sink.push(self.noise.trailing_row()?)?;
                report.rows += 1;
            }
            tracing::info!(rows = %self.options.noise_trailing_rows, "appended trailing noise rows");
        }

        tracing::info!(?report, "crawl finished");
        Ok(report)
    }

    /// Crawls a single block. Returns `None` if the block was skipped.
    async fn crawl_block<S: CrawlSink>(&self, number: BlockNumber, sink: &mut S) -> anyhow::Result<Option<BlockStats>> {
        let block_json = match self.chain.fetch_block_with_transactions(number).await {
            Ok(Some(json)) => json,
            Ok(None) => {
                tracing::warn!(%number, "skipping block because node returned no data");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(reason = ?e, %number, "skipping block because it could not be retrieved");
                return Ok(None);
            }
        };

        let block: CrawlerBlock = match serde_json::from_value(block_json) {
            Ok(block) => block,
            Err(e) => {
                tracing::warn!(reason = ?e, %number, "skipping block because it does not match expected format");
                return Ok(None);
            }
        };

        let tag = BlockTag::Number(number);
        let transactions = block.transactions.unwrap_or_default();
        let mut stats = BlockStats {
            transactions: transactions.len() as u64,
            ..BlockStats::default()
        };

        for tx in &transactions {
            let slot = self.sample_slot(block.hash.as_deref(), tx, tag).await;
            if slot.is_some() {
                stats.contracts += 1;
            }
            for row in self.transaction_rows(number, tx, slot)? {
                sink.push(row)?;
                stats.rows += 1;
            }
        }

        Ok(Some(stats))
    }

    /// Baseline rows of a transaction followed by its noise rows, if enabled.
    fn transaction_rows(&self, number: BlockNumber, tx: &CrawlerTransaction, slot: Option<String>) -> anyhow::Result<Vec<CrawlRow>> {
        let mut rows = Vec::with_capacity(2);

        if let Some(to) = tx.receiver() {
            rows.push(CrawlRow::baseline(number, to, slot.clone()));
        }
        if let Some(from) = tx.sender() {
            rows.push(CrawlRow::baseline(number, from, None));
        }

        if let (true, Some(from), Some(to), Some(slot)) = (self.options.noisy, tx.sender(), tx.receiver(), slot.as_deref()) {
            rows.extend(self.noise.transaction_noise(number, from, to, slot)?);
        }

        Ok(rows)
    }

    /// Samples a storage slot of the transaction receiver if it is a contract of interest.
    async fn sample_slot(&self, block_hash: Option<&str>, tx: &CrawlerTransaction, tag: BlockTag) -> Option<String> {
        let (Some(_), Some(to), Some(block_hash), Some(tx_index)) = (tx.sender(), tx.receiver(), block_hash, tx.transaction_index) else {
            return None;
        };

        if not(self.is_contract_of_interest(to, tag).await) {
            return None;
        }

        let range = self
            .chain
            .fetch_storage_range_at(block_hash, tx_index.to::<u64>(), to, STORAGE_RANGE_START_KEY, STORAGE_RANGE_MAX_RESULTS)
            .await;
        match range {
            Ok(range) => select_sampled_slot(&range),
            Err(e) => {
                tracing::debug!(reason = ?e, address = %to, %block_hash, "failed to retrieve storage range");
                None
            }
        }
    }

    async fn is_contract_of_interest(&self, address: &str, tag: BlockTag) -> bool {
        match self.chain.fetch_transaction_count(address, tag).await {
            Ok(nonce) => nonce == CONTRACT_OF_INTEREST_NONCE,
            Err(e) => {
                tracing::debug!(reason = ?e, %address, %tag, "failed to retrieve transaction count");
                false
            }
        }
    }
}

/// Fails if `end` is lower than `start`.
pub fn check_block_range(start: BlockNumber, end: BlockNumber) -> Result<(), ConfigurationError> {
    if end < start {
        let error = ConfigurationError::InvertedBlockRange { start, end };
        tracing::error!(reason = ?error, error = %error.name(), %start, %end, "invalid block range");
        return Err(error);
    }
    Ok(())
}

/// Picks the 4th storage key in ascending order from a `debug_storageRangeAt` result.
pub fn select_sampled_slot(range: &JsonValue) -> Option<String> {
    let storage = range.get("storage")?.as_object()?;
    storage.keys().sorted().nth(SAMPLED_SLOT_POSITION).cloned()
}

// -----------------------------------------------------------------------------
// Blockchain RPC structs
// -----------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct CrawlerBlock {
    hash: Option<String>,
    transactions: Option<Vec<CrawlerTransaction>>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrawlerTransaction {
    from: Option<String>,
    to: Option<String>,
    transaction_index: Option<U64>,
}

impl CrawlerTransaction {
    fn sender(&self) -> Option<&str> {
        self.from.as_deref().filter(|address| not(address.is_empty()))
    }

    /// Absent for contract creations.
    fn receiver(&self) -> Option<&str> {
        self.to.as_deref().filter(|address| not(address.is_empty()))
    }
}
