use std::time::Duration;

use clap::Parser;
use display_json::DebugAsJson;

use crate::eth::crawler::BlockCrawler;
use crate::eth::crawler::CrawlOptions;
use crate::eth::crawler::noise::DEFAULT_NOISE_TRAILING_ROWS;
use crate::ext::parse_duration;
use crate::infra::RpcClient;
use crate::infra::rpc_client::DEFAULT_MAX_RETRIES;

#[derive(Parser, DebugAsJson, Clone, serde::Serialize)]
pub struct CrawlerConfig {
    /// Wait between two blocks.
    #[arg(long = "pause", value_parser = parse_duration, env = "CRAWLER_PAUSE", default_value = "0s")]
    pub pause: Duration,

    /// Number of retries after a failed RPC attempt.
    #[arg(long = "retries", env = "CRAWLER_RPC_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Base delay between retries, doubled on every retry.
    #[arg(long = "backoff", value_parser = parse_duration, env = "CRAWLER_RPC_BACKOFF", default_value = "0s")]
    pub backoff_base: Duration,

    /// Emits randomized rows that are expected to fail or return empty proofs.
    #[arg(long = "noisy", env = "CRAWLER_NOISY", default_value = "false")]
    pub noisy: bool,

    /// Number of fully randomized rows appended after the range in noisy mode.
    #[arg(long = "noise-rows", env = "CRAWLER_NOISE_ROWS", default_value_t = DEFAULT_NOISE_TRAILING_ROWS)]
    pub noise_trailing_rows: usize,
}

impl CrawlerConfig {
    /// Inits [`BlockCrawler`] applying the configured retry policy to the client.
    pub fn init(&self, chain: RpcClient) -> BlockCrawler {
        tracing::info!(config = ?self, "creating block crawler");

        let chain = chain.with_retries(self.max_retries, self.backoff_base);
        let options = CrawlOptions {
            pause: self.pause,
            noisy: self.noisy,
            noise_trailing_rows: self.noise_trailing_rows,
        };
        BlockCrawler::new(chain, options)
    }
}
