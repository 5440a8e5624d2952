//! Dataset generation from chain data.

mod crawl_sink;
#[allow(clippy::module_inception)]
mod crawler;
mod crawler_config;
pub mod noise;

pub use crawl_sink::CrawlSink;
pub use crawler::BlockCrawler;
pub use crawler::CONTRACT_OF_INTEREST_NONCE;
pub use crawler::CrawlOptions;
pub use crawler::CrawlReport;
pub use crawler::STORAGE_RANGE_MAX_RESULTS;
pub use crawler::STORAGE_RANGE_START_KEY;
pub use crawler::check_block_range;
pub use crawler::select_sampled_slot;
pub use crawler_config::CrawlerConfig;
pub use noise::NoiseGenerator;
