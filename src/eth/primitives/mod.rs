mod block_number;
mod block_tag;
mod crawl_row;
mod rpc_outcome;
mod test_case;

pub use block_number::BlockNumber;
pub use block_tag::BlockTag;
pub use crawl_row::CrawlRow;
pub use rpc_outcome::RpcOutcome;
pub use test_case::ResolvedTestCase;
pub use test_case::TestCase;
