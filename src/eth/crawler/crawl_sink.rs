use crate::eth::primitives::CrawlRow;

/// Destination of rows produced by [`crate::eth::crawler::BlockCrawler`], in production order.
pub trait CrawlSink {
    fn push(&mut self, row: CrawlRow) -> anyhow::Result<()>;
}

impl CrawlSink for Vec<CrawlRow> {
    fn push(&mut self, row: CrawlRow) -> anyhow::Result<()> {
        Vec::push(self, row);
        Ok(())
    }
}
