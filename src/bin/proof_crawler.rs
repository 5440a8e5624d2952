use eth_proof_bench::config::ProofCrawlerConfig;
use eth_proof_bench::eth::crawler::check_block_range;
use eth_proof_bench::eth::dataset::DatasetWriter;
use eth_proof_bench::init_global_services;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // init services
    let config: ProofCrawlerConfig = init_global_services()?;
    check_block_range(config.block_start, config.block_end)?;

    let chain = config.rpc.init()?;
    let crawler = config.crawler.init(chain);

    // crawl blocks into dataset, keeping rows written before a failure
    let mut dataset = DatasetWriter::create(&config.output)?;
    let result = crawler.crawl(config.block_start, config.block_end, &mut dataset).await;
    dataset.flush()?;
    let report = result?;

    tracing::info!(path = %config.output.display(), rows = %report.rows, "wrote dataset");
    Ok(())
}
