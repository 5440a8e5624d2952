use eth_proof_bench::config::ProofBenchConfig;
use eth_proof_bench::eth::BlockNumberResolver;
use eth_proof_bench::eth::dataset::read_dataset;
use eth_proof_bench::init_global_services;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // init services
    let config: ProofBenchConfig = init_global_services()?;

    // read dataset and resolve block numbers
    let dataset = read_dataset(&config.input)?;
    let resolution = BlockNumberResolver::new().resolve(dataset.rows);

    // run benchmark passes
    let chain = config.rpc.init()?;
    let (runner, mut recorder) = config.benchmark.init(chain);

    let mut summaries = Vec::new();
    for mode in config.benchmark.mode.modes() {
        summaries.push(runner.run(mode, &resolution.rows, &mut recorder).await);
    }

    // report
    for summary in &summaries {
        println!("{}", summary);
    }
    if let Err(e) = recorder.flush() {
        tracing::error!(reason = ?e, path = %recorder.path().display(), "could not write failure log");
    }

    Ok(())
}
