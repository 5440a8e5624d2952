use std::path::PathBuf;

use clap::Parser;
use display_json::DebugAsJson;

use crate::eth::benchmark::BenchmarkRunner;
use crate::eth::benchmark::FailureRecorder;
use crate::eth::benchmark::ModeSelection;
use crate::infra::RpcClient;

#[derive(Parser, DebugAsJson, Clone, serde::Serialize)]
pub struct BenchmarkConfig {
    /// Block targeting: `real-blocks`, `sim-latest` or `both`.
    #[arg(long = "mode", env = "BENCHMARK_MODE", default_value = "real-blocks")]
    pub mode: ModeSelection,

    /// File that receives failure reports with reproduction commands.
    #[arg(long = "fail-out", env = "BENCHMARK_FAIL_OUT", default_value = "eth_getproof_failures.txt")]
    pub fail_out: PathBuf,
}

impl BenchmarkConfig {
    /// Inits [`BenchmarkRunner`] and the [`FailureRecorder`] shared by all passes.
    pub fn init(&self, chain: RpcClient) -> (BenchmarkRunner, FailureRecorder) {
        tracing::info!(config = ?self, "creating benchmark runner");
        (BenchmarkRunner::new(chain), FailureRecorder::new(&self.fail_out))
    }
}
