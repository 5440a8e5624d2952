//! Application configuration.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::anyhow;
use clap::Parser;
use display_json::DebugAsJson;
use strum::VariantNames;

use crate::eth::benchmark::BenchmarkConfig;
use crate::eth::crawler::CrawlerConfig;
use crate::eth::primitives::BlockNumber;
use crate::infra::build_info;
use crate::infra::rpc_client::RpcClientConfig;
use crate::infra::tracing::TracingConfig;

/// Loads .env files according to the binary and environment.
pub fn load_dotenv() {
    // parse env manually because this is executed before clap
    let env = match std::env::var("ENV") {
        Ok(env) => Environment::from_str(env.as_str()),
        Err(_) => Ok(Environment::Local),
    };
    let env = match env {
        Ok(env) => env,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    // load .env file
    let env_filename = format!("config/{}.env.{}", build_info::binary_name(), env);
    println!("reading env file | filename={}", env_filename);

    if let Err(e) = dotenvy::from_filename(env_filename) {
        println!("env file error: {e}");
    }
}

// -----------------------------------------------------------------------------
// Config: Common
// -----------------------------------------------------------------------------

pub trait WithCommonConfig {
    fn common(&self) -> &CommonConfig;
}

/// Configuration that can be used by any binary.
#[derive(DebugAsJson, Clone, Parser, serde::Serialize)]
#[command(author, version, about, long_about = None)]
pub struct CommonConfig {
    /// Environment where the application is running.
    #[arg(long = "env", env = "ENV", default_value = "local")]
    pub env: Environment,

    #[clap(flatten)]
    pub tracing: TracingConfig,

    /// Prevents clap from breaking when passing `nocapture` options in tests.
    #[arg(long = "nocapture")]
    pub nocapture: bool,
}

impl WithCommonConfig for CommonConfig {
    fn common(&self) -> &CommonConfig {
        self
    }
}

// -----------------------------------------------------------------------------
// Config: ProofCrawler
// -----------------------------------------------------------------------------

/// Configuration for `proof-crawler` binary.
#[derive(DebugAsJson, Clone, Parser, derive_more::Deref, serde::Serialize)]
pub struct ProofCrawlerConfig {
    /// First block to crawl.
    #[arg(long = "start", env = "BLOCK_START")]
    pub block_start: BlockNumber,

    /// Last block to crawl, inclusive. Clamped to the chain head.
    #[arg(long = "end", env = "BLOCK_END")]
    pub block_end: BlockNumber,

    /// Dataset file to write.
    #[arg(long = "out", env = "DATASET_OUT", default_value = "dataset.csv")]
    pub output: PathBuf,

    #[clap(flatten)]
    pub rpc: RpcClientConfig,

    #[clap(flatten)]
    pub crawler: CrawlerConfig,

    #[deref]
    #[clap(flatten)]
    pub common: CommonConfig,
}

impl WithCommonConfig for ProofCrawlerConfig {
    fn common(&self) -> &CommonConfig {
        &self.common
    }
}

// -----------------------------------------------------------------------------
// Config: ProofBench
// -----------------------------------------------------------------------------

/// Configuration for `proof-bench` binary.
#[derive(DebugAsJson, Clone, Parser, derive_more::Deref, serde::Serialize)]
pub struct ProofBenchConfig {
    /// Dataset file to read.
    #[arg(long = "in", env = "DATASET_IN", default_value = "dataset.csv")]
    pub input: PathBuf,

    #[clap(flatten)]
    pub rpc: RpcClientConfig,

    #[clap(flatten)]
    pub benchmark: BenchmarkConfig,

    #[deref]
    #[clap(flatten)]
    pub common: CommonConfig,
}

impl WithCommonConfig for ProofBenchConfig {
    fn common(&self) -> &CommonConfig {
        &self.common
    }
}

// -----------------------------------------------------------------------------
// Enum: Env
// -----------------------------------------------------------------------------
#[derive(DebugAsJson, strum::Display, strum::VariantNames, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Environment {
    #[serde(rename = "local")]
    #[strum(to_string = "local")]
    Local,

    #[serde(rename = "staging")]
    #[strum(to_string = "staging")]
    Staging,

    #[serde(rename = "production")]
    #[strum(to_string = "production")]
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_ref() {
            "local" => Ok(Self::Local),
            "staging" | "test" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            s => Err(anyhow!("unknown environment: \"{}\" - valid values are {:?}", s, Environment::VARIANTS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::eth::benchmark::ModeSelection;

    #[test]
    fn environment_aliases() {
        assert_eq!(Environment::from_str("prod").unwrap(), Environment::Production);
        assert_eq!(Environment::from_str(" Test ").unwrap(), Environment::Staging);
        assert!(Environment::from_str("moon").is_err());
    }

    #[test]
    fn crawler_defaults() {
        let config = ProofCrawlerConfig::try_parse_from(["proof-crawler", "--rpc", "http://node:8545", "--start", "100", "--end", "0xc8"]).unwrap();
        assert_eq!(config.block_start, BlockNumber::from(100u64));
        assert_eq!(config.block_end, BlockNumber::from(200u64));
        assert_eq!(config.output, PathBuf::from("dataset.csv"));
        assert_eq!(config.rpc.rpc_timeout, Duration::from_secs(60));
        assert_eq!(config.crawler.max_retries, 3);
        assert_eq!(config.crawler.backoff_base, Duration::ZERO);
        assert_eq!(config.crawler.pause, Duration::ZERO);
        assert!(!config.crawler.noisy);
        assert_eq!(config.crawler.noise_trailing_rows, 100);
    }

    #[test]
    fn bench_options() {
        let config = ProofBenchConfig::try_parse_from([
            "proof-bench",
            "--rpc",
            "http://node:8545",
            "--in",
            "rows.csv",
            "--mode",
            "both",
            "--timeout",
            "2.5",
            "--fail-out",
            "failures.txt",
        ])
        .unwrap();
        assert_eq!(config.input, PathBuf::from("rows.csv"));
        assert_eq!(config.benchmark.mode, ModeSelection::Both);
        assert_eq!(config.benchmark.fail_out, PathBuf::from("failures.txt"));
        assert_eq!(config.rpc.rpc_timeout, Duration::from_millis(2500));
    }
}
