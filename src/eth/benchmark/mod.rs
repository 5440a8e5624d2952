//! `eth_getProof` latency benchmark.

mod benchmark_config;
mod benchmark_mode;
mod benchmark_runner;
mod benchmark_summary;
mod failure_recorder;
mod latency;

pub use benchmark_config::BenchmarkConfig;
pub use benchmark_mode::BenchmarkMode;
pub use benchmark_mode::ModeSelection;
pub use benchmark_runner::BenchmarkRunner;
pub use benchmark_runner::check_proof_response;
pub use benchmark_summary::BenchmarkSummary;
pub use failure_recorder::FailureRecord;
pub use failure_recorder::FailureRecorder;
pub use failure_recorder::build_curl;
pub use latency::LatencyPercentiles;
pub use latency::P99_MIN_SAMPLES;
pub use latency::percentile;
