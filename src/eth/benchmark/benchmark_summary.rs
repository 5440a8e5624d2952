use std::fmt::Display;

use display_json::DebugAsJson;

use crate::eth::benchmark::BenchmarkMode;
use crate::eth::benchmark::LatencyPercentiles;

/// Aggregated result of one benchmark pass.
#[derive(DebugAsJson, Clone, PartialEq, serde::Serialize)]
pub struct BenchmarkSummary {
    pub mode: BenchmarkMode,
    pub endpoint: String,
    pub total: usize,
    pub successes: usize,
    pub failures: usize,

    /// Latencies in seconds.
    pub latency: LatencyPercentiles,
}

impl BenchmarkSummary {
    pub fn new(mode: BenchmarkMode, endpoint: impl Into<String>, latencies: &[f64], successes: usize, failures: usize) -> Self {
        Self {
            mode,
            endpoint: endpoint.into(),
            total: successes + failures,
            successes,
            failures,
            latency: LatencyPercentiles::from_samples(latencies),
        }
    }

    /// Percentage of failed requests. Zero when no request was made.
    pub fn fail_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.failures as f64 / self.total as f64 * 100.0
    }
}

impl Display for BenchmarkSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "----- eth_getProof Benchmark [{}] -----", self.mode)?;
        writeln!(f, "Endpoint         : {}", self.endpoint)?;
        if self.total == 0 {
            writeln!(f, "No requests were made.")?;
        } else {
            writeln!(f, "Requests         : {}", self.total)?;
            writeln!(f, "Successes        : {}", self.successes)?;
            writeln!(f, "Failures         : {}", self.failures)?;
            writeln!(f, "Fail rate        : {:.2}%", self.fail_rate())?;
            writeln!(f, "P50 latency      : {:.3}s", self.latency.p50)?;
            writeln!(f, "P95 latency      : {:.3}s", self.latency.p95)?;
            writeln!(f, "P99 latency      : {:.3}s", self.latency.p99)?;
        }
        write!(f, "----------------------------------")
    }
}
