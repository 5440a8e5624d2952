//! Latency percentiles.

use display_json::DebugAsJson;

/// Minimum number of samples for p99 to be taken from the percentile formula.
///
/// With fewer samples p99 reports the slowest request.
pub const P99_MIN_SAMPLES: usize = 100;

/// Value at `floor(p * (n - 1))` of an ascending slice. Empty slices yield `0.0`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let index = (p * last as f64).floor() as usize;
    sorted[index.min(last)]
}

#[derive(DebugAsJson, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct LatencyPercentiles {
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl LatencyPercentiles {
    /// Computes percentiles of unordered latency samples in seconds.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let p99 = if sorted.len() >= P99_MIN_SAMPLES {
            percentile(&sorted, 0.99)
        } else {
            sorted.last().copied().unwrap_or_default()
        };

        Self {
            p50: percentile(&sorted, 0.50),
            p95: percentile(&sorted, 0.95),
            p99,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenths() -> Vec<f64> {
        (1..=10).map(|i| i as f64 / 10.0).collect()
    }

    #[test]
    fn floor_index_formula() {
        let sorted = tenths();
        assert_eq!(percentile(&sorted, 0.50), 0.5);
        assert_eq!(percentile(&sorted, 0.95), 0.9);
        assert_eq!(percentile(&sorted, 0.0), 0.1);
        assert_eq!(percentile(&sorted, 1.0), 1.0);
    }

    #[test]
    fn empty_samples() {
        assert_eq!(percentile(&[], 0.5), 0.0);
        assert_eq!(LatencyPercentiles::from_samples(&[]), LatencyPercentiles::default());
    }

    #[test]
    fn p99_uses_slowest_with_few_samples() {
        let mut samples = tenths();
        samples.reverse();
        let percentiles = LatencyPercentiles::from_samples(&samples);
        assert_eq!(percentiles.p50, 0.5);
        assert_eq!(percentiles.p99, 1.0);
    }

    #[test]
    fn p99_uses_formula_with_enough_samples() {
        let samples = (1..=200).map(f64::from).collect::<Vec<_>>();
        let percentiles = LatencyPercentiles::from_samples(&samples);
        // floor(0.99 * 199) = 197
        assert_eq!(percentiles.p99, 198.0);
        assert_eq!(percentiles.p50, 100.0);
    }
}
