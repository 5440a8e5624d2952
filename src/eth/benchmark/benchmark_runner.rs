use std::time::Instant;

use serde_json::json;

use crate::eth::benchmark::BenchmarkMode;
use crate::eth::benchmark::BenchmarkSummary;
use crate::eth::benchmark::FailureRecord;
use crate::eth::benchmark::FailureRecorder;
use crate::eth::benchmark::build_curl;
use crate::eth::primitives::ResolvedTestCase;
use crate::eth::primitives::RpcOutcome;
use crate::ext::DisplayExt;
use crate::infra::RpcClient;
use crate::infra::rpc_client::JsonRpcRequest;
use crate::infra::rpc_client::RawResponse;
use crate::infra::rpc_client::RpcError;

const MISSING_PROOF_FIELDS: &str = "Missing expected fields in result.";

/// Measures `eth_getProof` latency and failure rate, one request at a time.
///
/// Requests are never retried: every attempt is one sample.
pub struct BenchmarkRunner {
    chain: RpcClient,
}

impl BenchmarkRunner {
    pub fn new(chain: RpcClient) -> Self {
        Self { chain }
    }

    /// Requests a proof for every row, in order, and aggregates the results.
    pub async fn run(&self, mode: BenchmarkMode, rows: &[ResolvedTestCase], recorder: &mut FailureRecorder) -> BenchmarkSummary {
        let total = rows.len();
        tracing::info!(%mode, %total, endpoint = %self.chain.url, "starting benchmark");

        let mut latencies = Vec::with_capacity(total);
        let mut successes = 0;
        let mut failures = 0;

        for (index, row) in rows.iter().enumerate().map(|(i, row)| (i + 1, row)) {
            let request = self.proof_request(mode, row);
            let outcome = self.execute(&request).await;
            latencies.push(outcome.latency_seconds);

            let progress = format!("{}/{}", index, total);
            let slot = row.storage_slot.clone().to_string_ext();
            if outcome.ok {
                successes += 1;
                tracing::info!(%mode, %progress, block = %row.effective_block, address = %row.address, %slot, latency = %outcome.latency_seconds, "proof succeeded");
            } else {
                failures += 1;
                tracing::warn!(
                    %mode,
                    %progress,
                    block = %row.effective_block,
                    address = %row.address,
                    %slot,
                    kind = ?outcome.error_kind,
                    error = %outcome.error_message.clone().to_string_ext(),
                    "proof failed"
                );
                recorder.record(FailureRecord::new(mode, index, total, row, &outcome, build_curl(&self.chain.url, &request)));
            }
        }

        let summary = BenchmarkSummary::new(mode, self.chain.url.as_str(), &latencies, successes, failures);
        tracing::info!(?summary, "benchmark finished");
        summary
    }

    /// `eth_getProof` request for the row, targeting the block selected by the mode.
    pub fn proof_request(&self, mode: BenchmarkMode, row: &ResolvedTestCase) -> JsonRpcRequest {
        let params = vec![json!(row.address), json!(row.storage_keys()), json!(mode.block_tag(row))];
        self.chain.next_request("eth_getProof", params)
    }

    /// Sends the request once and classifies the response. Latency covers the whole attempt, successful or not.
    pub async fn execute(&self, request: &JsonRpcRequest) -> RpcOutcome {
        let start = Instant::now();
        let response = self.chain.send(request).await;
        let latency = start.elapsed();

        match response {
            Ok(response) => match check_proof_response(&response) {
                Ok(()) => RpcOutcome::success(response.status, response.body, latency),
                Err(e) => RpcOutcome::failure(Some(response.status), Some(response.body), &e, latency),
            },
            Err(e) => RpcOutcome::failure(None, None, &e, latency),
        }
    }
}

/// Checks that a response carries a proof: no `error` member and a `result` object with `accountProof` and `storageProof`.
pub fn check_proof_response(response: &RawResponse) -> Result<(), RpcError> {
    let result = match response.clone().into_result() {
        Ok(result) => result,
        Err(RpcError::Shape(_)) => return Err(RpcError::Shape(MISSING_PROOF_FIELDS.to_owned())),
        Err(e) => return Err(e),
    };

    let is_proof = result
        .as_object()
        .is_some_and(|result| result.contains_key("accountProof") && result.contains_key("storageProof"));
    if is_proof {
        Ok(())
    } else {
        Err(RpcError::Shape(MISSING_PROOF_FIELDS.to_owned()))
    }
}
