use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use alloy_primitives::U64;
use serde_json::json;

use crate::alias::JsonValue;
use crate::eth::primitives::BlockNumber;
use crate::eth::primitives::BlockTag;
use crate::ext::DisplayExt;
use crate::ext::not;
use crate::infra::rpc_client::JsonRpcRequest;
use crate::infra::rpc_client::RawResponse;
use crate::infra::rpc_client::RpcError;
use crate::infra::rpc_client::RpcFailure;
use crate::log_and_err;

/// Default timeout for a single HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of retries after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// JSON-RPC client over HTTP.
///
/// [`RpcClient::call`] retries failed attempts with exponential backoff. [`RpcClient::send`] performs exactly one
/// attempt and hands back the raw HTTP response, which is what latency measurements need.
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    pub url: String,
    max_retries: u32,
    backoff_base: Duration,

    /// Last request id handed out. Ids start at 1 and are scoped to this instance.
    last_id: AtomicU64,
}

impl RpcClient {
    /// Creates a new client with default retry settings and no backoff.
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        tracing::info!(%url, timeout = %timeout.to_string_ext(), "creating rpc client");

        let http = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(http) => http,
            Err(e) => return log_and_err!(reason = e, "failed to create rpc http client"),
        };

        Ok(Self {
            http,
            url: url.to_owned(),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: Duration::ZERO,
            last_id: AtomicU64::new(0),
        })
    }

    /// Overrides the retry budget and the backoff base used by [`RpcClient::call`].
    pub fn with_retries(mut self, max_retries: u32, backoff_base: Duration) -> Self {
        self.max_retries = max_retries;
        self.backoff_base = backoff_base;
        self
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    /// Builds a request with the next id of this client.
    pub fn next_request(&self, method: &str, params: Vec<JsonValue>) -> JsonRpcRequest {
        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        JsonRpcRequest::new(id, method, params)
    }

    /// Sends a request exactly once.
    ///
    /// Any HTTP response is returned as-is, including non-success statuses. Only failures to obtain a response at all
    /// are returned as errors.
    pub async fn send(&self, request: &JsonRpcRequest) -> Result<RawResponse, RpcError> {
        tracing::debug!(id = %request.id, method = %request.method, "sending rpc request");

        let response = self.http.post(&self.url).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::trace!(id = %request.id, %status, %body, "received rpc response");
        Ok(RawResponse::new(status, body))
    }

    /// Executes a JSON-RPC call, retrying transport and protocol failures until the retry budget is exhausted.
    ///
    /// All attempts of the same call share one request id.
    pub async fn call(&self, method: &str, params: Vec<JsonValue>) -> Result<JsonValue, RpcFailure> {
        let request = self.next_request(method, params);

        let mut retry = 0;
        loop {
            let result = match self.send(&request).await {
                Ok(response) => response.into_result(),
                Err(e) => Err(e),
            };

            let error = match result {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if retry >= self.max_retries {
                tracing::warn!(reason = ?error, %method, attempts = %(retry + 1), "rpc call failed after exhausting retries");
                return Err(RpcFailure {
                    method: method.to_owned(),
                    attempts: retry + 1,
                    last_error: error,
                });
            }

            let delay = backoff_delay(self.backoff_base, retry);
            tracing::debug!(reason = ?error, %method, %retry, delay = %delay.to_string_ext(), "rpc call failed, retrying");
            if not(delay.is_zero()) {
                tokio::time::sleep(delay).await;
            }
            retry += 1;
        }
    }

    // -------------------------------------------------------------------------
    // RPC queries
    // -------------------------------------------------------------------------

    /// Retrieves the current block number.
    pub async fn fetch_block_number(&self) -> anyhow::Result<BlockNumber> {
        tracing::debug!("retrieving current block number");

        let result = match self.call("eth_blockNumber", vec![]).await {
            Ok(result) => result,
            Err(e) => return log_and_err!(reason = e, "failed to retrieve current block number"),
        };
        match serde_json::from_value::<BlockNumber>(result.clone()) {
            Ok(number) => Ok(number),
            Err(e) => log_and_err!(reason = e, payload = result, "failed to parse current block number"),
        }
    }

    /// Retrieves a block with full transaction objects.
    ///
    /// Returns `None` when the node has no data for the block.
    pub async fn fetch_block_with_transactions(&self, number: BlockNumber) -> anyhow::Result<Option<JsonValue>> {
        tracing::debug!(%number, "retrieving block");

        let params = vec![json!(number.to_hex()), JsonValue::Bool(true)];
        match self.call("eth_getBlockByNumber", params).await {
            Ok(JsonValue::Null) => Ok(None),
            Ok(block) => Ok(Some(block)),
            Err(e) => Err(anyhow::Error::new(e).context(format!("failed to retrieve block {}", number))),
        }
    }

    /// Retrieves the transaction count (nonce) of an account at some block.
    pub async fn fetch_transaction_count(&self, address: &str, tag: BlockTag) -> anyhow::Result<u64> {
        tracing::debug!(%address, %tag, "retrieving transaction count");

        let result = self.call("eth_getTransactionCount", vec![json!(address), json!(tag)]).await?;
        match serde_json::from_value::<U64>(result.clone()) {
            Ok(count) => Ok(count.to::<u64>()),
            Err(e) => Err(anyhow::Error::new(e).context(format!("invalid transaction count: {}", result))),
        }
    }

    /// Retrieves storage entries of an account as seen by a transaction, starting at `start_key`.
    pub async fn fetch_storage_range_at(&self, block_hash: &str, tx_index: u64, address: &str, start_key: &str, max_results: u64) -> anyhow::Result<JsonValue> {
        tracing::debug!(%block_hash, %tx_index, %address, "retrieving storage range");

        let params = vec![json!(block_hash), json!(tx_index), json!(address), json!(start_key), json!(max_results)];
        Ok(self.call("debug_storageRangeAt", params).await?)
    }
}

/// Delay before retry `retry` (0-indexed): `base * 2^retry`.
pub fn backoff_delay(base: Duration, retry: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(retry))
}
