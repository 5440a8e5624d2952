#![allow(dead_code)]

use std::time::Duration;

use eth_proof_bench::alias::JsonValue;
use eth_proof_bench::infra::RpcClient;
use httpmock::MockServer;
use serde_json::json;

pub const CONTRACT: &str = "0x00000000000000000000000000000000000000aa";
pub const SENDER: &str = "0x00000000000000000000000000000000000000bb";
pub const BLOCK_HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

/// Client pointed at the mock server, without retries unless overridden.
pub fn client(server: &MockServer) -> RpcClient {
    RpcClient::new(&server.base_url(), Duration::from_secs(5)).unwrap().with_retries(0, Duration::ZERO)
}

/// Successful JSON-RPC response body.
pub fn rpc_result(result: JsonValue) -> JsonValue {
    json!({ "jsonrpc": "2.0", "id": 1, "result": result })
}

/// JSON-RPC error response body.
pub fn rpc_error(code: i64, message: &str) -> JsonValue {
    json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": code, "message": message } })
}

/// Partial request body matching a JSON-RPC method.
pub fn method(name: &str) -> String {
    json!({ "method": name }).to_string()
}

/// Partial request body matching a JSON-RPC method and its exact params.
pub fn method_with_params(name: &str, params: JsonValue) -> String {
    json!({ "method": name, "params": params }).to_string()
}

/// `debug_storageRangeAt` result with the given hashed keys.
pub fn storage_range(keys: &[&str]) -> JsonValue {
    let storage = keys
        .iter()
        .map(|key| (key.to_string(), json!({ "key": null, "value": "0x01" })))
        .collect::<serde_json::Map<_, _>>();
    json!({ "storage": storage, "nextKey": null })
}

/// 32-byte key ending with `suffix`.
pub fn key(suffix: u8) -> String {
    format!("0x{:064x}", suffix)
}
