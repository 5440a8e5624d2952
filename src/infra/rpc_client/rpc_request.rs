use display_json::DebugAsJson;

use crate::alias::JsonValue;
use crate::ext::to_json_string;

/// JSON-RPC 2.0 request envelope.
#[derive(DebugAsJson, Clone, PartialEq, serde::Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Vec<JsonValue>,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<JsonValue>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }

    /// Request body exactly as sent over the wire.
    pub fn to_compact_json(&self) -> String {
        to_json_string(self)
    }
}
