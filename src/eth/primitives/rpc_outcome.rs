use std::time::Duration;

use crate::infra::rpc_client::RpcError;
use crate::infra::rpc_client::RpcErrorKind;

/// Result of a single, non-retried proof request.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcOutcome {
    /// HTTP status, if a response was received at all.
    pub http_status: Option<u16>,

    /// Response body as received, if any.
    pub raw_body: Option<String>,

    pub ok: bool,
    pub error_message: Option<String>,
    pub error_kind: Option<RpcErrorKind>,

    /// Wall-clock time of the attempt in seconds.
    pub latency_seconds: f64,
}

impl RpcOutcome {
    pub fn success(http_status: u16, raw_body: String, latency: Duration) -> Self {
        Self {
            http_status: Some(http_status),
            raw_body: Some(raw_body),
            ok: true,
            error_message: None,
            error_kind: None,
            latency_seconds: latency.as_secs_f64(),
        }
    }

    pub fn failure(http_status: Option<u16>, raw_body: Option<String>, error: &RpcError, latency: Duration) -> Self {
        Self {
            http_status,
            raw_body,
            ok: false,
            error_message: Some(error.to_string()),
            error_kind: Some(error.kind()),
            latency_seconds: latency.as_secs_f64(),
        }
    }
}
