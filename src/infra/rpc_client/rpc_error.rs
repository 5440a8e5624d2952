use crate::alias::JsonValue;

/// Failure of a single JSON-RPC attempt.
#[derive(Debug, Clone, thiserror::Error, strum::IntoStaticStr)]
pub enum RpcError {
    /// Connection refused, DNS failure, timeout or similar.
    #[error("{0}")]
    Transport(String),

    /// Response received with a non-success HTTP status.
    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    /// Response body is not a JSON-RPC response.
    #[error("Invalid JSON-RPC response: {0}")]
    InvalidBody(String),

    /// JSON-RPC `error` member present in the response.
    #[error("RPC error {code}: {message}")]
    Protocol { code: JsonValue, message: String },

    /// Response does not carry the expected fields.
    #[error("{0}")]
    Shape(String),
}

impl RpcError {
    /// Coarse classification used in logs and failure reports.
    pub fn kind(&self) -> RpcErrorKind {
        match self {
            Self::Transport(_) | Self::HttpStatus { .. } | Self::InvalidBody(_) => RpcErrorKind::Transport,
            Self::Protocol { .. } => RpcErrorKind::Protocol,
            Self::Shape(_) => RpcErrorKind::Shape,
        }
    }

    /// Builds a protocol error from the JSON-RPC `error` member, tolerating non-standard shapes.
    pub fn from_error_member(error: &JsonValue) -> Self {
        let code = error.get("code").cloned().unwrap_or(JsonValue::Null);
        let message = match error.get("message").and_then(JsonValue::as_str) {
            Some(message) => message.to_owned(),
            None => error.to_string(),
        };
        Self::Protocol { code, message }
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Transport(format!("request timed out: {}", value))
        } else {
            Self::Transport(value.to_string())
        }
    }
}

#[derive(Debug, strum::Display, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorKind {
    #[strum(to_string = "transport")]
    Transport,

    #[strum(to_string = "protocol")]
    Protocol,

    #[strum(to_string = "shape")]
    Shape,
}

/// A call that kept failing until the retry budget was exhausted.
#[derive(Debug, thiserror::Error)]
#[error("RPC call failed for {method} after {attempts} attempts: {last_error}")]
pub struct RpcFailure {
    pub method: String,
    pub attempts: u32,
    #[source]
    pub last_error: RpcError,
}
