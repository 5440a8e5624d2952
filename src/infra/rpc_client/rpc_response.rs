use crate::alias::JsonValue;
use crate::ext::not;
use crate::infra::rpc_client::RpcError;

/// HTTP response to a JSON-RPC request, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Extracts the JSON-RPC `result` member.
    ///
    /// Checks are applied in order: HTTP status, body decoding, `error` member, `result` member.
    pub fn into_result(self) -> Result<JsonValue, RpcError> {
        if not(self.is_http_success()) {
            return Err(RpcError::HttpStatus { status: self.status });
        }

        let mut body: JsonValue = serde_json::from_str(&self.body).map_err(|e| RpcError::InvalidBody(e.to_string()))?;
        let Some(body) = body.as_object_mut() else {
            return Err(RpcError::InvalidBody("response is not a JSON object".to_owned()));
        };

        if let Some(error) = body.get("error") {
            return Err(RpcError::from_error_member(error));
        }

        match body.remove("result") {
            Some(result) => Ok(result),
            None => Err(RpcError::Shape("Missing result in response.".to_owned())),
        }
    }
}
