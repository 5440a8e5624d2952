use std::fmt::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use display_json::DebugAsJson;

use crate::eth::benchmark::BenchmarkMode;
use crate::eth::primitives::BlockNumber;
use crate::eth::primitives::ResolvedTestCase;
use crate::eth::primitives::RpcOutcome;
use crate::ext::DisplayExt;
use crate::infra::rpc_client::JsonRpcRequest;

/// Reproducible description of a failed proof request.
#[derive(DebugAsJson, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FailureRecord {
    pub mode: BenchmarkMode,

    /// 1-based position of the row in the pass.
    pub index: usize,
    pub total: usize,

    pub effective_block: BlockNumber,
    pub original_block: Option<BlockNumber>,
    pub address: String,
    pub storage_slot: Option<String>,

    pub http_status: Option<u16>,
    pub error_message: Option<String>,

    /// Shell command that replays the exact request.
    pub repro_command: String,
    pub raw_body: Option<String>,
}

impl FailureRecord {
    pub fn new(mode: BenchmarkMode, index: usize, total: usize, row: &ResolvedTestCase, outcome: &RpcOutcome, repro_command: String) -> Self {
        Self {
            mode,
            index,
            total,
            effective_block: row.effective_block,
            original_block: row.original_block,
            address: row.address.clone(),
            storage_slot: row.storage_slot.clone(),
            http_status: outcome.http_status,
            error_message: outcome.error_message.clone(),
            repro_command,
            raw_body: outcome.raw_body.clone(),
        }
    }

    /// Formats the record as a block of the failure log.
    pub fn to_artifact(&self) -> String {
        let mut out = String::new();
        // writing to a String never fails
        let _ = self.write_artifact(&mut out);
        out
    }

    fn write_artifact(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "# ---- FAILURE -----------------------------------------")?;
        writeln!(
            out,
            "# [{}] #{}/{} block={} original_block={} addr={} slot={}",
            self.mode,
            self.index,
            self.total,
            self.effective_block,
            self.original_block.map(|b| b.to_string()).to_string_ext(),
            self.address,
            self.storage_slot.clone().to_string_ext()
        )?;
        if let Some(status) = self.http_status {
            writeln!(out, "# HTTP {}", status)?;
        }
        if let Some(message) = self.error_message.as_deref().filter(|m| !m.is_empty()) {
            writeln!(out, "# Error: {}", message)?;
        }
        writeln!(out, "{}", self.repro_command)?;
        if let Some(body) = self.raw_body.as_deref().filter(|b| !b.is_empty()) {
            writeln!(out, "# Response:")?;
            writeln!(out, "{}", body)?;
        }
        writeln!(out)
    }
}

/// Collects failure records of a process run and persists them on demand.
#[derive(Debug)]
pub struct FailureRecorder {
    path: PathBuf,
    records: Vec<FailureRecord>,
}

impl FailureRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&mut self, record: FailureRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FailureRecord] {
        &self.records
    }

    /// Writes all records to the output path, replacing its contents.
    ///
    /// Nothing is written when no failure was recorded. Returns whether the file was written.
    pub fn flush(&self) -> anyhow::Result<bool> {
        if self.records.is_empty() {
            tracing::info!("no failures recorded");
            return Ok(false);
        }

        let contents = self.records.iter().map(FailureRecord::to_artifact).collect::<String>();
        std::fs::write(&self.path, contents).with_context(|| format!("failed to write failure log to {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), failures = %self.records.len(), "logged failures");
        Ok(true)
    }
}

/// `curl` command that replays `request` against `url`.
pub fn build_curl(url: &str, request: &JsonRpcRequest) -> String {
    format!(
        "curl -s -X POST '{}' -H 'Content-Type: application/json' -d '{}'",
        url,
        request.to_compact_json()
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::infra::rpc_client::RpcError;

    fn record(outcome: &RpcOutcome) -> FailureRecord {
        let row = ResolvedTestCase {
            effective_block: BlockNumber::from(100u64),
            original_block: None,
            address: "0xaa".to_owned(),
            storage_slot: Some("0x01".to_owned()),
        };
        let request = JsonRpcRequest::new(3, "eth_getProof", vec![json!("0xaa"), json!(["0x01"]), json!("0x64")]);
        FailureRecord::new(BenchmarkMode::RealBlocks, 2, 5, &row, outcome, build_curl("http://node:8545", &request))
    }

    #[test]
    fn curl_reproduces_request() {
        let request = JsonRpcRequest::new(1, "eth_getProof", vec![json!("0xaa"), json!([]), json!("latest")]);
        assert_eq!(
            build_curl("http://node:8545", &request),
            r#"curl -s -X POST 'http://node:8545' -H 'Content-Type: application/json' -d '{"jsonrpc":"2.0","id":1,"method":"eth_getProof","params":["0xaa",[],"latest"]}'"#
        );
    }

    #[test]
    fn artifact_with_response() {
        let error = RpcError::Protocol {
            code: json!(-32000),
            message: "header not found".to_owned(),
        };
        let body = r#"{"jsonrpc":"2.0","id":3,"error":{"code":-32000,"message":"header not found"}}"#;
        let outcome = RpcOutcome::failure(Some(200), Some(body.to_owned()), &error, Duration::from_millis(5));

        let artifact = record(&outcome).to_artifact();
        let lines = artifact.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "# ---- FAILURE -----------------------------------------");
        assert_eq!(lines[1], "# [REAL-BLOCKS] #2/5 block=100 original_block=null addr=0xaa slot=0x01");
        assert_eq!(lines[2], "# HTTP 200");
        assert_eq!(lines[3], "# Error: RPC error -32000: header not found");
        assert!(lines[4].starts_with("curl -s -X POST 'http://node:8545'"));
        assert!(lines[4].contains(r#""id":3"#));
        assert_eq!(lines[5], "# Response:");
        assert_eq!(lines[6], body);
        assert_eq!(lines[7], "");
    }

    #[test]
    fn artifact_without_response() {
        let error = RpcError::Transport("connection refused".to_owned());
        let outcome = RpcOutcome::failure(None, None, &error, Duration::ZERO);

        let artifact = record(&outcome).to_artifact();
        assert!(!artifact.contains("# HTTP"));
        assert!(!artifact.contains("# Response:"));
        assert!(artifact.contains("# Error: connection refused"));
    }

    #[test]
    fn flush_writes_only_with_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failures.txt");

        let mut recorder = FailureRecorder::new(&path);
        assert!(!recorder.flush().unwrap());
        assert!(!path.exists());

        let outcome = RpcOutcome::failure(Some(503), None, &RpcError::HttpStatus { status: 503 }, Duration::ZERO);
        recorder.record(record(&outcome));
        recorder.record(record(&outcome));
        assert!(recorder.flush().unwrap());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("# ---- FAILURE").count(), 2);
        assert!(contents.contains("# Error: HTTP status 503"));
    }
}
