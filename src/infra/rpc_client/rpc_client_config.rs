use std::time::Duration;

use clap::Parser;
use display_json::DebugAsJson;

use crate::ext::parse_duration;
use crate::infra::RpcClient;

#[derive(Parser, DebugAsJson, Clone, serde::Serialize)]
pub struct RpcClientConfig {
    /// JSON-RPC endpoint of the node under test.
    #[arg(short = 'r', long = "rpc", env = "RPC_URL")]
    pub rpc_url: String,

    /// Timeout of a single HTTP request.
    #[arg(long = "timeout", value_parser = parse_duration, env = "RPC_TIMEOUT", default_value = "60s")]
    pub rpc_timeout: Duration,
}

impl RpcClientConfig {
    pub fn init(&self) -> anyhow::Result<RpcClient> {
        RpcClient::new(&self.rpc_url, self.rpc_timeout)
    }
}
