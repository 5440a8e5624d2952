//! Shared infrastructure.

pub mod build_info;
pub mod rpc_client;
pub mod tracing;

pub use rpc_client::RpcClient;
