#[allow(clippy::module_inception)]
mod rpc_client;
mod rpc_client_config;
mod rpc_error;
mod rpc_request;
mod rpc_response;

pub use rpc_client::DEFAULT_MAX_RETRIES;
pub use rpc_client::DEFAULT_TIMEOUT;
pub use rpc_client::RpcClient;
pub use rpc_client::backoff_delay;
pub use rpc_client_config::RpcClientConfig;
pub use rpc_error::RpcError;
pub use rpc_error::RpcErrorKind;
pub use rpc_error::RpcFailure;
pub use rpc_request::JsonRpcRequest;
pub use rpc_response::RawResponse;
