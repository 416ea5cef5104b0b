//! Shared gateway state: config, RPC client, plain HTTP client.

use enroll_core::rpc::RpcClient;

use crate::config::GatewayConfig;

pub struct GatewayState {
    pub config: GatewayConfig,
    pub rpc: RpcClient,
    pub http: reqwest::Client,
}

impl GatewayState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            rpc: RpcClient::new(),
            http: reqwest::Client::new(),
        }
    }
}
