//! Defines the trait the fetcher queries and its HTTP implementation.

use crate::config::Endpoints;
use crate::error::FetchError;
use crate::node_rpc::NodeRpcClient;
use crate::node_rpc::RawBlock;
use crate::staking::StakingClient;
use crate::staking::StakingStats;

/// A trait for anything that can answer the three queries of a refresh cycle.
#[allow(async_fn_in_trait)]
pub trait ChainSource {
    /// Fetches the latest block height.
    async fn latest_height(&self) -> Result<u64, FetchError>;

    /// Fetches the staking summary.
    async fn staking_stats(&self) -> Result<StakingStats, FetchError>;

    /// Fetches a single block by height.
    async fn block(&self, height: u64) -> Result<RawBlock, FetchError>;
}

/// Queries the node RPC and the staking API over HTTP.
///
/// Both clients share one connection pool. Timeouts are the `reqwest`
/// defaults.
#[derive(Clone, Debug)]
pub struct HttpSource {
    node: NodeRpcClient,
    staking: StakingClient,
}

impl HttpSource {
    pub fn new(endpoints: &Endpoints) -> Self {
        let client = reqwest::Client::new();
        Self {
            node: NodeRpcClient::new(client.clone(), endpoints.rpc_url()),
            staking: StakingClient::new(client, endpoints.staking_url()),
        }
    }
}

impl ChainSource for HttpSource {
    async fn latest_height(&self) -> Result<u64, FetchError> {
        self.node.latest_height().await
    }

    async fn staking_stats(&self) -> Result<StakingStats, FetchError> {
        self.staking.stats().await
    }

    async fn block(&self, height: u64) -> Result<RawBlock, FetchError> {
        self.node
            .block(height)
            .await
            .map_err(|e| e.at_height(height))
    }
}
