//! Client for the node's CometBFT-style HTTP RPC.
//!
//! Only the two queries the dashboard needs are modeled: `/status` for the
//! latest height and `/block?height=N` for individual blocks. Every other
//! field in the responses is ignored.

use serde::Deserialize;

use crate::error::FetchError;

/// The structure of the JSON response from `/status`.
#[derive(Deserialize, Debug)]
struct StatusResponse {
    result: StatusResult,
}

#[derive(Deserialize, Debug)]
struct StatusResult {
    sync_info: SyncInfo,
}

#[derive(Deserialize, Debug)]
struct SyncInfo {
    latest_block_height: String,
}

/// The structure of the JSON response from `/block`.
#[derive(Deserialize, Debug)]
struct BlockResponse {
    result: BlockResult,
}

#[derive(Deserialize, Debug)]
struct BlockResult {
    block: BlockBody,
}

#[derive(Deserialize, Debug)]
struct BlockBody {
    header: BlockHeader,
    #[serde(default)]
    data: BlockData,
}

#[derive(Deserialize, Debug)]
struct BlockHeader {
    time: String,
    proposer_address: String,
}

#[derive(Deserialize, Debug, Default)]
struct BlockData {
    // null and absent both mean "no transactions"
    #[serde(default)]
    txs: Option<Vec<serde_json::Value>>,
}

/// A block as the dashboard needs it, before any display formatting.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RawBlock {
    /// The height that was requested.
    pub height: u64,
    /// Header timestamp, RFC 3339 as sent by the node.
    pub time: String,
    pub proposer_address: String,
    pub tx_count: usize,
}

/// A thin wrapper around a `reqwest::Client` bound to one node RPC base URL.
#[derive(Clone, Debug)]
pub struct NodeRpcClient {
    client: reqwest::Client,
    base_url: String,
}

impl NodeRpcClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Returns the node's latest block height.
    pub async fn latest_height(&self) -> Result<u64, FetchError> {
        let resp = self
            .client
            .get(format!("{}/status", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<StatusResponse>()
            .await?;

        parse_height(&resp.result.sync_info.latest_block_height)
    }

    /// Returns the block at `height`.
    pub async fn block(&self, height: u64) -> Result<RawBlock, FetchError> {
        let resp = self
            .client
            .get(format!("{}/block", self.base_url))
            .query(&[("height", height)])
            .send()
            .await?
            .error_for_status()?
            .json::<BlockResponse>()
            .await?;

        let block = resp.result.block;
        Ok(RawBlock {
            height,
            time: block.header.time,
            proposer_address: block.header.proposer_address,
            tx_count: block.data.txs.map_or(0, |txs| txs.len()),
        })
    }
}

fn parse_height(s: &str) -> Result<u64, FetchError> {
    s.trim()
        .parse()
        .map_err(|_| FetchError::InvalidHeight(s.to_string()))
}
