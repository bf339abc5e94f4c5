//! Collects the raw data for one refresh cycle.

use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::warn;

use crate::error::FetchError;
use crate::node_rpc::RawBlock;
use crate::source::ChainSource;
use crate::staking::StakingStats;

/// Number of blocks requested per cycle, ending at the current height.
pub const BLOCK_WINDOW: u64 = 10;

/// Everything one cycle fetched, before any display formatting.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RawSnapshot {
    /// The height reported by the status query of this cycle.
    pub height: u64,
    pub staking: StakingStats,
    /// Successfully fetched blocks, highest first. Failed heights are absent.
    pub blocks: Vec<RawBlock>,
}

/// Fetches a snapshot from `source`.
///
/// A failed status or staking query fails the whole snapshot. A failed
/// block query is logged and that height is left out; the remaining blocks
/// keep their descending order, so gaps stay visible.
pub async fn fetch_snapshot<S: ChainSource>(source: &S) -> Result<RawSnapshot, FetchError> {
    let height = source.latest_height().await?;
    let staking = source.staking_stats().await?;

    let mut blocks = Vec::with_capacity(BLOCK_WINDOW as usize);
    for block_height in block_heights(height) {
        match source.block(block_height).await {
            Ok(block) => blocks.push(block),
            Err(e) => warn!("Error fetching block {}: {}", block_height, e),
        }
    }
    debug!("fetched {}/{} blocks ending at {}", blocks.len(), BLOCK_WINDOW, height);

    Ok(RawSnapshot {
        height,
        staking,
        blocks,
    })
}

/// The heights queried for a chain whose tip is `tip`, highest first.
/// Never goes below height 1.
pub fn block_heights(tip: u64) -> impl Iterator<Item = u64> {
    (0..BLOCK_WINDOW)
        .filter_map(move |i| tip.checked_sub(i))
        .filter(|h| *h >= 1)
}
