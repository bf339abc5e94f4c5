//! Errors produced while fetching explorer data.

use thiserror::Error;

/// An error that can occur while querying the node or the staking API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent, returned a non-2xx status, or the
    /// body did not decode.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The node reported a latest height that is not an unsigned integer.
    #[error("invalid block height {0:?}")]
    InvalidHeight(String),

    /// A single block query failed.
    #[error("block {height}: {source}")]
    Block {
        height: u64,
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// Tags an error with the height of the block it was fetching.
    pub fn at_height(self, height: u64) -> Self {
        match self {
            already @ Self::Block { .. } => already,
            other => Self::Block {
                height,
                source: Box::new(other),
            },
        }
    }
}
