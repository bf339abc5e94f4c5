//! Endpoint configuration for the explorer.

use std::env;

/// Node RPC base URL.
pub const BABYLON_RPC: &str = "BABYLON_RPC";
/// Alternate (REST) API base URL.
pub const BABYLON_API: &str = "BABYLON_API";
/// Staking-metrics API base URL.
pub const STAKING_API: &str = "STAKING_API";

const DEFAULT_RPC_URL: &str = "http://localhost:26657";
const DEFAULT_API_URL: &str = "http://localhost:1317";
const DEFAULT_STAKING_URL: &str = "http://localhost:8080";

/// The base URLs of the services the dashboard polls.
///
/// Read once when the view starts. Trailing slashes are stripped so that
/// paths can be appended with a plain `format!`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Endpoints {
    rpc_url: String,
    api_url: String,
    staking_url: String,
}

impl Endpoints {
    pub fn new(
        rpc_url: impl Into<String>,
        api_url: impl Into<String>,
        staking_url: impl Into<String>,
    ) -> Self {
        Self {
            rpc_url: normalize(rpc_url.into()),
            api_url: normalize(api_url.into()),
            staking_url: normalize(staking_url.into()),
        }
    }

    /// Creates an `Endpoints` instance from environment variables,
    /// with localhost defaults.
    ///
    /// # Environment Variables
    /// - `BABYLON_RPC`: node RPC, default `http://localhost:26657`
    /// - `BABYLON_API`: alternate API, default `http://localhost:1317`
    /// - `STAKING_API`: staking metrics, default `http://localhost:8080`
    ///
    /// The runtime environment wins. On wasm there is none, so the values
    /// baked in at compile time are used instead.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| {
            env::var(key).ok().or_else(|| compiled_in(key).map(str::to_string))
        })
    }

    /// Builds the endpoints from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self::new(
            get(BABYLON_RPC, DEFAULT_RPC_URL),
            get(BABYLON_API, DEFAULT_API_URL),
            get(STAKING_API, DEFAULT_STAKING_URL),
        )
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Not used by the refresh cycle; carried for parity with the other
    /// explorer deployments that configure it.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn staking_url(&self) -> &str {
        &self.staking_url
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_env()
    }
}

fn compiled_in(key: &str) -> Option<&'static str> {
    match key {
        BABYLON_RPC => option_env!("BABYLON_RPC"),
        BABYLON_API => option_env!("BABYLON_API"),
        STAKING_API => option_env!("STAKING_API"),
        _ => None,
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
