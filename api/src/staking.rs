//! Client for the staking-metrics API.

use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

use crate::error::FetchError;

/// The summary returned by `/v1/stats`.
///
/// Every field is optional; the API omits counters it has not computed yet.
/// Values that are present but not a non-negative integer (null, a negative
/// number, garbage) are treated as absent.
#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StakingStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub active_delegations: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_stakers: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub finality_providers: Option<u64>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        // `12.0` is a count, `12.7` is not
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

#[derive(Clone, Debug)]
pub struct StakingClient {
    client: reqwest::Client,
    base_url: String,
}

impl StakingClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn stats(&self) -> Result<StakingStats, FetchError> {
        let stats = self
            .client
            .get(format!("{}/v1/stats", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<StakingStats>()
            .await?;
        Ok(stats)
    }
}
