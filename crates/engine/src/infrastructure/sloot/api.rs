//! HTTP client for a remote sloot API.
//!
//! `GET {base}/sloot/{address}` answers with one entry per slot:
//!
//! ```json
//! { "weapon": { "name": "Katana", "greatness": 14.0 }, "ring": { ... } }
//! ```
//!
//! Greatness values arrive as floats, strings or out-of-range integers and are
//! coerced to `0..=MAX_GREATNESS` here so nothing downstream sees them raw.

use async_trait::async_trait;
use frame_survivor_domain::{CharacterAttributes, LootItem, LootSlot, WalletAddress, MAX_GREATNESS};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{CharacterProvider, RandomPort, UpstreamError};

const SERVICE: &str = "sloot";

/// Client for the sloot API.
pub struct SlootApiClient {
    client: Client,
    base_url: String,
    random: Arc<dyn RandomPort>,
}

impl SlootApiClient {
    pub fn new(base_url: &str, timeout: Duration, random: Arc<dyn RandomPort>) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            random,
        }
    }
}

#[async_trait]
impl CharacterProvider for SlootApiClient {
    async fn fetch_character(&self, seed: &str) -> Result<CharacterAttributes, UpstreamError> {
        let response = self
            .client
            .get(format!("{}/sloot/{}", self.base_url, seed))
            .send()
            .await
            .map_err(|e| UpstreamError::request_failed(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::rejected(
                SERVICE,
                status.as_u16(),
                format!("{} {}", status.as_u16(), body.trim()),
            ));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::invalid_response(SERVICE, e))?;

        parse_sloot(seed, &payload)
    }

    fn generate_addresses(&self, count: usize) -> Vec<WalletAddress> {
        super::random_addresses(self.random.as_ref(), count)
    }
}

/// Convert a sloot API payload into attributes, ignoring unknown keys.
pub(crate) fn parse_sloot(
    owner: &str,
    payload: &Value,
) -> Result<CharacterAttributes, UpstreamError> {
    let entries = payload
        .as_object()
        .ok_or_else(|| UpstreamError::invalid_response(SERVICE, "expected a JSON object"))?;

    let items: Vec<LootItem> = entries
        .iter()
        .filter_map(|(key, entry)| {
            let slot = LootSlot::parse(key).ok()?;
            let name = entry.get("name").and_then(Value::as_str)?;
            let greatness = entry.get("greatness").map(coerce_greatness).unwrap_or(0);
            Some(LootItem::new(slot, name, greatness))
        })
        .collect();

    if items.is_empty() {
        return Err(UpstreamError::invalid_response(
            SERVICE,
            "payload contains no loot items",
        ));
    }

    Ok(CharacterAttributes::new(owner, items))
}

/// Coerce a JSON number (or numeric string) to a greatness score.
fn coerce_greatness(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(raw) if raw.is_finite() => raw.round().clamp(0.0, f64::from(MAX_GREATNESS)) as u32,
        _ => 0,
    }
}
