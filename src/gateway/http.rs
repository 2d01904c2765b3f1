//! reqwest transport for the hosted BlockRun API.
//!
//! Payment settlement happens server-side against the wallet credential;
//! a 402 response surfaces as a payment error with funding guidance left
//! to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ChatRequest, ChatResponse, Gateway, ImageRequest, ImageResult, ModelInfo};
use crate::config::Config;
use crate::error::{Error, Result};

/// Per-request timeout. Generation can be slow; connects should not be.
const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// USDC contract on Base.
const USDC_CONTRACT: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
/// Base mainnet JSON-RPC endpoint.
const BASE_RPC_URL: &str = "https://mainnet.base.org";
/// `balanceOf(address)` function selector.
const BALANCE_OF_SELECTOR: &str = "0x70a08231";

/// HTTP implementation of [`Gateway`].
pub struct HttpGateway {
    api_url: String,
    wallet_key: String,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Build a gateway from the resolved configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            wallet_key: config.wallet_key.clone(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let resp = self
            .client
            .post(format!("{}{path}", self.api_url))
            .bearer_auth(&self.wallet_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let detail = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::PAYMENT_REQUIRED => Error::Payment(summarize(&detail)),
            StatusCode::BAD_REQUEST => Error::Api(format!(
                "invalid request, model may not exist or parameters are wrong: {}",
                summarize(&detail)
            )),
            _ => Error::Api(format!("server returned {status}: {}", summarize(&detail))),
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post_json("/v1/chat/completions", request).await
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResult> {
        let resp: ImageApiResponse = self.post_json("/v1/images/generations", request).await?;
        let datum = resp
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api("no image data returned".into()))?;
        Ok(ImageResult {
            url: datum.url,
            cost_usd: resp.cost_usd,
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        fetch_models(&self.client, &self.api_url).await
    }

    async fn wallet_address(&self) -> Result<String> {
        let resp: WalletAddressResponse = {
            let resp = self
                .client
                .get(format!("{}/v1/wallet/address", self.api_url))
                .bearer_auth(&self.wallet_key)
                .send()
                .await?;
            if !resp.status().is_success() {
                return Err(Error::Api(format!(
                    "could not resolve wallet address (status {})",
                    resp.status()
                )));
            }
            resp.json().await?
        };
        Ok(resp.address)
    }
}

/// Fetch the model catalog. Standalone so `--models` works without a
/// configured wallet.
pub async fn fetch_models(client: &reqwest::Client, api_url: &str) -> Result<Vec<ModelInfo>> {
    let resp = client
        .get(format!("{api_url}/v1/models"))
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(Error::Api(format!(
            "could not fetch models (status {})",
            resp.status()
        )));
    }
    let listing: ModelListing = resp.json().await?;
    Ok(listing.data)
}

/// Query the USDC balance of `address` on Base via a raw `eth_call`.
///
/// Returns `None` when the RPC is unreachable or replies with junk; the
/// balance display degrades, nothing else depends on it.
pub async fn usdc_balance(address: &str) -> Option<f64> {
    let call_data = balance_of_call_data(address);
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "method": "eth_call",
        "params": [{"to": USDC_CONTRACT, "data": call_data}, "latest"],
        "id": 1,
    });

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .ok()?;
    let resp = client.post(BASE_RPC_URL).json(&body).send().await.ok()?;
    let value: serde_json::Value = resp.json().await.ok()?;
    let result = value.get("result")?.as_str()?;

    parse_usdc_amount(result)
}

/// ABI-encode `balanceOf(address)`: selector + the address left-padded to
/// 32 bytes.
fn balance_of_call_data(address: &str) -> String {
    let bare = address.trim_start_matches("0x").to_lowercase();
    format!("{BALANCE_OF_SELECTOR}{bare:0>64}")
}

/// Decode an `eth_call` hex result into a USDC amount (6 decimals).
fn parse_usdc_amount(result: &str) -> Option<f64> {
    let hex = result.trim_start_matches("0x");
    if hex.is_empty() {
        return Some(0.0);
    }
    let raw = u128::from_str_radix(hex, 16).ok()?;
    Some(raw as f64 / 1e6)
}

/// First line of an error body, truncated for terminal display.
fn summarize(detail: &str) -> String {
    let line = detail.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        return "no detail provided".to_string();
    }
    let mut out: String = line.chars().take(200).collect();
    if out.len() < line.len() {
        out.push('…');
    }
    out
}

// ── Wire types ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ModelListing {
    #[serde(default)]
    data: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageApiResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
    #[serde(default)]
    cost_usd: f64,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: String,
}

#[derive(Debug, Deserialize)]
struct WalletAddressResponse {
    address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_call_data_is_padded_to_one_word() {
        let data = balance_of_call_data("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
        // 10 chars of selector + 64 chars of padded address.
        assert_eq!(data.len(), 10 + 64);
        assert!(data.starts_with(BALANCE_OF_SELECTOR));
        assert!(data[10..].starts_with("000000000000000000000000833589fc"));
    }

    #[test]
    fn usdc_amount_decodes_six_decimals() {
        // 5_000_000 raw units = 5 USDC.
        assert_eq!(parse_usdc_amount("0x4c4b40"), Some(5.0));
        assert_eq!(parse_usdc_amount("0x0"), Some(0.0));
        assert_eq!(parse_usdc_amount("0x"), Some(0.0));
        assert_eq!(parse_usdc_amount("0xnotahexvalue"), None);
    }

    #[test]
    fn error_bodies_are_summarized() {
        assert_eq!(summarize(""), "no detail provided");
        assert_eq!(summarize("bad model\nstack trace"), "bad model");
        let long = "x".repeat(500);
        assert!(summarize(&long).chars().count() <= 201);
    }
}
