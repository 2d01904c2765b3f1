//! Hosted-model gateway boundary.
//!
//! Wallet custody, request signing, and payment settlement all live behind
//! the hosted endpoint; this crate only shapes requests and reads results.
//! [`Gateway`] is the seam the command layer calls through, and
//! [`HttpGateway`] is the shipped transport. Tests substitute a mock.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpGateway;

use crate::error::Result;

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model id, e.g. `openai/gpt-4o`.
    pub model: String,
    /// User prompt.
    pub prompt: String,
    /// Optional system prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Generation cap.
    pub max_tokens: u32,
    /// Sampling temperature, when the user set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Enable the provider's live-search capability. Set for real-time
    /// prompts on models that support it.
    pub live_search: bool,
}

/// Chat completion result.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Generated text.
    pub text: String,
    /// Server-reported cost of this call in USD. This is the figure the
    /// caller reports to the spending ledger.
    #[serde(default)]
    pub cost_usd: f64,
}

/// Image generation request.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    /// Image model id, e.g. `google/nano-banana`.
    pub model: String,
    /// Image description.
    pub prompt: String,
    /// Size string, e.g. `1024x1024`.
    pub size: String,
}

/// Image generation result.
#[derive(Debug, Clone)]
pub struct ImageResult {
    /// URL of the generated image.
    pub url: String,
    /// Server-reported cost of this call in USD.
    pub cost_usd: f64,
}

/// One entry from the hosted model catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    /// Model id, e.g. `anthropic/claude-sonnet-4`.
    pub id: String,
    /// Display name, when the API reports one.
    #[serde(default)]
    pub name: Option<String>,
    /// USD per 1M input tokens, when the API reports pricing.
    #[serde(default)]
    pub input_price: Option<f64>,
    /// USD per 1M output tokens, when the API reports pricing.
    #[serde(default)]
    pub output_price: Option<f64>,
}

/// The opaque collaborator performing paid model calls.
///
/// Implementations own transport and payment mechanics end to end. The
/// command layer only routes, budget-checks, calls, and records.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Execute a paid chat completion.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Execute a paid image generation.
    async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResult>;

    /// Fetch the hosted model catalog. Requires no wallet.
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;

    /// The wallet address paying for calls through this gateway.
    async fn wallet_address(&self) -> Result<String>;
}
