//! Model catalog listing. Works without a configured wallet.

use std::time::Duration;

use crate::error::Result;
use crate::gateway::http;
use crate::output;

/// Fetch and print the hosted model catalog.
pub async fn run(api_url: &str) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    let models = http::fetch_models(&client, api_url).await?;
    if models.is_empty() {
        output::info("No models returned. Check API connection.");
        return Ok(());
    }

    output::models_table(&models);
    Ok(())
}
