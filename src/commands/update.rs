//! Update check against the published plugin manifest.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::output;

/// Current CLI version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Published manifest holding the latest release version.
const MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/BlockRunAI/blockrun-claude-code-wallet/main/plugin.json";

#[derive(Debug, Deserialize)]
struct Manifest {
    version: String,
}

/// Compare the local version against the published manifest.
pub async fn run() -> Result<()> {
    output::info(&format!("BlockRun CLI v{VERSION}, checking for updates…"));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent("BlockRun-CLI")
        .build()?;
    let resp = client.get(MANIFEST_URL).send().await?;

    if resp.status() == StatusCode::NOT_FOUND {
        // Manifest not published (private repo); nothing to compare.
        output::info(&format!("Current version: v{VERSION}"));
        return Ok(());
    }
    if !resp.status().is_success() {
        return Err(Error::Api(format!(
            "could not check for updates: HTTP {}",
            resp.status()
        )));
    }

    let manifest: Manifest = resp.json().await?;
    if is_newer(&manifest.version, VERSION) {
        output::info(&format!(
            "Update available: v{VERSION} → v{}",
            manifest.version
        ));
        println!();
        println!("  To update, run:");
        println!("    cargo install blockrun");
    } else {
        output::success(&format!("You're up to date! (v{VERSION})"));
    }
    Ok(())
}

/// Dotted-numeric comparison; non-numeric fragments count as zero.
fn is_newer(remote: &str, local: &str) -> bool {
    version_key(remote) > version_key(local)
}

fn version_key(version: &str) -> Vec<u64> {
    version
        .trim_start_matches('v')
        .split('.')
        .map(|part| {
            part.chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
                .parse()
                .unwrap_or(0)
        })
        .collect()
}
