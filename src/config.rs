//! Runtime configuration: wallet key, API endpoint, data directory.
//!
//! The wallet private key is resolved from the environment first, then
//! from the session key file under the per-user data directory. The key is
//! only ever forwarded to the payment transport; this crate neither signs
//! nor settles anything with it.

use std::path::{Path, PathBuf};

use directories::UserDirs;

use crate::error::{Error, Result};

/// Default hosted API endpoint.
pub const DEFAULT_API_URL: &str = "https://blockrun.ai/api";

/// Environment variable holding the Base-chain wallet private key.
pub const WALLET_KEY_ENV: &str = "BLOCKRUN_WALLET_KEY";

/// Environment variable overriding the API endpoint.
pub const API_URL_ENV: &str = "BLOCKRUN_API_URL";

/// Session key file name under the data directory.
const SESSION_KEY_FILE: &str = "wallet.key";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosted API base URL, without a trailing slash.
    pub api_url: String,
    /// Wallet private key (`0x` + 64 hex characters).
    pub wallet_key: String,
    /// Per-user data directory (ledger, session key).
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration for a wallet-backed command.
    ///
    /// Fails with a configuration error (setup guidance included) when no
    /// wallet key can be found.
    pub fn load() -> Result<Self> {
        let data_dir = data_dir()?;
        let wallet_key = resolve_wallet_key(&data_dir)?;
        validate_wallet_key(&wallet_key)?;

        Ok(Self {
            api_url: api_url(),
            wallet_key,
            data_dir,
        })
    }
}

/// The API base URL: env override or the hosted default.
pub fn api_url() -> String {
    let url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    url.trim_end_matches('/').to_string()
}

/// Per-user data directory (`~/.blockrun`), created on first use.
pub fn data_dir() -> Result<PathBuf> {
    let dir = UserDirs::new()
        .map(|u| u.home_dir().join(".blockrun"))
        .ok_or_else(|| Error::Config("could not determine home directory".into()))?;

    std::fs::create_dir_all(&dir)
        .map_err(|e| Error::Config(format!("could not create {}: {e}", dir.display())))?;
    Ok(dir)
}

/// Path of the spending ledger database.
pub fn ledger_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(crate::ledger::LEDGER_FILE))
}

/// Wallet key from the environment, falling back to the session key file.
fn resolve_wallet_key(data_dir: &Path) -> Result<String> {
    if let Ok(key) = std::env::var(WALLET_KEY_ENV) {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }

    let session_file = data_dir.join(SESSION_KEY_FILE);
    if let Ok(contents) = std::fs::read_to_string(&session_file) {
        let key = contents.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }

    Err(Error::Config(format!(
        "no wallet found: set {WALLET_KEY_ENV} or write the key to {}",
        session_file.display()
    )))
}

/// Light shape check: `0x` followed by 64 hex characters.
fn validate_wallet_key(key: &str) -> Result<()> {
    let hex = key
        .strip_prefix("0x")
        .ok_or_else(|| Error::Validation {
            field: "wallet key",
            reason: "expected a 0x-prefixed private key".into(),
        })?;

    if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::Validation {
            field: "wallet key",
            reason: "expected 64 hex characters after the 0x prefix".into(),
        });
    }
    Ok(())
}
