//! Error taxonomy for the BlockRun CLI.
//!
//! All core-detected failures are returned as values; the binary decides
//! exit behavior. Each variant maps to a distinct remediation path:
//! configuration problems need wallet setup, budget refusals need a limit
//! change, payment failures need wallet funding.

use thiserror::Error;

/// The primary error type for routing, ledger, and gateway operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No wallet available, or the environment is otherwise unusable.
    /// Fatal for the invocation; non-retryable without user action.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input rejected before any external call was attempted.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// Today's spend has reached the standing budget ceiling.
    /// Detected before the paid call is attempted; the call is never made.
    #[error(
        "daily budget exceeded: spent ${spent:.4} of ${limit:.2} across {calls} call(s) today"
    )]
    BudgetExceeded {
        spent: f64,
        limit: f64,
        calls: i64,
    },

    /// The hosted API rejected or failed the request.
    #[error("API error: {0}")]
    Api(String),

    /// Payment settlement failed (insufficient USDC, rejected signature).
    #[error("payment failed: {0}")]
    Payment(String),

    /// Spending ledger storage failure.
    #[error("ledger storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Transport-level HTTP failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
