//! BlockRun CLI: pay-per-call access to hosted LLMs and image models,
//! settled in USDC micropayments from a local wallet.
//!
//! The decision logic lives in two cooperating policies: [`routing`]
//! picks the model for a prompt deterministically, and [`ledger`] keeps
//! day-keyed spend accounting under an optional standing budget ceiling.
//! The [`gateway`] trait is the boundary to the hosted payment transport;
//! everything else is CLI glue.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod output;
pub mod routing;

pub use error::{Error, Result};
