//! Command handlers.
//!
//! Each handler wires the router, the spending ledger, and the gateway
//! together for one CLI invocation. The paid-call handlers share the same
//! bracket: budget check before the call, cost recording only after a
//! successful one.

pub mod budget;
pub mod chat;
pub mod image;
pub mod models;
pub mod update;
pub mod wallet;

use crate::error::{Error, Result};

/// Reject a model id that is not in `provider/model` form before any
/// external call is attempted.
pub(crate) fn validate_model_id(model: &str) -> Result<()> {
    let well_formed = model
        .split_once('/')
        .is_some_and(|(provider, name)| !provider.is_empty() && !name.is_empty());

    if !well_formed {
        return Err(Error::Validation {
            field: "model",
            reason: format!("expected provider/model form, got {model:?}"),
        });
    }
    Ok(())
}
