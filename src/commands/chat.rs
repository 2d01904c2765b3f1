//! Chat command: route, budget-check, call, record.

use crate::error::{Error, Result};
use crate::gateway::{ChatRequest, Gateway};
use crate::ledger::SpendingLedger;
use crate::output;
use crate::routing;

/// Chat options carried over from the CLI surface.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Explicit model id; bypasses routing when set.
    pub model: Option<String>,
    pub system: Option<String>,
    pub cheap: bool,
    pub fast: bool,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

/// Run one chat invocation end to end.
///
/// The gateway call sits between a pre-call budget check and a post-call
/// `record`; a failed call leaves the ledger untouched.
pub async fn run(
    gateway: &dyn Gateway,
    ledger: &SpendingLedger,
    prompt: &str,
    opts: ChatOptions,
) -> Result<()> {
    validate(&opts)?;

    let model = match &opts.model {
        Some(model) => model.clone(),
        None => routing::select_model(prompt, opts.cheap, opts.fast).to_string(),
    };
    let live_search =
        routing::requires_realtime_data(prompt) && routing::supports_live_search(&model);

    let status = ledger.check_budget()?;
    if !status.within_budget {
        return Err(ledger.exceeded()?);
    }

    output::header(&model, None);
    tracing::debug!(model = %model, live_search, "dispatching chat request");

    let request = ChatRequest {
        model: model.clone(),
        prompt: prompt.to_string(),
        system: opts.system,
        max_tokens: opts.max_tokens,
        temperature: opts.temperature,
        live_search,
    };
    let response = gateway.chat(&request).await?;

    output::response(&response.text);
    ledger.record(&model, response.cost_usd)?;
    output::footer(
        response.cost_usd,
        ledger.get_total()?,
        ledger.get_calls()?,
        &ledger.check_budget()?,
    );
    Ok(())
}

fn validate(opts: &ChatOptions) -> Result<()> {
    if let Some(temperature) = opts.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(Error::Validation {
                field: "temperature",
                reason: format!("must be between 0.0 and 2.0, got {temperature}"),
            });
        }
    }
    if let Some(model) = &opts.model {
        super::validate_model_id(model)?;
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────
