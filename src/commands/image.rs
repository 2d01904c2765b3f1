//! Image generation command.
//!
//! Same budget bracket as chat: check before the paid call, record only
//! after success. Routing does not apply; images go to the configured or
//! default image model.

use crate::error::Result;
use crate::gateway::{Gateway, ImageRequest};
use crate::ledger::SpendingLedger;
use crate::output;
use crate::routing;

/// Image options carried over from the CLI surface.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    /// Explicit image model id.
    pub model: Option<String>,
    /// Size string, e.g. `1024x1024`.
    pub size: String,
}

/// Run one image generation end to end.
pub async fn run(
    gateway: &dyn Gateway,
    ledger: &SpendingLedger,
    prompt: &str,
    opts: ImageOptions,
) -> Result<()> {
    if let Some(model) = &opts.model {
        super::validate_model_id(model)?;
    }
    let model = opts
        .model
        .unwrap_or_else(|| routing::DEFAULT_IMAGE_MODEL.to_string());

    let status = ledger.check_budget()?;
    if !status.within_budget {
        return Err(ledger.exceeded()?);
    }

    output::header(&model, None);
    output::info(&format!("Generating image: \"{}\"", preview(prompt)));

    let request = ImageRequest {
        model: model.clone(),
        prompt: prompt.to_string(),
        size: opts.size,
    };
    let result = gateway.generate_image(&request).await?;

    output::success("Image generated!");
    println!();
    println!("  URL: {}", result.url);

    ledger.record(&model, result.cost_usd)?;
    output::footer(
        result.cost_usd,
        ledger.get_total()?,
        ledger.get_calls()?,
        &ledger.check_budget()?,
    );
    Ok(())
}

/// First 50 characters of the prompt for the progress line.
fn preview(prompt: &str) -> String {
    let mut out: String = prompt.chars().take(50).collect();
    if prompt.chars().count() > 50 {
        out.push('…');
    }
    out
}
