//! Styled terminal rendering.
//!
//! All user-facing printing goes through here so command handlers stay
//! free of formatting concerns. Amounts are shown with 2–4 decimal places
//! depending on magnitude.

use console::style;

use crate::config::WALLET_KEY_ENV;
use crate::error::Error;
use crate::gateway::ModelInfo;
use crate::ledger::BudgetStatus;

/// Pre-call header: model and paying wallet.
pub fn header(model: &str, wallet: Option<&str>) {
    println!();
    println!("  {} {}", style("Model:").dim(), style(model).cyan().bold());
    if let Some(addr) = wallet {
        println!("  {} {}", style("Wallet:").dim(), style(short_address(addr)).dim());
    }
    println!();
}

/// Model response body.
pub fn response(text: &str) {
    println!("{text}");
}

/// Post-call footer: this call's cost and today's running totals.
pub fn footer(cost_usd: f64, today_total: f64, calls: i64, status: &BudgetStatus) {
    println!();
    let mut line = format!(
        "  {} ${cost_usd:.4} · ${today_total:.4} across {calls} call(s) today",
        style("Cost:").dim()
    );
    if let Some(remaining) = status.remaining {
        line.push_str(&format!(" · ${remaining:.2} left of budget"));
    }
    println!("{line}");
}

/// Informational notice.
pub fn info(message: &str) {
    println!("  {} {message}", style("ℹ").blue());
}

/// Success notice.
pub fn success(message: &str) {
    println!("  {} {message}", style("✓").green());
}

/// Wallet balance display.
pub fn balance(wallet: &str, balance: Option<f64>, network: &str) {
    println!();
    println!("  {} {wallet}", style("Wallet:").dim());
    match balance {
        Some(usdc) => println!("  {} {usdc:.6} USDC", style("Balance:").dim()),
        None => println!("  {} (unable to fetch)", style("Balance:").dim()),
    }
    println!("  {} {network}", style("Network:").dim());
    println!();
}

/// Model catalog table.
pub fn models_table(models: &[ModelInfo]) {
    println!();
    println!("  {}", style("Available models").bold());
    println!();
    for model in models {
        let mut line = format!("  {}", style(&model.id).cyan());
        if let Some(name) = &model.name {
            line.push_str(&format!("  {}", style(name).dim()));
        }
        if let (Some(input), Some(output)) = (model.input_price, model.output_price) {
            line.push_str(&format!(
                "  {}",
                style(format!("${input:.2}/${output:.2} per 1M tokens")).dim()
            ));
        }
        println!("{line}");
    }
    println!();
}

/// Budget status display.
pub fn budget_status(spent: f64, calls: i64, limit: Option<f64>, status: &BudgetStatus) {
    println!();
    println!(
        "  {} ${spent:.4} across {calls} call(s)",
        style("Spent today:").dim()
    );
    match (limit, status.remaining) {
        (Some(limit), Some(remaining)) => {
            println!("  {} ${limit:.2}", style("Daily budget:").dim());
            if status.within_budget {
                println!("  {} ${remaining:.4}", style("Remaining:").dim());
            } else {
                println!(
                    "  {} over budget by ${:.4}",
                    style("!").red().bold(),
                    -remaining
                );
            }
        }
        _ => println!("  {} none set", style("Daily budget:").dim()),
    }
    println!();
}

/// Error display with taxonomy-specific remediation hints.
pub fn error(err: &Error) {
    eprintln!();
    eprintln!("  {} {err}", style("✗").red().bold());

    match err {
        Error::Config(_) => {
            eprintln!();
            eprintln!("  Wallet auto-creates on first use, or set manually:");
            eprintln!("    export {WALLET_KEY_ENV}=\"0x...\"");
            eprintln!();
            eprintln!("  Setup guide: https://blockrun.ai/docs/setup");
        }
        Error::Payment(_) => {
            eprintln!();
            eprintln!("  To fund your wallet, send $1-5 USDC on Base to your");
            eprintln!("  wallet address; show it with:");
            eprintln!("    blockrun --balance");
        }
        Error::BudgetExceeded { .. } => {
            eprintln!();
            eprintln!("  Raise or clear the standing limit:");
            eprintln!("    blockrun budget set <usd>");
            eprintln!("    blockrun budget clear");
        }
        Error::Api(detail) if detail.contains("model may not exist") => {
            eprintln!();
            eprintln!("  List available models:");
            eprintln!("    blockrun --models");
        }
        _ => {}
    }
    eprintln!();
}

/// `0x1234…abcd` shortening for display.
fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_address_elides_middle() {
        assert_eq!(
            short_address("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
            "0x8335…2913"
        );
        assert_eq!(short_address("0xabc"), "0xabc");
    }
}
