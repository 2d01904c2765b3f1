//! Command-line interface definition.
//!
//! Flag surface mirrors the hosted CLI: a positional prompt with chat
//! options, mode flags for image/balance/models, and a `budget`
//! subcommand for the standing daily limit.

use clap::{Parser, Subcommand};

/// Access hosted LLMs and image models via USDC micropayments.
#[derive(Debug, Parser)]
#[command(
    name = "blockrun",
    version,
    about = "Access unlimited LLMs via USDC micropayments",
    args_conflicts_with_subcommands = true,
    after_help = "Examples:
  blockrun \"What is quantum computing?\"
  blockrun \"Analyze this code\" --model anthropic/claude-sonnet-4
  blockrun \"A sunset over mountains\" --image
  blockrun --balance
  blockrun --models
  blockrun budget set 5.00

More info: https://blockrun.ai"
)]
pub struct Cli {
    /// Prompt for chat or image generation.
    pub prompt: Option<String>,

    /// Generate an image instead of chat.
    #[arg(short, long)]
    pub image: bool,

    /// Show wallet address and USDC balance.
    #[arg(short, long)]
    pub balance: bool,

    /// List available models with pricing.
    #[arg(short, long)]
    pub models: bool,

    /// Check for CLI updates.
    #[arg(long)]
    pub check_update: bool,

    /// Specific model id (e.g. openai/gpt-4o, xai/grok-3).
    #[arg(long)]
    pub model: Option<String>,

    /// System prompt for chat.
    #[arg(short, long)]
    pub system: Option<String>,

    /// Use the most cost-effective model.
    #[arg(long)]
    pub cheap: bool,

    /// Use the fastest model.
    #[arg(long)]
    pub fast: bool,

    /// Maximum tokens to generate.
    #[arg(long, default_value_t = 1024)]
    pub max_tokens: u32,

    /// Sampling temperature (0.0 - 2.0).
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Image size.
    #[arg(long, default_value = "1024x1024")]
    pub size: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the standing daily budget ceiling.
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },
}

/// Budget subcommand actions.
#[derive(Debug, Subcommand)]
pub enum BudgetAction {
    /// Set the standing daily limit in USD.
    Set {
        /// Limit in USD; must be positive.
        amount: f64,
    },
    /// Remove the standing limit entirely.
    Clear,
    /// Show today's spend against the limit.
    Status,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_chat_invocation() {
        let cli = Cli::parse_from(["blockrun", "hello there", "--cheap", "--max-tokens", "256"]);
        assert_eq!(cli.prompt.as_deref(), Some("hello there"));
        assert!(cli.cheap);
        assert!(!cli.fast);
        assert_eq!(cli.max_tokens, 256);
    }

    #[test]
    fn parses_budget_subcommand() {
        let cli = Cli::parse_from(["blockrun", "budget", "set", "2.50"]);
        match cli.command {
            Some(Command::Budget {
                action: BudgetAction::Set { amount },
            }) => assert!((amount - 2.50).abs() < f64::EPSILON),
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn parses_image_invocation() {
        let cli = Cli::parse_from(["blockrun", "a sunset", "--image", "--size", "512x512"]);
        assert!(cli.image);
        assert_eq!(cli.size, "512x512");
    }
}
