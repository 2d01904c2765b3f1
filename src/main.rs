//! Binary entry point: parse the CLI, dispatch, render errors.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use blockrun::cli::{Cli, Command};
use blockrun::commands;
use blockrun::config::{self, Config};
use blockrun::error::Result;
use blockrun::gateway::HttpGateway;
use blockrun::ledger::SpendingLedger;
use blockrun::output;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        output::error(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Budget management needs the ledger but no wallet.
    if let Some(Command::Budget { action }) = &cli.command {
        let ledger = SpendingLedger::open(&config::ledger_path()?)?;
        return commands::budget::run(&ledger, action);
    }

    if cli.check_update {
        return commands::update::run().await;
    }

    // Model listing works without a wallet too.
    if cli.models {
        return commands::models::run(&config::api_url()).await;
    }

    if cli.balance {
        let config = Config::load()?;
        let gateway = HttpGateway::new(&config);
        return commands::wallet::run(&gateway).await;
    }

    let Some(prompt) = cli.prompt.as_deref() else {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    };

    let config = Config::load()?;
    let gateway = HttpGateway::new(&config);
    let ledger = SpendingLedger::open(&config::ledger_path()?)?;

    if cli.image {
        return commands::image::run(
            &gateway,
            &ledger,
            prompt,
            commands::image::ImageOptions {
                model: cli.model,
                size: cli.size,
            },
        )
        .await;
    }

    commands::chat::run(
        &gateway,
        &ledger,
        prompt,
        commands::chat::ChatOptions {
            model: cli.model,
            system: cli.system,
            cheap: cli.cheap,
            fast: cli.fast,
            max_tokens: cli.max_tokens,
            temperature: cli.temperature,
        },
    )
    .await
}
