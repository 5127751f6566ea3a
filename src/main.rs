mod arn;
mod cli;
mod client;
mod commands;
mod config;
mod defaults;
mod error;
mod links;
mod output;
mod render;
mod retry;
mod secret;
mod service;
mod types;

use std::io;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::DeliveryClient;
use config::Config;
use error::Result;
use secret::{webhook_url_predicate, KmsDecryptor, SecretResolver};
use service::NotificationService;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "teams_notify=debug"
    } else {
        "teams_notify=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "teams-notify", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Render(args) => {
            let config = Config::load()?;
            let links = links::install(config.link_formatter());
            commands::render::run(&args, links)?;
        }
        Commands::Send(args) => {
            let config = Config::load()?;
            let links = links::install(config.link_formatter());

            let endpoint = SecretResolver::new(config.hook_url()?, KmsDecryptor)
                .with_validator(webhook_url_predicate);
            let service = NotificationService::new(
                Arc::new(endpoint),
                DeliveryClient::with_timeout(config.timeout())?,
                config.retry_policy(),
            );

            commands::send::run(&service, &args, links).await?;
        }
    }

    Ok(())
}
