//! `metronome` command-line entry point.
//!
//! Responsibilities:
//!
//! 1. **Parse arguments**: flags and environment variables via `clap`
//!    ([`cli::Cli`]). Argument errors exit with clap's status 2.
//! 2. **Wire logging**: a `tracing-subscriber` on stderr, `warn` by default,
//!    `debug` with `--debug`, overridden by `RUST_LOG`; JSON with `--log-json`.
//! 3. **Connect**: build a [`client::MetronomeClient`], which checks the
//!    service answers before any command runs.
//! 4. **Dispatch**: run the command ([`commands::run`]) and print its result
//!    on stdout. Any failure is logged and the process exits with status 1.

mod args;
mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::MetronomeClient;

use crate::cli::Cli;

fn init_tracing(debug: bool, json: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

async fn execute(cli: &Cli) -> Result<String> {
    let client = MetronomeClient::connect(cli.client_config())
        .await
        .with_context(|| format!("failed to connect to {}", cli.metronome_url))?;
    let output = commands::run(&cli.command, &client).await?;
    output.render()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.log_json);

    match execute(&cli).await {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
