mod api;
mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Context};
use crate::error::Result;
use crate::output::Output;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout is reserved for command output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let output = Output::new(cli.json, cli.quiet, cli.no_color);
    let ctx = Context::new(output, cli.url);

    cli::commands::run(&ctx, cli.command).await
}
