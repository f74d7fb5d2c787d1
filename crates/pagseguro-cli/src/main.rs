//! # pagseguro
//!
//! Register a checkout from a TOML order file.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAGSEGURO_EMAIL=seller@example.com
//! export PAGSEGURO_TOKEN=...
//!
//! # Check the order, then register it
//! pagseguro checkout order.toml --validate-only
//! pagseguro checkout order.toml --sandbox
//! ```

use clap::Parser;
use pagseguro_cli::cli::{Cli, Command};
use pagseguro_cli::commands;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    match cli.command {
        Command::Checkout(args) => commands::checkout(args).await,
        Command::Urls(args) => commands::urls(args),
    }
}
