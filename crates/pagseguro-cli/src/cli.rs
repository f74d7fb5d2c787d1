//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pagseguro", version, about = "Register checkouts with PagSeguro")]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate an order file and register it as a checkout
    Checkout(CheckoutArgs),
    /// Print the gateway endpoint URLs
    Urls(UrlsArgs),
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// TOML file describing the payment
    pub order: PathBuf,

    /// Use the sandbox environment
    #[arg(long)]
    pub sandbox: bool,

    /// Only run validation; never contact the gateway
    #[arg(long)]
    pub validate_only: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct UrlsArgs {
    /// Use the sandbox environment
    #[arg(long)]
    pub sandbox: bool,

    /// Also print the buyer redirect URL for this checkout code
    #[arg(long)]
    pub code: Option<String>,
}
