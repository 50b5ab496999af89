//! Twain - a two-chain HD wallet in the terminal.
//!
//! Derive Solana and Ethereum accounts from one recovery phrase.

mod commands;

use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.session_config()?;
    match cli.command {
        Commands::Session(cmd) => cmd.execute(config)?,
        Commands::Derive(cmd) => cmd.execute(&config)?,
    }
    Ok(())
}

/// Log to stderr so command output stays clean. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
