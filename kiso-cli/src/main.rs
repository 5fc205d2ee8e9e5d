//! Kiso - HD key derivation and chain address CLI.
//!
//! Derive BIP-32 keys from a seed or mnemonic, encode Cosmos-family and
//! Bitcoin addresses, and inspect extended keys.

mod commands;

use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Derive(cmd) => cmd.execute()?,
        Commands::Address(cmd) => cmd.execute()?,
        Commands::Inspect(cmd) => cmd.execute()?,
    }
    Ok(())
}

/// Log to stderr. `-v` / `-vv` override `RUST_LOG`; without either only warnings are shown.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("kiso=debug"),
        _ => EnvFilter::new("kiso=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
