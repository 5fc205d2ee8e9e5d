//! CLI command definitions and handlers.

mod address;
mod derive;
mod inspect;
mod seed;

pub use address::AddressCommand;
use clap::{ArgAction, Parser, Subcommand};
pub use derive::DeriveCommand;
pub use inspect::InspectCommand;

/// Kiso - BIP-32 key derivation and multi-chain address encoding.
#[derive(Parser)]
#[command(name = "kiso")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Derive an extended key along a path.
    #[command(name = "derive", alias = "d")]
    Derive(DeriveCommand),

    /// Encode chain addresses from a public key or a derived key.
    #[command(name = "address", alias = "addr")]
    Address(AddressCommand),

    /// Show the fields of an xprv / xpub / tprv / tpub string.
    #[command(name = "inspect", alias = "i")]
    Inspect(InspectCommand),
}
