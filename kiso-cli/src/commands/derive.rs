//! `kiso derive`: seed + path to extended key.

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use kiso::{DerivationPath, ExtendedKey, Network, from_seed_and_path};

use super::seed::SeedArgs;

/// Derive an extended key along a path.
#[derive(Args)]
pub struct DeriveCommand {
    #[command(flatten)]
    seed: SeedArgs,

    /// Derivation path, e.g. m/44'/118'/0'/0/0.
    #[arg(short, long, default_value = "m")]
    path: String,

    /// Use testnet version bytes (tprv / tpub).
    #[arg(short, long)]
    testnet: bool,

    /// Print public data only.
    #[arg(long)]
    public: bool,
}

impl DeriveCommand {
    /// Execute the derive command.
    pub fn execute(self) -> anyhow::Result<()> {
        let key = self.derive()?;
        print_key(&self.path, &key);
        Ok(())
    }

    fn derive(&self) -> anyhow::Result<ExtendedKey> {
        let network = if self.testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        };
        let seed = self.seed.to_seed()?;
        let key = from_seed_and_path(&seed, &DerivationPath::parse(&self.path), network)
            .with_context(|| format!("cannot derive path \"{}\"", self.path))?;
        Ok(if self.public { key.neuter() } else { key })
    }
}

#[rustfmt::skip]
fn print_key(path: &str, key: &ExtendedKey) {
    println!();
    println!("      {}         {}", "Path".cyan().bold(), path);
    println!("      {}      {}", "Network".cyan().bold(), key.network());
    println!("      {}        {}", "Depth".cyan().bold(), key.depth());
    println!("      {}  {}", "Fingerprint".cyan().bold(), hex::encode(key.fingerprint()));
    println!("      {}    {}", "Parent FP".cyan().bold(), hex::encode(key.parent_fingerprint()));
    println!("      {}   {}", "Public Key".cyan().bold(), key.public_key().to_hex().green());
    println!("      {}         {}", "xpub".cyan().bold(), key.to_xpub());
    if let Some(xprv) = key.to_xprv() {
        println!("      {}         {}", "xprv".cyan().bold(), xprv.as_str());
    }
    println!();
}
