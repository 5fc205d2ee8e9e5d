//! `kiso inspect`: decode a serialized extended key.

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use kiso::{ExtendedKey, KeyCapability};

/// Show the fields of a serialized extended key.
#[derive(Args)]
pub struct InspectCommand {
    /// Extended key string (xprv, xpub, tprv or tpub).
    key: String,
}

impl InspectCommand {
    /// Execute the inspect command.
    pub fn execute(self) -> anyhow::Result<()> {
        let key = ExtendedKey::from_extended_str(self.key.trim())
            .context("cannot parse extended key")?;
        print_fields(&key);
        Ok(())
    }
}

#[rustfmt::skip]
fn print_fields(key: &ExtendedKey) {
    let kind = match key.capability() {
        KeyCapability::HasPrivate => "private",
        KeyCapability::PublicOnly => "public",
    };

    println!();
    println!("      {}         {}", "Type".cyan().bold(), kind);
    println!("      {}      {}", "Network".cyan().bold(), key.network());
    println!("      {}        {}", "Depth".cyan().bold(), key.depth());
    println!("      {}  {}", "Child Index".cyan().bold(), key.child_index());
    println!("      {}    {}", "Parent FP".cyan().bold(), hex::encode(key.parent_fingerprint()));
    println!("      {}  {}", "Fingerprint".cyan().bold(), hex::encode(key.fingerprint()));
    println!("      {}   {}", "Chain Code".cyan().bold(), hex::encode(key.chain_code()).dimmed());
    println!("      {}   {}", "Public Key".cyan().bold(), key.public_key().to_hex().green());
    println!("      {}         {}", "xpub".cyan().bold(), key.to_xpub());
    println!();
}
