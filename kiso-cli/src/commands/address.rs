//! `kiso address`: chain addresses from a public key or derived keys.

use anyhow::{Context, bail};
use clap::{Args, ValueEnum};
use colored::Colorize;
use kiso::{
    ChainParams, DerivationIndex, DerivationPath, ExtendedKey, Network, derive_many, to_address,
};
use tracing::debug;

use super::seed::SeedArgs;

/// Encode chain addresses.
#[derive(Args)]
pub struct AddressCommand {
    /// Compressed public key as hex (33 bytes).
    #[arg(long, conflicts_with_all = ["seed", "mnemonic", "path", "count"])]
    pubkey: Option<String>,

    #[command(flatten)]
    seed: SeedArgs,

    /// Derivation path of the first address.
    #[arg(short, long, default_value = "m/44'/118'/0'/0/0")]
    path: String,

    /// Chain preset (default: cosmos).
    #[arg(short, long, value_enum, conflicts_with_all = ["hrp", "version_byte"])]
    chain: Option<CliChain>,

    /// Custom Bech32 human-readable prefix.
    #[arg(long, conflicts_with = "version_byte")]
    hrp: Option<String>,

    /// Custom Base58Check version bytes as hex, e.g. 00 or 1cb8.
    #[arg(long)]
    version_byte: Option<String>,

    /// Number of consecutive addresses, counting up from the last path index.
    #[arg(
        short = 'n',
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    count: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliChain {
    /// Cosmos Hub (cosmos1...)
    Cosmos,
    /// Band Protocol (band1...)
    Band,
    /// Kava (kava1...)
    Kava,
    /// IRISnet (iaa1...)
    Iris,
    /// BNB Beacon Chain (bnb1...)
    Binance,
    /// Bitcoin P2PKH (1...)
    Bitcoin,
    /// Bitcoin testnet P2PKH (m... / n...)
    BitcoinTestnet,
}

impl From<CliChain> for ChainParams {
    fn from(val: CliChain) -> Self {
        match val {
            CliChain::Cosmos => Self::cosmos(),
            CliChain::Band => Self::band(),
            CliChain::Kava => Self::kava(),
            CliChain::Iris => Self::iris(),
            CliChain::Binance => Self::binance(),
            CliChain::Bitcoin => Self::bitcoin(),
            CliChain::BitcoinTestnet => Self::bitcoin_testnet(),
        }
    }
}

/// One line of output.
#[derive(Debug)]
struct AddressRow {
    path: Option<String>,
    public_key: String,
    address: String,
}

impl AddressCommand {
    /// Execute the address command.
    pub fn execute(self) -> anyhow::Result<()> {
        let rows = self.rows()?;
        print_rows(&rows);
        Ok(())
    }

    fn chain_params(&self) -> anyhow::Result<ChainParams> {
        if let Some(hrp) = &self.hrp {
            return Ok(ChainParams::bech32(hrp.clone()));
        }
        if let Some(version) = &self.version_byte {
            let bytes = hex::decode(version.trim().trim_start_matches("0x"))
                .context("--version-byte is not valid hex")?;
            return Ok(ChainParams::base58check(bytes));
        }
        Ok(self.chain.unwrap_or(CliChain::Cosmos).into())
    }

    fn rows(&self) -> anyhow::Result<Vec<AddressRow>> {
        let params = self.chain_params()?;

        if let Some(pubkey) = &self.pubkey {
            let bytes = hex::decode(pubkey.trim()).context("public key is not valid hex")?;
            let address = to_address(&bytes, &params)?;
            return Ok(vec![AddressRow {
                path: None,
                public_key: hex::encode(&bytes),
                address,
            }]);
        }

        if !self.seed.is_present() {
            bail!("provide --pubkey, or --seed / --mnemonic with --path");
        }
        let seed = self.seed.to_seed()?;
        let path = DerivationPath::parse(&self.path);
        let paths = consecutive_paths(&path, self.count)
            .with_context(|| format!("invalid path \"{}\"", self.path))?;
        debug!(count = paths.len(), scheme = %params.scheme(), "encoding addresses");

        let root = ExtendedKey::from_seed(&seed, Network::Mainnet)?;
        let keys = derive_many(&root, &paths)?;

        paths
            .iter()
            .zip(keys)
            .map(|(path, key)| -> anyhow::Result<AddressRow> {
                let public_key = key.public_key();
                Ok(AddressRow {
                    path: Some(format!("m/{path}")),
                    public_key: public_key.to_hex(),
                    address: to_address(&public_key.to_bytes(), &params)?,
                })
            })
            .collect()
    }
}

/// `path` followed by the paths whose last index is 1, 2, ... higher.
fn consecutive_paths(path: &DerivationPath, count: u32) -> anyhow::Result<Vec<DerivationPath>> {
    let indices = path.validate()?;
    if count == 1 {
        return Ok(vec![path.clone()]);
    }
    let Some((&last, prefix)) = indices.split_last() else {
        bail!("--count needs a path with at least one index");
    };

    let parent = DerivationPath::new(prefix.to_vec());
    (0..count)
        .map(|offset| -> anyhow::Result<DerivationPath> {
            let base = last
                .base()
                .checked_add(offset)
                .context("address index overflow")?;
            let index = if last.is_hardened() {
                DerivationIndex::hardened(base)?
            } else {
                DerivationIndex::normal(base)?
            };
            Ok(parent.child(index))
        })
        .collect()
}

#[rustfmt::skip]
fn print_rows(rows: &[AddressRow]) {
    println!();
    for (i, row) in rows.iter().enumerate() {
        if rows.len() > 1 {
            println!("      {}        {}", "Index".cyan().bold(), format!("[{i}]").dimmed());
        }
        if let Some(path) = &row.path {
            println!("      {}         {}", "Path".cyan().bold(), path);
        }
        println!("      {}   {}", "Public Key".cyan().bold(), row.public_key);
        println!("      {}      {}", "Address".cyan().bold(), row.address.green());
        if i < rows.len() - 1 {
            println!();
        }
    }
    println!();
}
