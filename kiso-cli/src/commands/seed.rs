//! Seed input shared by the commands that derive keys.

use anyhow::{Context, bail};
use bip39::{Language, Mnemonic};
use clap::Args;
use zeroize::Zeroizing;

/// Where the BIP-32 seed comes from.
#[derive(Args, Debug, Default)]
pub struct SeedArgs {
    /// Raw seed as hex (16 to 64 bytes).
    #[arg(long, conflicts_with = "mnemonic")]
    pub seed: Option<String>,

    /// BIP39 mnemonic phrase, converted to a 64-byte seed.
    #[arg(long)]
    pub mnemonic: Option<String>,

    /// BIP39 passphrase used with --mnemonic.
    #[arg(long, default_value = "")]
    pub passphrase: String,
}

impl SeedArgs {
    /// Whether a seed source was given.
    pub const fn is_present(&self) -> bool {
        self.seed.is_some() || self.mnemonic.is_some()
    }

    /// Resolve the seed bytes.
    pub fn to_seed(&self) -> anyhow::Result<Zeroizing<Vec<u8>>> {
        if let Some(seed) = &self.seed {
            let bytes = hex::decode(seed.trim().trim_start_matches("0x"))
                .context("seed is not valid hex")?;
            return Ok(Zeroizing::new(bytes));
        }
        if let Some(phrase) = &self.mnemonic {
            let mnemonic = Mnemonic::parse_in(Language::English, phrase.trim())
                .context("invalid mnemonic")?;
            let seed = Zeroizing::new(mnemonic.to_seed(&self.passphrase));
            return Ok(Zeroizing::new(seed.to_vec()));
        }
        bail!("either --seed or --mnemonic is required");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_seed() {
        let args = SeedArgs {
            seed: Some("0x000102030405060708090a0b0c0d0e0f".into()),
            ..SeedArgs::default()
        };
        assert_eq!(args.to_seed().unwrap().len(), 16);
    }

    #[test]
    fn test_mnemonic_seed() {
        // BIP39 reference vector with passphrase "TREZOR".
        let args = SeedArgs {
            mnemonic: Some(
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
                    .into(),
            ),
            passphrase: "TREZOR".into(),
            ..SeedArgs::default()
        };
        assert_eq!(
            hex::encode(&*args.to_seed().unwrap()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_missing_source() {
        assert!(!SeedArgs::default().is_present());
        assert!(SeedArgs::default().to_seed().is_err());
    }

    #[test]
    fn test_invalid_mnemonic() {
        let args = SeedArgs {
            mnemonic: Some("abandon abandon".into()),
            ..SeedArgs::default()
        };
        assert!(args.to_seed().is_err());
    }
}
