//! Chain address encoding from compressed public keys.
//!
//! Each encoding scheme is one [`AddressEncoder`] implementation;
//! [`ChainParams`] carries the per-chain prefix or version bytes and picks
//! the scheme.

mod base58;
mod bech32;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

pub use base58::Base58CheckEncoder;
pub use bech32::Bech32Encoder;

use crate::error::Result;
use crate::key::PublicKey;

/// Length of the hash carried by every supported address format.
pub const ADDRESS_HASH_LEN: usize = 20;

/// Turns a compressed public key into an address string and back.
pub trait AddressEncoder: Send + Sync {
    /// Encode a 33-byte compressed public key.
    ///
    /// Fails with [`Error::InvalidPublicKey`](crate::Error::InvalidPublicKey)
    /// before any hashing if the key is not compressed SEC1.
    fn encode(&self, pubkey: &[u8], params: &ChainParams) -> Result<String>;

    /// Recover the HASH160 payload of an address, checking the prefix or
    /// version against `params`.
    fn decode(&self, address: &str, params: &ChainParams) -> Result<[u8; ADDRESS_HASH_LEN]>;
}

/// Address encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressScheme {
    /// BIP-173 Bech32 over a human-readable prefix (Cosmos-family chains).
    Bech32,
    /// Version bytes, HASH160 and a double SHA-256 checksum in Base58.
    Base58Check,
}

impl AddressScheme {
    /// The encoder for this scheme.
    pub const fn encoder(self) -> &'static dyn AddressEncoder {
        match self {
            Self::Bech32 => &Bech32Encoder,
            Self::Base58Check => &Base58CheckEncoder,
        }
    }

    /// Get scheme name as string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bech32 => "bech32",
            Self::Base58Check => "base58check",
        }
    }
}

impl fmt::Display for AddressScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-chain address parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainParams {
    hrp: Cow<'static, str>,
    scheme: AddressScheme,
    version: Cow<'static, [u8]>,
}

impl ChainParams {
    /// Bech32 addresses under a custom human-readable prefix.
    pub fn bech32(hrp: impl Into<Cow<'static, str>>) -> Self {
        Self {
            hrp: hrp.into(),
            scheme: AddressScheme::Bech32,
            version: Cow::Borrowed(&[]),
        }
    }

    /// Base58Check addresses with custom version bytes.
    pub fn base58check(version: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            hrp: Cow::Borrowed(""),
            scheme: AddressScheme::Base58Check,
            version: version.into(),
        }
    }

    const fn bech32_preset(hrp: &'static str) -> Self {
        Self {
            hrp: Cow::Borrowed(hrp),
            scheme: AddressScheme::Bech32,
            version: Cow::Borrowed(&[]),
        }
    }

    const fn base58check_preset(version: &'static [u8]) -> Self {
        Self {
            hrp: Cow::Borrowed(""),
            scheme: AddressScheme::Base58Check,
            version: Cow::Borrowed(version),
        }
    }

    /// Cosmos Hub (`cosmos1...`).
    pub const fn cosmos() -> Self {
        Self::bech32_preset("cosmos")
    }

    /// Band Protocol (`band1...`).
    pub const fn band() -> Self {
        Self::bech32_preset("band")
    }

    /// Kava (`kava1...`).
    pub const fn kava() -> Self {
        Self::bech32_preset("kava")
    }

    /// IRISnet (`iaa1...`).
    pub const fn iris() -> Self {
        Self::bech32_preset("iaa")
    }

    /// BNB Beacon Chain (`bnb1...`).
    pub const fn binance() -> Self {
        Self::bech32_preset("bnb")
    }

    /// Bitcoin mainnet P2PKH (`1...`).
    pub const fn bitcoin() -> Self {
        Self::base58check_preset(&[0x00])
    }

    /// Bitcoin testnet P2PKH (`m...` / `n...`).
    pub const fn bitcoin_testnet() -> Self {
        Self::base58check_preset(&[0x6f])
    }

    /// Look up a preset by name, case-insensitively.
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|(_, params)| params())
    }

    /// Human-readable prefix; empty for Base58Check chains.
    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Encoding scheme.
    pub const fn scheme(&self) -> AddressScheme {
        self.scheme
    }

    /// Version bytes; empty for Bech32 chains.
    pub fn version(&self) -> &[u8] {
        &self.version
    }
}

/// Built-in chain presets, by name.
pub const PRESETS: &[(&str, fn() -> ChainParams)] = &[
    ("cosmos", ChainParams::cosmos),
    ("band", ChainParams::band),
    ("kava", ChainParams::kava),
    ("iris", ChainParams::iris),
    ("binance", ChainParams::binance),
    ("bitcoin", ChainParams::bitcoin),
    ("bitcoin-testnet", ChainParams::bitcoin_testnet),
];

/// Encode `pubkey` with the scheme selected by `params`.
pub fn to_address(pubkey: &[u8], params: &ChainParams) -> Result<String> {
    params.scheme().encoder().encode(pubkey, params)
}

/// Decode `address` with the scheme selected by `params`.
pub fn from_address(address: &str, params: &ChainParams) -> Result<[u8; ADDRESS_HASH_LEN]> {
    params.scheme().encoder().decode(address, params)
}

/// Encode a batch of public keys under the same chain parameters.
pub fn to_addresses(pubkeys: &[PublicKey], params: &ChainParams) -> Result<Vec<String>> {
    pubkeys
        .iter()
        .map(|key| to_address(&key.to_bytes(), params))
        .collect()
}

/// HASH160 of a validated compressed public key.
fn pubkey_hash(pubkey: &[u8]) -> Result<[u8; ADDRESS_HASH_LEN]> {
    Ok(PublicKey::from_bytes(pubkey)?.hash160())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip32::from_seed_and_path;
    use crate::error::Error;
    use crate::hdpath::{DerivationIndex, DerivationPath};
    use crate::network::Network;

    fn address(pubkey_hex: &str, params: &ChainParams) -> Result<String> {
        to_address(&hex::decode(pubkey_hex).unwrap(), params)
    }

    #[test]
    fn test_cosmos_family_table() {
        let cases = [
            (
                "039cb22e5c6ce15e06b76d5725dcf084b87357d926dcdfeeb20d628d3d11ff543b",
                ChainParams::cosmos(),
                "cosmos1zewfm2c4s6uv5s4rywksqden8dvya4wmqyyvek",
            ),
            (
                "02dc27af24c0fc6b448519e17d4ac6078f158a766bbf8446cb16c61a9e53835c3c",
                ChainParams::cosmos(),
                "cosmos1n6ugmlarydek7k8wslzuy55seftfe7g2aqncw3",
            ),
            (
                "0356ab0a0717738c794caf972ee2091762525a35d062c881b863733f06f445c585",
                ChainParams::band(),
                "band16nez6ldt0zp648zgk8g2af50245y0ykjutc2k9",
            ),
            (
                "02b19f4692195f95a8d919edf245d64993bce60bb3c50e4226ba5311686ccf60da",
                ChainParams::band(),
                "band16a3pvl8jmf84uvreek79mta5jr8llmcn4ptgy2",
            ),
            (
                "0356ab0a0717738c794caf972ee2091762525a35d062c881b863733f06f445c585",
                ChainParams::kava(),
                "kava16nez6ldt0zp648zgk8g2af50245y0ykje3v4c2",
            ),
            (
                "02b19f4692195f95a8d919edf245d64993bce60bb3c50e4226ba5311686ccf60da",
                ChainParams::kava(),
                "kava16a3pvl8jmf84uvreek79mta5jr8llmcnsmlh29",
            ),
            (
                "02ec5dc71723f11e8ed7ae054f1c09110e849edfa491118d161473b78d72cc4813",
                ChainParams::iris(),
                "iaa1uxgmjgu4eel6fm2ln88ge36y0y4z90c2knr3d6",
            ),
            (
                "02dc27af24c0fc6b448519e17d4ac6078f158a766bbf8446cb16c61a9e53835c3c",
                ChainParams::iris(),
                "iaa1n6ugmlarydek7k8wslzuy55seftfe7g2gznfvq",
            ),
            (
                "0223d645338396fdbce2d754a14568537d52deb76e1addb940994868feef9c5994",
                ChainParams::binance(),
                "bnb1lwjdd82uj4fqhu8nqw5d959rhys58dccv9aalj",
            ),
            (
                "03ebbc8a33683fa9d40f4da3b870784d7f66911eec4d464993c2b80d891d452f93",
                ChainParams::binance(),
                "bnb16kltf5z0kgm3m7x42h3676xehtpl02csg7f3qc",
            ),
        ];

        for (pubkey, params, expected) in cases {
            assert_eq!(address(pubkey, &params).unwrap(), expected, "{}", params.hrp());
        }
    }

    #[test]
    fn test_prefix_changes_only_prefix_and_checksum() {
        let pubkey = "0356ab0a0717738c794caf972ee2091762525a35d062c881b863733f06f445c585";
        let band = address(pubkey, &ChainParams::band()).unwrap();
        let kava = address(pubkey, &ChainParams::kava()).unwrap();

        let (_, band_data) = band.split_once('1').unwrap();
        let (_, kava_data) = kava.split_once('1').unwrap();
        assert_eq!(band_data.len(), kava_data.len());
        assert_eq!(band_data[..32], kava_data[..32]);
        assert_ne!(band_data[32..], kava_data[32..]);
    }

    #[test]
    fn test_invalid_public_keys_fail_for_every_preset() {
        let generator =
            hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
                .unwrap();
        let uncompressed = PublicKey::from_bytes(&generator)
            .unwrap()
            .to_uncompressed_bytes()
            .to_vec();
        let bad_inputs = [
            // A private key.
            hex::decode("132750b8489385430d8bfa3871ade97da7f5d5ef134a5c85184f88743b526e38")
                .unwrap(),
            // 64-byte uncompressed coordinates without the 0x04 prefix.
            uncompressed[1..].to_vec(),
            uncompressed,
            // Compressed key with trailing garbage.
            hex::decode("029efbcb2db9ee44cb12739e9350e19e5f1ce4563351b770096f0e408f93400c7000")
                .unwrap(),
            Vec::new(),
        ];

        for (name, params) in PRESETS {
            for input in &bad_inputs {
                assert!(
                    matches!(to_address(input, &params()), Err(Error::InvalidPublicKey(_))),
                    "{name} accepted {}",
                    hex::encode(input)
                );
            }
        }
    }

    #[test]
    fn test_bitcoin_p2pkh() {
        let generator = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        assert_eq!(
            address(generator, &ChainParams::bitcoin()).unwrap(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert!(
            address(generator, &ChainParams::bitcoin_testnet())
                .unwrap()
                .starts_with(['m', 'n'])
        );
    }

    #[test]
    fn test_derived_keys_to_addresses() {
        let seed = hex_literal::hex!("000102030405060708090a0b0c0d0e0f");
        let account = from_seed_and_path(
            &seed,
            &DerivationPath::parse("m/44'/118'/0'/0"),
            Network::Mainnet,
        )
        .unwrap();

        let keys: Vec<PublicKey> = (0..3u32)
            .map(|i| account.derive_child(DerivationIndex::from(i)).unwrap().public_key())
            .collect();
        assert_eq!(
            to_addresses(&keys, &ChainParams::cosmos()).unwrap(),
            [
                "cosmos1px4rfdghcxqhlrdm7m7q99rf3npsz3evns7elv",
                "cosmos1apsdc753ffj9ua9zphtc3dkvu8gqhsudsy4crq",
                "cosmos1su7jd88vaqrgxptnfngdavt845lzkpnvszatjw",
            ]
        );
        assert_eq!(
            to_address(&keys[0].to_bytes(), &ChainParams::bitcoin()).unwrap(),
            "1t6yqf7VJjcWBLEqcw4pc4JrQFXVb4nrB"
        );
    }

    #[test]
    fn test_from_address_roundtrip() {
        let params = ChainParams::cosmos();
        let hash = from_address("cosmos1zewfm2c4s6uv5s4rywksqden8dvya4wmqyyvek", &params).unwrap();
        assert_eq!(hash, hex_literal::hex!("165c9dab1586b8ca42a323ad0037333b584ed5db"));

        let bitcoin = ChainParams::bitcoin();
        let hash = from_address("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", &bitcoin).unwrap();
        assert_eq!(hash, hex_literal::hex!("751e76e8199196d454941c45d1b3a323f1433bd6"));
    }

    #[test]
    fn test_presets() {
        assert_eq!(ChainParams::preset("Cosmos"), Some(ChainParams::cosmos()));
        assert_eq!(ChainParams::preset("iris").unwrap().hrp(), "iaa");
        assert_eq!(
            ChainParams::preset("bitcoin-testnet").unwrap().version(),
            &[0x6f]
        );
        assert_eq!(ChainParams::preset("dogecoin"), None);
        assert_eq!(ChainParams::bech32("osmo"), ChainParams::bech32(String::from("osmo")));
        assert_eq!(ChainParams::cosmos().scheme().to_string(), "bech32");
    }
}
