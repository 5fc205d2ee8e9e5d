//! # Kiso - HD Key Derivation and Multi-Chain Address Encoding
//!
//! A `no_std` compatible library that turns a seed into a BIP-32 tree of
//! secp256k1 keys and encodes the resulting public keys as chain addresses.
//!
//! ## Features
//!
//! - **Path grammar**: `m/44'/118'/0'/0/0` style paths, parsed without panicking
//! - **BIP-32**: master key, private and public child derivation, xprv/xpub
//! - **Addresses**: Bech32 (Cosmos family) and Base58Check (Bitcoin P2PKH)
//! - **Secure by design**: private keys and chain codes are zeroized on drop
//!
//! ## Example
//!
//! ```
//! use kiso::{ChainParams, DerivationPath, ExtendedKey, Network, to_address};
//!
//! let seed = [0x5au8; 32];
//! let root = ExtendedKey::from_seed(&seed, Network::Mainnet)?;
//! let key = root.derive_path(&DerivationPath::parse("m/44'/118'/0'/0/0"))?;
//! let address = to_address(&key.public_key().to_bytes(), &ChainParams::cosmos())?;
//! assert!(address.starts_with("cosmos1"));
//! # Ok::<(), kiso::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::use_self,
    clippy::uninlined_format_args,
    clippy::return_self_not_must_use,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::redundant_closure_for_method_calls,
    clippy::option_if_let_else,
    clippy::items_after_statements,
    clippy::unreadable_literal,
    clippy::missing_fields_in_debug
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod address;
pub mod bip32;
pub mod encoding;
pub mod error;
pub mod extended_key;
pub mod hash;
pub mod hdpath;
pub mod key;
pub mod network;

pub use address::{
    AddressEncoder, AddressScheme, Base58CheckEncoder, Bech32Encoder, ChainParams, from_address,
    to_address, to_addresses,
};
pub use bip32::{derive_many, from_seed_and_path};
pub use error::{Error, Result};
pub use extended_key::ExtendedKey;
pub use hdpath::{
    DerivationIndex, DerivationPath, HARDENED_OFFSET, harden_index, is_hardened_index,
};
pub use key::{KeyCapability, KeyMaterial, PrivateKey, PublicKey};
pub use network::Network;
