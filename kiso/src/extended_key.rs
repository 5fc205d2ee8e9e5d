//! BIP-32 extended keys and their 78-byte serialization.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use zeroize::{Zeroize, Zeroizing};

use crate::bip32;
use crate::encoding::{base58check_decode, base58check_encode};
use crate::error::{Error, Result};
use crate::hdpath::{DerivationIndex, DerivationPath};
use crate::key::{KeyCapability, KeyMaterial, PrivateKey, PublicKey};
use crate::network::Network;

/// Length of a serialized extended key before the Base58Check checksum.
pub const SERIALIZED_LEN: usize = 78;

/// A node of the derivation tree.
///
/// Never mutated after construction: every derivation returns a new key.
/// The chain code is zeroized on drop, as is private key material.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    /// Private or public key material
    key: KeyMaterial,
    /// Chain code for key derivation
    chain_code: [u8; 32],
    /// Depth in the derivation tree (0 for master)
    depth: u8,
    /// Parent key fingerprint (first 4 bytes of hash160 of parent public key)
    parent_fingerprint: [u8; 4],
    /// Child index that produced this key
    child_index: DerivationIndex,
    /// Network selecting the serialization version bytes
    network: Network,
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl ExtendedKey {
    pub(crate) const fn new(
        key: KeyMaterial,
        chain_code: [u8; 32],
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_index: DerivationIndex,
        network: Network,
    ) -> Self {
        Self {
            key,
            chain_code,
            depth,
            parent_fingerprint,
            child_index,
            network,
        }
    }

    /// Create the master key from a seed. See [`bip32::master_key`].
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Self> {
        bip32::master_key(seed, network)
    }

    /// Derive one child. See [`bip32::derive_child`].
    pub fn derive_child(&self, index: DerivationIndex) -> Result<Self> {
        bip32::derive_child(self, index)
    }

    /// Derive along a parsed path. See [`bip32::derive_path`].
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        bip32::derive_path(self, path)
    }

    /// The key material.
    pub const fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    /// Whether this key can derive hardened children.
    pub const fn capability(&self) -> KeyCapability {
        self.key.capability()
    }

    /// True if this key holds no private material.
    pub const fn is_public_only(&self) -> bool {
        matches!(self.capability(), KeyCapability::PublicOnly)
    }

    /// The private key, if present.
    pub const fn private_key(&self) -> Option<&PrivateKey> {
        self.key.private_key()
    }

    /// The public key.
    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Get the chain code.
    pub const fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Get the depth.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the parent fingerprint.
    pub const fn parent_fingerprint(&self) -> &[u8; 4] {
        &self.parent_fingerprint
    }

    /// Get the child index.
    pub const fn child_index(&self) -> DerivationIndex {
        self.child_index
    }

    /// Get the network.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// This key's own fingerprint, recorded as `parent_fingerprint` by its children.
    pub fn fingerprint(&self) -> [u8; 4] {
        self.public_key().fingerprint()
    }

    /// A public-only copy of this key.
    pub fn neuter(&self) -> Self {
        Self::new(
            self.key.to_public(),
            self.chain_code,
            self.depth,
            self.parent_fingerprint,
            self.child_index,
            self.network,
        )
    }

    /// Alias for [`neuter`](Self::neuter).
    pub fn to_public(&self) -> Self {
        self.neuter()
    }

    /// A copy serialized with another network's version bytes.
    pub fn with_network(&self, network: Network) -> Self {
        let mut key = self.clone();
        key.network = network;
        key
    }

    /// Serialize to the 78-byte BIP-32 layout.
    ///
    /// `version(4) || depth(1) || parent_fingerprint(4) || child_index(4) || chain_code(32) || key(33)`
    pub fn to_bytes(&self) -> Zeroizing<[u8; SERIALIZED_LEN]> {
        let version = match self.capability() {
            KeyCapability::HasPrivate => self.network.private_version(),
            KeyCapability::PublicOnly => self.network.public_version(),
        };

        let mut out = Zeroizing::new([0u8; SERIALIZED_LEN]);
        out[..4].copy_from_slice(&version);
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_index.to_u32().to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        out[45..].copy_from_slice(&self.key.to_serialized_bytes()[..]);
        out
    }

    /// Base58Check serialization of the public half (`xpub` / `tpub`).
    pub fn to_xpub(&self) -> String {
        let bytes = self.neuter().to_bytes();
        base58check_encode(&bytes[..4], &bytes[4..])
    }

    /// Base58Check serialization of the private key (`xprv` / `tprv`).
    ///
    /// `None` for public-only keys.
    pub fn to_xprv(&self) -> Option<Zeroizing<String>> {
        self.private_key()?;
        let bytes = self.to_bytes();
        Some(Zeroizing::new(base58check_encode(&bytes[..4], &bytes[4..])))
    }

    /// `xprv` / `tprv` for private keys, `xpub` / `tpub` otherwise.
    pub fn to_extended_string(&self) -> Zeroizing<String> {
        self.to_xprv()
            .unwrap_or_else(|| Zeroizing::new(self.to_xpub()))
    }

    /// Parse a Base58Check `xprv`, `xpub`, `tprv` or `tpub` string.
    pub fn from_extended_str(encoded: &str) -> Result<Self> {
        let data = Zeroizing::new(base58check_decode(encoded)?);
        Self::from_bytes(&data)
    }

    /// Parse the 78-byte BIP-32 layout.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != SERIALIZED_LEN {
            return Err(Error::InvalidLength {
                expected: SERIALIZED_LEN,
                actual: data.len(),
            });
        }

        let version = [data[0], data[1], data[2], data[3]];
        let (network, is_private) = Network::from_version(version)
            .ok_or(Error::InvalidExtendedKey("unknown version bytes"))?;

        let depth = data[4];
        let parent_fingerprint = [data[5], data[6], data[7], data[8]];
        let child_index =
            DerivationIndex::from_u32(u32::from_be_bytes([data[9], data[10], data[11], data[12]]));

        if depth == 0 && parent_fingerprint != [0u8; 4] {
            return Err(Error::InvalidExtendedKey(
                "zero depth with non-zero parent fingerprint",
            ));
        }
        if depth == 0 && child_index.to_u32() != 0 {
            return Err(Error::InvalidExtendedKey("zero depth with non-zero child index"));
        }

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);

        let key = if is_private {
            if data[45] != 0x00 {
                return Err(Error::InvalidExtendedKey("private key must be prefixed with 0x00"));
            }
            let private = PrivateKey::from_bytes(&data[46..])
                .map_err(|_| Error::InvalidExtendedKey("private key out of range"))?;
            KeyMaterial::Private(private)
        } else {
            let public = PublicKey::from_bytes(&data[45..])
                .map_err(|_| Error::InvalidExtendedKey("invalid public key"))?;
            KeyMaterial::Public(public)
        };

        Ok(Self::new(
            key,
            chain_code,
            depth,
            parent_fingerprint,
            child_index,
            network,
        ))
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extended_str(s)
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("capability", &self.capability())
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_index", &self.child_index)
            .field("network", &self.network)
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}
