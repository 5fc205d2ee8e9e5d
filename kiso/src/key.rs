//! secp256k1 key types and the tagged key material held by extended keys.

use alloc::string::String;
use core::fmt;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, ProjectivePoint, Scalar, SecretKey};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::hash::hash160;

/// A secp256k1 private key. Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    inner: SecretKey,
}

impl PrivateKey {
    /// Create from a raw 32-byte big-endian scalar.
    ///
    /// Fails if the scalar is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let inner = SecretKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self { inner })
    }

    pub(crate) fn from_scalar(scalar: NonZeroScalar) -> Self {
        Self {
            inner: SecretKey::from(scalar),
        }
    }

    pub(crate) fn scalar(&self) -> Scalar {
        *self.inner.to_nonzero_scalar()
    }

    /// Serialize to the raw 32-byte scalar.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }

    /// Get the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.public_key(),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// A secp256k1 public key, always serialized compressed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Create from 33-byte compressed SEC1 bytes.
    ///
    /// Uncompressed keys, other lengths, prefixes other than `0x02`/`0x03`,
    /// and x-coordinates not on the curve are all rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [0x02 | 0x03, ..] if bytes.len() == 33 => {}
            [0x04, ..] if bytes.len() == 65 => {
                return Err(Error::InvalidPublicKey("uncompressed keys are not accepted"));
            }
            _ if bytes.len() != 33 => {
                return Err(Error::InvalidPublicKey("expected 33 bytes"));
            }
            _ => return Err(Error::InvalidPublicKey("prefix must be 0x02 or 0x03")),
        }

        let inner = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| Error::InvalidPublicKey("point is not on the curve"))?;
        Ok(Self { inner })
    }

    /// `None` for the point at infinity.
    pub(crate) fn from_point(point: ProjectivePoint) -> Option<Self> {
        k256::PublicKey::from_affine(point.to_affine())
            .ok()
            .map(|inner| Self { inner })
    }

    pub(crate) fn to_projective(self) -> ProjectivePoint {
        self.inner.to_projective()
    }

    /// Serialize to compressed bytes (33 bytes).
    pub fn to_bytes(&self) -> [u8; 33] {
        let point = self.inner.to_encoded_point(true);
        let mut result = [0u8; 33];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Serialize to uncompressed bytes (65 bytes with 0x04 prefix).
    pub fn to_uncompressed_bytes(&self) -> [u8; 65] {
        let point = self.inner.to_encoded_point(false);
        let mut result = [0u8; 65];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Hash160 of the compressed encoding.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_bytes())
    }

    /// First four bytes of [`hash160`](Self::hash160), the BIP-32 key identifier prefix.
    pub fn fingerprint(&self) -> [u8; 4] {
        let hash = self.hash160();
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Lowercase hex of the compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// What an extended key can do, decided by the material it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCapability {
    /// Private scalar present: all derivations allowed.
    HasPrivate,
    /// Public point only: non-hardened derivation only.
    PublicOnly,
}

/// Key material of an extended key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// A private key; the public key is derived on demand.
    Private(PrivateKey),
    /// A public key without its private counterpart.
    Public(PublicKey),
}

impl KeyMaterial {
    /// The capability tag for this material.
    pub const fn capability(&self) -> KeyCapability {
        match self {
            Self::Private(_) => KeyCapability::HasPrivate,
            Self::Public(_) => KeyCapability::PublicOnly,
        }
    }

    /// The public key, computed from the private key when necessary.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Private(key) => key.public_key(),
            Self::Public(key) => *key,
        }
    }

    /// The private key, if present.
    pub const fn private_key(&self) -> Option<&PrivateKey> {
        match self {
            Self::Private(key) => Some(key),
            Self::Public(_) => None,
        }
    }

    /// Drop the private component.
    pub fn to_public(&self) -> Self {
        Self::Public(self.public_key())
    }

    /// The 33-byte key field of a serialized extended key:
    /// `0x00 || k` for private material, the compressed point otherwise.
    pub fn to_serialized_bytes(&self) -> Zeroizing<[u8; 33]> {
        let mut out = Zeroizing::new([0u8; 33]);
        match self {
            Self::Private(key) => out[1..].copy_from_slice(&key.to_bytes()[..]),
            Self::Public(key) => out.copy_from_slice(&key.to_bytes()),
        }
        out
    }
}
