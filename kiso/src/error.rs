//! Error types for key derivation and address encoding.

use alloc::string::String;

use crate::hdpath::DerivationIndex;

/// A convenient Result type alias for kiso operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during key derivation and address encoding.
///
/// Path grammar violations are not represented here: an unparseable path
/// string yields an invalid [`DerivationPath`](crate::DerivationPath) and only
/// becomes [`Error::Bip32Path`] once something tries to derive with it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Seed is shorter than 16 or longer than 64 bytes.
    #[error("invalid seed length {0}, must be between 16 and 64 bytes")]
    SeedLength(usize),

    /// The seed hashed to a scalar that is zero or not below the curve order.
    #[error("seed produces an invalid master key")]
    InvalidMasterKey,

    /// Child derivation produced an invalid key and no further index was available to retry with.
    #[error("child key derivation failed at index {0}")]
    InvalidChildKey(DerivationIndex),

    /// A hardened child was requested from a key without private material.
    #[error("cannot derive hardened index {0} from a public-only key")]
    HardenedDerivationOnPublic(DerivationIndex),

    /// Derivation was attempted with a path that failed to parse.
    #[error("invalid BIP-32 derivation path")]
    Bip32Path,

    /// Derivation would take the key past depth 255.
    #[error("maximum derivation depth exceeded")]
    MaxDepthExceeded,

    /// A cryptographic primitive rejected its input.
    #[error("cryptographic operation failed")]
    CryptoError,

    /// Public key bytes are not a valid compressed secp256k1 point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(&'static str),

    /// Private key bytes are not a valid secp256k1 scalar.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Serialized extended key is malformed.
    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(&'static str),

    /// Input has the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// String is not valid Base58 or Bech32.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// Checksum does not match the payload.
    #[error("checksum mismatch")]
    InvalidChecksum,

    /// Human-readable prefix is empty, malformed, or does not match.
    #[error("invalid human-readable prefix \"{0}\"")]
    InvalidHrp(String),

    /// Base58Check chain parameters carry no version bytes.
    #[error("chain parameters have no version bytes")]
    MissingVersion,

    /// Decoded address has a different version than the chain parameters expect.
    #[error("address version does not match chain parameters")]
    VersionMismatch,
}
