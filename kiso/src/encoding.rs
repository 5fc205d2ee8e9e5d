//! Base58Check and Bech32 text encodings.

use alloc::string::String;
use alloc::vec::Vec;

use bech32::primitives::decode::{CheckedHrpstring, CheckedHrpstringError};
use bech32::{Bech32, Hrp};

use crate::error::{Error, Result};
use crate::hash::double_sha256;

/// Encode `version || payload || checksum` in Base58.
///
/// The checksum is the first four bytes of the double SHA-256 of
/// `version || payload`.
pub fn base58check_encode(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len() + 4);
    data.extend_from_slice(version);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}

/// Decode a Base58Check string, verifying and stripping the checksum.
///
/// Returns the checked data, version bytes included.
pub fn base58check_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut data = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| Error::InvalidEncoding)?;

    if data.len() < 5 {
        return Err(Error::InvalidLength {
            expected: 5,
            actual: data.len(),
        });
    }

    let split = data.len() - 4;
    let computed = double_sha256(&data[..split]);
    if data[split..] != computed[..4] {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(split);
    Ok(data)
}

/// Encode bytes as a Bech32 (BIP-173 checksum) string under `hrp`.
///
/// The payload is regrouped into 5-bit words; no witness version is added.
pub fn bech32_encode(hrp: &str, data: &[u8]) -> Result<String> {
    let parsed = Hrp::parse(hrp).map_err(|_| Error::InvalidHrp(hrp.into()))?;
    bech32::encode::<Bech32>(parsed, data).map_err(|_| Error::InvalidEncoding)
}

/// Decode a Bech32 string, returning the lowercase prefix and the payload bytes.
///
/// A checksum that does not verify, Bech32m included, is
/// [`Error::InvalidChecksum`]; any other malformation is
/// [`Error::InvalidEncoding`].
pub fn bech32_decode(encoded: &str) -> Result<(String, Vec<u8>)> {
    let checked = CheckedHrpstring::new::<Bech32>(encoded).map_err(|e| match e {
        CheckedHrpstringError::Checksum(_) => Error::InvalidChecksum,
        _ => Error::InvalidEncoding,
    })?;
    let hrp = checked.hrp().to_lowercase();
    let data = checked.byte_iter().collect();
    Ok((hrp, data))
}
