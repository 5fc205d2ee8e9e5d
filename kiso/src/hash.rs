//! Hash functions used by key derivation and address encoding.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// Compute SHA-256 hash
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 hash (Base58Check checksums)
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160 hash
#[inline]
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Compute Hash160 (SHA-256 followed by RIPEMD-160)
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Compute HMAC-SHA512 over the concatenation of `parts`.
///
/// Returns the left and right 32-byte halves.
pub fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|_| Error::CryptoError)?;
    for part in parts {
        mac.update(part);
    }
    let output = mac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&output[..32]);
    right.copy_from_slice(&output[32..]);
    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_double_sha256_empty() {
        assert_eq!(
            hex::encode(double_sha256(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_ripemd160_hello() {
        assert_eq!(
            hex::encode(ripemd160(b"hello")),
            "108f07b8382412612c048d07d13f814118445acd"
        );
    }

    #[test]
    fn test_hash160_hello() {
        assert_eq!(
            hex::encode(hash160(b"hello")),
            "b6a9c8c230722b7c748331a8b450f05566dc7d0f"
        );
    }

    #[test]
    fn test_hash160_generator_point() {
        // Compressed secp256k1 generator, the pubkey behind the BIP-173 examples.
        let pubkey = hex_literal::hex!(
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_hmac_sha512_rfc4231_case2() {
        let (left, right) =
            hmac_sha512(b"Jefe", &[b"what do ya want ", b"for nothing?"]).unwrap();
        assert_eq!(
            hex::encode(left),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554"
        );
        assert_eq!(
            hex::encode(right),
            "9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_hmac_sha512_accepts_any_key_length() {
        // RFC 4231 test case 6: a 131-byte key, longer than the SHA-512 block.
        let (left, right) = hmac_sha512(
            &[0xaa; 131],
            &[b"Test Using Larger Than Block-Size Key - Hash Key First"],
        )
        .unwrap();
        assert_eq!(
            hex::encode(left),
            "80b24263c7c1a3ebb71493c1dd7be8b49b46d1f41b4aeec1121b013783f8f352"
        );
        assert_eq!(
            hex::encode(right),
            "6b56d037e05f2598bd0fd2215d6a1e5295e64f73f63f0aec8b915a985d786598"
        );
        assert!(hmac_sha512(&[], &[b"data"]).is_ok());
    }
}
