use alloc::string::String;

use super::{ADDRESS_HASH_LEN, AddressEncoder, ChainParams, pubkey_hash};
use crate::encoding::{base58check_decode, base58check_encode};
use crate::error::{Error, Result};

/// Base58Check addresses: `version || HASH160(pubkey) || checksum`.
///
/// The checksum is the first four bytes of the double SHA-256 of the
/// preceding data, as in Bitcoin P2PKH addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base58CheckEncoder;

impl AddressEncoder for Base58CheckEncoder {
    fn encode(&self, pubkey: &[u8], params: &ChainParams) -> Result<String> {
        let hash = pubkey_hash(pubkey)?;
        if params.version().is_empty() {
            return Err(Error::MissingVersion);
        }
        Ok(base58check_encode(params.version(), &hash))
    }

    fn decode(&self, address: &str, params: &ChainParams) -> Result<[u8; ADDRESS_HASH_LEN]> {
        let version = params.version();
        if version.is_empty() {
            return Err(Error::MissingVersion);
        }

        let data = base58check_decode(address)?;
        let expected = version.len() + ADDRESS_HASH_LEN;
        if data.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: data.len(),
            });
        }

        let (found, hash) = data.split_at(version.len());
        if found != version {
            return Err(Error::VersionMismatch);
        }

        let mut out = [0u8; ADDRESS_HASH_LEN];
        out.copy_from_slice(hash);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR: [u8; 33] =
        hex_literal::hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");

    #[test]
    fn test_encode_p2pkh() {
        let address = Base58CheckEncoder
            .encode(&GENERATOR, &ChainParams::bitcoin())
            .unwrap();
        assert_eq!(address, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_missing_version() {
        let params = ChainParams::base58check(alloc::vec::Vec::<u8>::new());
        assert_eq!(
            Base58CheckEncoder.encode(&GENERATOR, &params),
            Err(Error::MissingVersion)
        );
        assert_eq!(
            Base58CheckEncoder.decode("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", &params),
            Err(Error::MissingVersion)
        );
    }

    #[test]
    fn test_invalid_key_checked_before_version() {
        let params = ChainParams::base58check(alloc::vec::Vec::<u8>::new());
        assert!(matches!(
            Base58CheckEncoder.encode(&GENERATOR[..32], &params),
            Err(Error::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_multi_byte_version() {
        let params = ChainParams::base58check(alloc::vec![0x1c, 0xb8]);
        let address = Base58CheckEncoder.encode(&GENERATOR, &params).unwrap();
        let hash = Base58CheckEncoder.decode(&address, &params).unwrap();
        assert_eq!(hash, hex_literal::hex!("751e76e8199196d454941c45d1b3a323f1433bd6"));
    }

    #[test]
    fn test_decode_rejects_version_mismatch() {
        assert_eq!(
            Base58CheckEncoder.decode(
                "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
                &ChainParams::bitcoin_testnet()
            ),
            Err(Error::VersionMismatch)
        );
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let too_long = base58check_encode(&[0x00], &[0u8; 21]);
        assert_eq!(
            Base58CheckEncoder.decode(&too_long, &ChainParams::bitcoin()),
            Err(Error::InvalidLength {
                expected: 21,
                actual: 22
            })
        );
    }
}
