use alloc::string::String;

use super::{ADDRESS_HASH_LEN, AddressEncoder, ChainParams, pubkey_hash};
use crate::encoding::{bech32_decode, bech32_encode};
use crate::error::{Error, Result};

/// Bech32 addresses: `hrp || "1" || data || checksum` over HASH160(pubkey).
///
/// Used by Cosmos SDK chains; no witness version is prepended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bech32Encoder;

impl AddressEncoder for Bech32Encoder {
    fn encode(&self, pubkey: &[u8], params: &ChainParams) -> Result<String> {
        let hash = pubkey_hash(pubkey)?;
        bech32_encode(params.hrp(), &hash)
    }

    fn decode(&self, address: &str, params: &ChainParams) -> Result<[u8; ADDRESS_HASH_LEN]> {
        let (hrp, data) = bech32_decode(address)?;
        if !hrp.eq_ignore_ascii_case(params.hrp()) {
            return Err(Error::InvalidHrp(hrp));
        }
        data.as_slice().try_into().map_err(|_| Error::InvalidLength {
            expected: ADDRESS_HASH_LEN,
            actual: data.len(),
        })
    }
}
