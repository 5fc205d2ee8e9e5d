//! Network selection for extended key serialization.

use core::fmt;

/// Network whose version bytes prefix serialized extended keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Mainnet (`xprv` / `xpub`).
    #[default]
    Mainnet,
    /// Testnet (`tprv` / `tpub`).
    Testnet,
}

impl Network {
    /// Version bytes for a serialized extended private key.
    #[inline]
    #[must_use]
    pub const fn private_version(self) -> [u8; 4] {
        match self {
            Self::Mainnet => [0x04, 0x88, 0xAD, 0xE4],
            Self::Testnet => [0x04, 0x35, 0x83, 0x94],
        }
    }

    /// Version bytes for a serialized extended public key.
    #[inline]
    #[must_use]
    pub const fn public_version(self) -> [u8; 4] {
        match self {
            Self::Mainnet => [0x04, 0x88, 0xB2, 0x1E],
            Self::Testnet => [0x04, 0x35, 0x87, 0xCF],
        }
    }

    /// Identify network and key kind from version bytes.
    ///
    /// Returns the network and whether the version denotes a private key.
    pub fn from_version(version: [u8; 4]) -> Option<(Self, bool)> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find_map(|network| {
                if version == network.private_version() {
                    Some((network, true))
                } else if version == network.public_version() {
                    Some((network, false))
                } else {
                    None
                }
            })
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
