use proptest::prelude::*;

use kiso::{
    ChainParams, DerivationIndex, DerivationPath, ExtendedKey, KeyCapability, Network,
    derive_many, from_address, to_address,
};

fn seed() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 16..=64)
}

fn normal_index() -> impl Strategy<Value = DerivationIndex> {
    (0u32..0x8000_0000).prop_map(|i| DerivationIndex::normal(i).unwrap())
}

fn any_index() -> impl Strategy<Value = DerivationIndex> {
    any::<u32>().prop_map(DerivationIndex::from_u32)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn public_derivation_matches_private_then_neuter(seed in seed(), index in normal_index()) {
        let root = ExtendedKey::from_seed(&seed, Network::Mainnet).unwrap();
        let via_private = root.derive_child(index).unwrap().neuter();
        let via_public = root.neuter().derive_child(index).unwrap();

        prop_assert_eq!(via_public.capability(), KeyCapability::PublicOnly);
        prop_assert_eq!(via_public, via_private);
    }

    #[test]
    fn extended_strings_roundtrip(seed in seed(), first in any_index(), second in any_index(), testnet in any::<bool>()) {
        let network = if testnet { Network::Testnet } else { Network::Mainnet };
        let key = ExtendedKey::from_seed(&seed, network)
            .unwrap()
            .derive_path(&DerivationPath::new(vec![first, second]))
            .unwrap();

        let xprv = key.to_xprv().unwrap();
        let parsed = ExtendedKey::from_extended_str(&xprv).unwrap();
        prop_assert_eq!(&parsed, &key);

        let xpub = key.to_xpub();
        let parsed = ExtendedKey::from_extended_str(&xpub).unwrap();
        prop_assert_eq!(parsed, key.neuter());
    }

    #[test]
    fn batch_derivation_matches_independent(seed in seed(), count in 1u32..6, account in 0u32..4) {
        let root = ExtendedKey::from_seed(&seed, Network::Mainnet).unwrap();
        let paths: Vec<DerivationPath> = (0..count)
            .map(|i| DerivationPath::bip44(118, account, 0, i).unwrap())
            .collect();

        let batch = derive_many(&root, &paths).unwrap();
        for (path, key) in paths.iter().zip(&batch) {
            prop_assert_eq!(key, &root.derive_path(path).unwrap());
        }
    }

    #[test]
    fn addresses_decode_to_pubkey_hash(seed in seed(), index in normal_index()) {
        let key = ExtendedKey::from_seed(&seed, Network::Mainnet)
            .unwrap()
            .derive_child(index)
            .unwrap()
            .public_key();

        for params in [ChainParams::cosmos(), ChainParams::binance(), ChainParams::bitcoin()] {
            let address = to_address(&key.to_bytes(), &params).unwrap();
            prop_assert_eq!(from_address(&address, &params).unwrap(), key.hash160());
        }
    }
}
