//! BIP-32 master key generation and child key derivation.
//!
//! Every function here is pure: keys go in, new keys come out, and nothing
//! is shared between calls except what the caller passes.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, NonZeroScalar, ProjectivePoint, Scalar};
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::extended_key::ExtendedKey;
use crate::hash::hmac_sha512;
use crate::hdpath::{DerivationIndex, DerivationPath};
use crate::key::{KeyMaterial, PrivateKey, PublicKey};
use crate::network::Network;

/// HMAC key for master key generation.
pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Shortest accepted seed, in bytes.
pub const MIN_SEED_LEN: usize = 16;

/// Longest accepted seed, in bytes.
pub const MAX_SEED_LEN: usize = 64;

/// Create the master key from a seed of 16 to 64 bytes.
///
/// `I = HMAC-SHA512("Bitcoin seed", seed)`; the left half becomes the private
/// key and the right half the chain code.
pub fn master_key(seed: &[u8], network: Network) -> Result<ExtendedKey> {
    if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
        return Err(Error::SeedLength(seed.len()));
    }

    let (il, chain_code) = hmac_sha512(MASTER_HMAC_KEY, &[seed])?;
    let private = master_from_il(&Zeroizing::new(il))?;

    let master = ExtendedKey::new(
        KeyMaterial::Private(private),
        chain_code,
        0,
        [0u8; 4],
        DerivationIndex::from_u32(0),
        network,
    );
    debug!(
        network = %network,
        fingerprint = %hex::encode(master.fingerprint()),
        "created master key"
    );
    Ok(master)
}

/// Derive the child of `parent` at `index`.
///
/// A private parent yields a private child; a public parent yields a public
/// child and rejects hardened indices. If the candidate key at `index` is
/// invalid (probability below 2^-127), the next index is tried instead, and
/// the returned key records the index actually used.
pub fn derive_child(parent: &ExtendedKey, index: DerivationIndex) -> Result<ExtendedKey> {
    if parent.depth() == u8::MAX {
        return Err(Error::MaxDepthExceeded);
    }
    if index.is_hardened() && parent.is_public_only() {
        return Err(Error::HardenedDerivationOnPublic(index));
    }

    let parent_public = parent.public_key();
    let child = retry_invalid(index, |candidate| ckd(parent, &parent_public, candidate))?;
    trace!(
        index = %child.child_index(),
        depth = child.depth(),
        "derived child key"
    );
    Ok(child)
}

/// Run `step` at `index`, moving to the next index while it reports an
/// invalid child key.
///
/// Gives up with [`Error::InvalidChildKey`] once the next index would cross
/// into the other half of the index space.
fn retry_invalid<T>(
    mut index: DerivationIndex,
    mut step: impl FnMut(DerivationIndex) -> Result<T>,
) -> Result<T> {
    loop {
        match step(index) {
            Err(Error::InvalidChildKey(_)) => {
                let next = index.next().ok_or(Error::InvalidChildKey(index))?;
                warn!(skipped = %index, next = %next, "invalid child key, skipping index");
                index = next;
            }
            result => return result,
        }
    }
}

/// One CKDpriv / CKDpub step without retry.
fn ckd(
    parent: &ExtendedKey,
    parent_public: &PublicKey,
    index: DerivationIndex,
) -> Result<ExtendedKey> {
    let index_bytes = index.to_u32().to_be_bytes();

    let (il, chain_code) = if index.is_hardened() {
        let private = parent
            .private_key()
            .ok_or(Error::HardenedDerivationOnPublic(index))?;
        let secret = private.to_bytes();
        hmac_sha512(parent.chain_code(), &[&[0x00_u8], &secret[..], &index_bytes])?
    } else {
        hmac_sha512(parent.chain_code(), &[&parent_public.to_bytes(), &index_bytes])?
    };
    let il = Zeroizing::new(il);

    let key = match parent.key_material() {
        KeyMaterial::Private(private) => tweak_private(&il, private).map(KeyMaterial::Private),
        KeyMaterial::Public(_) => tweak_public(&il, parent_public).map(KeyMaterial::Public),
    }
    .ok_or(Error::InvalidChildKey(index))?;

    Ok(ExtendedKey::new(
        key,
        chain_code,
        parent.depth() + 1,
        parent_public.fingerprint(),
        index,
        parent.network(),
    ))
}

/// The master private key from `IL`; zero or `IL >= n` is rejected.
fn master_from_il(il: &[u8; 32]) -> Result<PrivateKey> {
    PrivateKey::from_bytes(il).map_err(|_| Error::InvalidMasterKey)
}

/// `IL` as a scalar, or `None` if it is not below the curve order.
fn il_scalar(il: &[u8; 32]) -> Option<Scalar> {
    Option::from(Scalar::from_repr(*FieldBytes::from_slice(il)))
}

/// `IL + k`. `None` if `IL >= n` or the sum is zero.
fn tweak_private(il: &[u8; 32], parent: &PrivateKey) -> Option<PrivateKey> {
    let tweak = il_scalar(il)?;
    Option::<NonZeroScalar>::from(NonZeroScalar::new(tweak + parent.scalar()))
        .map(PrivateKey::from_scalar)
}

/// `IL * G + K`. `None` if `IL >= n` or the sum is the point at infinity.
fn tweak_public(il: &[u8; 32], parent: &PublicKey) -> Option<PublicKey> {
    let tweak = il_scalar(il)?;
    PublicKey::from_point(ProjectivePoint::GENERATOR * tweak + parent.to_projective())
}

/// Derive along `path`, applying [`derive_child`] once per index.
///
/// An unparseable path fails with [`Error::Bip32Path`] before any
/// derivation happens. An empty path returns a copy of `root`.
pub fn derive_path(root: &ExtendedKey, path: &DerivationPath) -> Result<ExtendedKey> {
    let indices = path.validate()?;
    debug!(path = %path, from_depth = root.depth(), "deriving path");
    indices
        .iter()
        .try_fold(root.clone(), |node, &index| derive_child(&node, index))
}

/// Create the master key from `seed` and derive `path` from it.
pub fn from_seed_and_path(
    seed: &[u8],
    path: &DerivationPath,
    network: Network,
) -> Result<ExtendedKey> {
    path.validate()?;
    derive_path(&master_key(seed, network)?, path)
}

/// Derive several paths from one root.
///
/// Intermediate nodes are reused across paths that share a prefix, so a
/// batch like `44'/118'/0'/0/0..n` computes the hardened prefix once. The
/// result is identical to calling [`derive_path`] for each path.
pub fn derive_many(root: &ExtendedKey, paths: &[DerivationPath]) -> Result<Vec<ExtendedKey>> {
    let mut cache: BTreeMap<Vec<DerivationIndex>, ExtendedKey> = BTreeMap::new();

    paths
        .iter()
        .map(|path| -> Result<ExtendedKey> {
            let indices = path.validate()?;

            let (mut node, start) = (1..=indices.len())
                .rev()
                .find_map(|len| cache.get(&indices[..len]).map(|key| (key.clone(), len)))
                .unwrap_or_else(|| (root.clone(), 0));

            for (end, &index) in indices.iter().enumerate().skip(start) {
                node = derive_child(&node, index)?;
                cache.insert(indices[..=end].to_vec(), node.clone());
            }
            Ok(node)
        })
        .collect()
}
