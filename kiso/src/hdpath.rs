//! BIP-32 derivation path grammar.
//!
//! Parses strings like `"m/44'/118'/0'/0/0"` into a sequence of
//! [`DerivationIndex`] values. Parsing never fails: a string that violates the
//! grammar produces a [`DerivationPath`] flagged invalid, which renders as an
//! empty string and refuses derivation with [`Error::Bip32Path`].
//!
//! Accepted grammar:
//!
//! - an optional leading `m` (or `M`) marker, optional leading and trailing `/`
//! - `/`-separated segments of ASCII decimal digits
//! - an optional hardening suffix per segment, `'` or `p` (also `P`)
//! - whitespace around segments and around the marker
//!
//! Output always uses `'` for hardened segments.

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt::{self, Write as _};
use core::ops::Index;
use core::str::FromStr;

use crate::error::{Error, Result};

/// The offset added to a base index to mark it hardened (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Mark a raw index as hardened.
///
/// Indices that are already hardened are returned unchanged.
#[inline]
pub const fn harden_index(index: u32) -> u32 {
    index | HARDENED_OFFSET
}

/// Check whether a raw index lies in the hardened range.
#[inline]
pub const fn is_hardened_index(index: u32) -> bool {
    index & HARDENED_OFFSET != 0
}

/// A single segment of a derivation path.
///
/// Stored in its wire form: hardened indices carry the `2^31` offset. The
/// hardened flag can only be chosen at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DerivationIndex(u32);

impl DerivationIndex {
    /// Create a normal (non-hardened) index.
    pub const fn normal(index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            Err(Error::Bip32Path)
        } else {
            Ok(Self(index))
        }
    }

    /// Create a hardened index from its base value.
    pub const fn hardened(index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            Err(Error::Bip32Path)
        } else {
            Ok(Self(index | HARDENED_OFFSET))
        }
    }

    /// Create an index from its wire form.
    ///
    /// Values at or above `2^31` are hardened.
    pub const fn from_u32(raw: u32) -> Self {
        Self(raw)
    }

    /// The wire form, including the hardened offset.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// The base value, without the hardened offset.
    pub const fn base(self) -> u32 {
        self.0 & !HARDENED_OFFSET
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(self) -> bool {
        is_hardened_index(self.0)
    }

    /// Always true: invalidity is tracked on [`DerivationPath`].
    pub const fn is_valid(self) -> bool {
        true
    }

    /// The next index in the same (hardened or normal) range, if any.
    pub(crate) const fn next(self) -> Option<Self> {
        if self.base() == HARDENED_OFFSET - 1 {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }
}

impl From<u32> for DerivationIndex {
    fn from(raw: u32) -> Self {
        Self::from_u32(raw)
    }
}

impl From<DerivationIndex> for u32 {
    fn from(index: DerivationIndex) -> Self {
        index.to_u32()
    }
}

impl fmt::Display for DerivationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.base())
        } else {
            write!(f, "{}", self.base())
        }
    }
}

/// A BIP-32 derivation path with a validity flag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<DerivationIndex>,
    valid: bool,
}

impl DerivationPath {
    /// The empty path (the master key itself).
    pub fn master() -> Self {
        Self::new(Vec::new())
    }

    /// Create a valid path from a sequence of indices.
    pub fn new(indices: Vec<DerivationIndex>) -> Self {
        Self {
            indices,
            valid: true,
        }
    }

    fn invalid() -> Self {
        Self {
            indices: Vec::new(),
            valid: false,
        }
    }

    /// Parse a path string.
    ///
    /// Never fails; check [`is_valid`](Self::is_valid) or call
    /// [`validate`](Self::validate) before deriving.
    pub fn parse(text: &str) -> Self {
        match parse_segments(text) {
            Some(indices) => Self::new(indices),
            None => Self::invalid(),
        }
    }

    /// Whether the path was parsed successfully.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Return the indices, or [`Error::Bip32Path`] if the path is invalid.
    pub fn validate(&self) -> Result<&[DerivationIndex]> {
        if self.valid {
            Ok(&self.indices)
        } else {
            Err(Error::Bip32Path)
        }
    }

    /// The indices of the path. Empty for an invalid path.
    pub fn indices(&self) -> &[DerivationIndex] {
        &self.indices
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The segment at `position`, if present.
    pub fn get(&self, position: usize) -> Option<DerivationIndex> {
        self.indices.get(position).copied()
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, DerivationIndex>> {
        self.indices.iter().copied()
    }

    /// Wire-form indices, hardened values including the `2^31` offset.
    pub fn to_list(&self) -> Vec<u32> {
        self.iter().map(DerivationIndex::to_u32).collect()
    }

    /// Check if any segment is hardened.
    pub fn has_hardened(&self) -> bool {
        self.iter().any(DerivationIndex::is_hardened)
    }

    /// A new path with `index` appended. Invalid paths stay invalid.
    pub fn child(&self, index: DerivationIndex) -> Self {
        if !self.valid {
            return Self::invalid();
        }
        let mut indices = self.indices.clone();
        indices.push(index);
        Self::new(indices)
    }

    /// The path without its last segment, if any.
    pub fn parent(&self) -> Option<Self> {
        if !self.valid || self.indices.is_empty() {
            return None;
        }
        Some(Self::new(self.indices[..self.indices.len() - 1].to_vec()))
    }

    /// Build a BIP-44 path: `m/44'/coin_type'/account'/change/address_index`.
    pub fn bip44(coin_type: u32, account: u32, change: u32, address_index: u32) -> Result<Self> {
        Ok(Self::new(alloc::vec![
            DerivationIndex::hardened(44)?,
            DerivationIndex::hardened(coin_type)?,
            DerivationIndex::hardened(account)?,
            DerivationIndex::normal(change)?,
            DerivationIndex::normal(address_index)?,
        ]))
    }
}

/// Split and validate every segment; `None` on any grammar violation.
fn parse_segments(text: &str) -> Option<Vec<DerivationIndex>> {
    let text = text.trim();
    let text = text.strip_suffix('/').unwrap_or(text);

    let mut segments: Vec<&str> = text.split('/').map(str::trim).collect();

    if matches!(segments.first(), Some(&("m" | "M"))) {
        segments.remove(0);
    } else if segments.len() > 1 && segments[0].is_empty() {
        segments.remove(0);
    }

    segments.into_iter().map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Option<DerivationIndex> {
    let (digits, hardened) = match segment.strip_suffix(['\'', 'p', 'P']) {
        Some(digits) => (digits, true),
        None => (segment, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let base: u32 = digits.parse().ok()?;
    if hardened {
        DerivationIndex::hardened(base).ok()
    } else {
        DerivationIndex::normal(base).ok()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.indices.iter().enumerate() {
            if i > 0 {
                f.write_char('/')?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Infallible;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for DerivationPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for DerivationPath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl Default for DerivationPath {
    fn default() -> Self {
        Self::master()
    }
}

impl Index<usize> for DerivationPath {
    type Output = DerivationIndex;

    fn index(&self, position: usize) -> &Self::Output {
        &self.indices[position]
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = DerivationIndex;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, DerivationIndex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
