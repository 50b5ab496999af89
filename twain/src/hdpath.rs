//! Hierarchical deterministic derivation paths.
//!
//! Parses and renders paths like `m/44'/501'/0'/0'` as a sequence of
//! [`ChildIndex`] values. Which steps a curve accepts is up to its deriver:
//! SLIP-0010 Ed25519 refuses [`ChildIndex::Normal`], BIP-32 takes both.

use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

/// A child index in a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) index: 0 to 2^31 - 1.
    Normal(u32),
    /// Hardened index: displayed as `n'`, stored as `n`.
    Hardened(u32),
}

impl ChildIndex {
    /// The offset for hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Create a normal (non-hardened) child index.
    pub const fn normal(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            Err(Error::InvalidDerivationIndex(index))
        } else {
            Ok(Self::Normal(index))
        }
    }

    /// Create a hardened child index.
    pub const fn hardened(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            Err(Error::InvalidDerivationIndex(index))
        } else {
            Ok(Self::Hardened(index))
        }
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Get the index value without the hardened flag.
    pub const fn index(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// The raw `u32` fed to the HMAC, hardened bit included.
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }
}

impl From<ChildIndex> for u32 {
    fn from(index: ChildIndex) -> Self {
        index.to_u32()
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{i}"),
            Self::Hardened(i) => write!(f, "{i}'"),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidDerivationPath(s.to_owned());

        match s.strip_suffix(['\'', 'h', 'H']) {
            Some(index) => Self::hardened(index.parse().map_err(|_| invalid())?),
            None => Self::normal(s.parse().map_err(|_| invalid())?),
        }
    }
}

/// A derivation path, e.g. `m/44'/60'/0'/0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// Exclusive upper bound for the account index of [`Self::account`].
    ///
    /// `2^31 - 1` is the largest hardened index and is reserved.
    pub const ACCOUNT_CEILING: u32 = ChildIndex::HARDENED_OFFSET - 1;

    /// The empty path (master key).
    pub fn master() -> Self {
        Self::default()
    }

    /// Create a path from child indices.
    pub fn new(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }

    /// Four-level account template `m/44'/coin_type'/account'/change`.
    ///
    /// `hardened_change` selects `0'` (SLIP-0010 chains) or `0` (BIP-32 chains).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDerivationIndex`] if `account` is at or above
    /// [`Self::ACCOUNT_CEILING`].
    pub fn account(coin_type: u32, account: u32, change: u32, hardened_change: bool) -> Result<Self> {
        if account >= Self::ACCOUNT_CEILING {
            return Err(Error::InvalidDerivationIndex(account));
        }
        let change = if hardened_change {
            ChildIndex::hardened(change)?
        } else {
            ChildIndex::normal(change)?
        };
        Ok(Self::new(vec![
            ChildIndex::hardened(44)?,
            ChildIndex::hardened(coin_type)?,
            ChildIndex::hardened(account)?,
            change,
        ]))
    }

    /// Parse a derivation path.
    ///
    /// Accepts `m/44'/60'/0'/0`, `m/44h/60h/0h/0` and `44'/60'/0'/0`.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() || path == "m" || path == "M" {
            return Ok(Self::master());
        }

        let rest = path
            .strip_prefix("m/")
            .or_else(|| path.strip_prefix("M/"))
            .unwrap_or(path);

        rest.split('/')
            .map(|component| {
                if component.is_empty() {
                    Err(Error::InvalidDerivationPath(path.to_owned()))
                } else {
                    component.parse()
                }
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Get the child indices in this path.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Number of levels in this path.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Whether every step is hardened.
    pub fn is_fully_hardened(&self) -> bool {
        self.indices.iter().all(ChildIndex::is_hardened)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.indices {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_index_normal() {
        let index = ChildIndex::normal(0).unwrap();
        assert!(!index.is_hardened());
        assert_eq!(index.to_u32(), 0);
        assert_eq!(index.to_string(), "0");
    }

    #[test]
    fn child_index_hardened() {
        let index = ChildIndex::hardened(44).unwrap();
        assert!(index.is_hardened());
        assert_eq!(index.index(), 44);
        assert_eq!(index.to_u32(), 44 | 0x8000_0000);
        assert_eq!(index.to_string(), "44'");
    }

    #[test]
    fn child_index_rejects_hardened_bit() {
        assert!(matches!(
            ChildIndex::hardened(0x8000_0000),
            Err(Error::InvalidDerivationIndex(0x8000_0000))
        ));
        assert!(ChildIndex::normal(u32::MAX).is_err());
        assert!(ChildIndex::hardened(0x7FFF_FFFF).is_ok());
    }

    #[test]
    fn child_index_parse() {
        assert_eq!("44".parse::<ChildIndex>().unwrap(), ChildIndex::Normal(44));
        assert_eq!("44'".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
        assert_eq!("44h".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
        assert_eq!("44H".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
        assert!("x'".parse::<ChildIndex>().is_err());
    }

    #[test]
    fn path_parse_and_display() {
        let path: DerivationPath = "m/44'/60'/0'/0".parse().unwrap();
        assert_eq!(path.depth(), 4);
        assert_eq!(path.indices()[3], ChildIndex::Normal(0));
        assert_eq!(path.to_string(), "m/44'/60'/0'/0");

        let bare: DerivationPath = "44h/501h/0h/0h".parse().unwrap();
        assert_eq!(bare.to_string(), "m/44'/501'/0'/0'");
        assert!(bare.is_fully_hardened());
    }

    #[test]
    fn path_rejects_empty_component() {
        assert!(DerivationPath::parse("m/44'//0").is_err());
        assert!(DerivationPath::parse("m/44'/abc").is_err());
    }

    #[test]
    fn master_path() {
        let path = DerivationPath::parse("m").unwrap();
        assert_eq!(path.depth(), 0);
        assert_eq!(path.to_string(), "m");
    }

    #[test]
    fn account_templates() {
        let sol = DerivationPath::account(501, 7, 0, true).unwrap();
        assert_eq!(sol.to_string(), "m/44'/501'/7'/0'");

        let eth = DerivationPath::account(60, 7, 0, false).unwrap();
        assert_eq!(eth.to_string(), "m/44'/60'/7'/0");
        assert!(!eth.is_fully_hardened());
    }

    #[test]
    fn account_template_rejects_hardened_bit() {
        assert!(matches!(
            DerivationPath::account(60, 0x8000_0000, 0, false),
            Err(Error::InvalidDerivationIndex(_))
        ));
    }

    #[test]
    fn account_template_ceiling() {
        assert!(DerivationPath::account(501, 0x7FFF_FFFE, 0, true).is_ok());
        assert!(matches!(
            DerivationPath::account(501, 0x7FFF_FFFF, 0, true),
            Err(Error::InvalidDerivationIndex(0x7FFF_FFFF))
        ));
        // Explicit paths may still use the top hardened index.
        assert!(DerivationPath::parse("m/44'/60'/2147483647'/0").is_ok());
    }
}
