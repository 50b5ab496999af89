//! The closed set of supported account schemes.

use core::fmt;
use core::str::FromStr;

use twain::{Chain, DerivationPath, DerivedAccount, Result, Seed};
use twain_evm::Ethereum;
use twain_svm::Solana;

/// Account scheme a wallet is derived under.
///
/// Each variant dispatches to its own HD algorithm; the two are never
/// mixed. Adding a chain means adding a variant and one match arm per method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainType {
    /// Solana-style: SLIP-0010 Ed25519, base-58 address.
    Ed25519,
    /// Ethereum-style: BIP-32 secp256k1, EIP-55 address.
    Secp256k1,
}

impl ChainType {
    /// Every supported chain, in display order.
    pub const ALL: [Self; 2] = [Self::Ed25519, Self::Secp256k1];

    /// Account path for `account` under this chain's template.
    pub fn account_path(self, account: u32) -> Result<DerivationPath> {
        match self {
            Self::Ed25519 => Solana::account_path(account),
            Self::Secp256k1 => Ethereum::account_path(account),
        }
    }

    /// Run the full derive / synthesize / encode pipeline for one account.
    pub fn derive(self, seed: &Seed, account: u32) -> Result<DerivedAccount> {
        match self {
            Self::Ed25519 => Solana::derive_account(seed, account),
            Self::Secp256k1 => Ethereum::derive_account(seed, account),
        }
    }

    /// Human-readable network name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ed25519 => "Solana",
            Self::Secp256k1 => "Ethereum",
        }
    }

    /// Short identifier for CLI usage.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Ed25519 => "sol",
            Self::Secp256k1 => "eth",
        }
    }

    /// Position of this chain's counter in per-chain tables.
    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Ed25519 => 0,
            Self::Secp256k1 => 1,
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChainType {
    type Err = ParseChainTypeError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sol" | "solana" | "ed25519" => Ok(Self::Ed25519),
            "eth" | "ethereum" | "evm" | "secp256k1" => Ok(Self::Secp256k1),
            _ => Err(ParseChainTypeError(s.into())),
        }
    }
}

/// Error returned when parsing an unknown chain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChainTypeError(pub(crate) String);

impl fmt::Display for ParseChainTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chain '{}', expected one of: sol, eth", self.0)
    }
}

impl std::error::Error for ParseChainTypeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_aliases() {
        assert_eq!("sol".parse::<ChainType>().unwrap(), ChainType::Ed25519);
        assert_eq!("Solana".parse::<ChainType>().unwrap(), ChainType::Ed25519);
        assert_eq!("eth".parse::<ChainType>().unwrap(), ChainType::Secp256k1);
        assert_eq!("EVM".parse::<ChainType>().unwrap(), ChainType::Secp256k1);
        assert!("btc".parse::<ChainType>().is_err());
    }

    #[test]
    fn account_paths() {
        assert_eq!(ChainType::Ed25519.account_path(2).unwrap().to_string(), "m/44'/501'/2'/0'");
        assert_eq!(ChainType::Secp256k1.account_path(2).unwrap().to_string(), "m/44'/60'/2'/0");
    }

    #[test]
    fn slots_are_distinct() {
        assert_ne!(ChainType::Ed25519.slot(), ChainType::Secp256k1.slot());
    }
}
