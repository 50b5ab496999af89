//! Ordered wallet registry with per-chain index bookkeeping.

use core::fmt;
use core::str::FromStr;

use twain::{Error, Result};

use crate::{ChainType, Wallet};

/// How the next account index for a chain is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexPolicy {
    /// A per-chain counter that only grows. Deleting a wallet never frees its
    /// index, so two live entries can never share a derivation path. The
    /// counters reset only when the phrase is replaced or cleared.
    #[default]
    Monotonic,
    /// The next index is the number of wallets of that chain currently in the
    /// registry. Deleting a non-last wallet and adding another re-derives an
    /// index that may still be in use. Indices whose derivation failed are
    /// stepped over.
    LiveCount,
}

impl IndexPolicy {
    /// Short identifier for CLI usage.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Monotonic => "monotonic",
            Self::LiveCount => "live-count",
        }
    }
}

impl fmt::Display for IndexPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for IndexPolicy {
    type Err = ParseIndexPolicyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monotonic" | "counter" => Ok(Self::Monotonic),
            "live-count" | "livecount" | "count" => Ok(Self::LiveCount),
            _ => Err(ParseIndexPolicyError(s.into())),
        }
    }
}

/// Error returned when parsing an unknown index policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIndexPolicyError(pub(crate) String);

impl fmt::Display for ParseIndexPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid index policy '{}', expected one of: monotonic, live-count",
            self.0
        )
    }
}

impl std::error::Error for ParseIndexPolicyError {}

/// Ordered sequence of derived wallets.
#[derive(Debug, Clone, Default)]
pub struct WalletRegistry {
    wallets: Vec<Wallet>,
    policy: IndexPolicy,
    /// Next unused index per chain, used by [`IndexPolicy::Monotonic`].
    counters: [u32; ChainType::ALL.len()],
    /// Indices whose derivation failed, per chain.
    failed: [Vec<u32>; ChainType::ALL.len()],
}

impl WalletRegistry {
    /// Create an empty registry.
    pub fn new(policy: IndexPolicy) -> Self {
        Self {
            wallets: Vec::new(),
            policy,
            counters: [0; ChainType::ALL.len()],
            failed: Default::default(),
        }
    }

    /// Index the next wallet of `chain` will be derived at.
    pub fn next_index(&self, chain: ChainType) -> Result<u32> {
        match self.policy {
            IndexPolicy::Monotonic => Ok(self.counters[chain.slot()]),
            IndexPolicy::LiveCount => {
                let failed = &self.failed[chain.slot()];
                let mut index = u32::try_from(self.count(chain))
                    .map_err(|_| Error::InvalidDerivationIndex(u32::MAX))?;
                while failed.contains(&index) {
                    index = index
                        .checked_add(1)
                        .ok_or(Error::InvalidDerivationIndex(index))?;
                }
                Ok(index)
            }
        }
    }

    /// Append a wallet, keeping insertion order.
    pub fn push(&mut self, wallet: Wallet) {
        self.mark_used(wallet.chain, wallet.account);
        self.wallets.push(wallet);
    }

    /// Record that deriving `index` for `chain` failed, so neither policy
    /// offers it again until the registry is cleared.
    pub fn mark_failed(&mut self, chain: ChainType, index: u32) {
        self.mark_used(chain, index);
        let failed = &mut self.failed[chain.slot()];
        if !failed.contains(&index) {
            failed.push(index);
        }
    }

    fn mark_used(&mut self, chain: ChainType, index: u32) {
        let counter = &mut self.counters[chain.slot()];
        *counter = (*counter).max(index.saturating_add(1));
    }

    /// Remove the wallet at `position`. Other entries are left untouched.
    pub fn remove(&mut self, position: usize) -> Option<Wallet> {
        (position < self.wallets.len()).then(|| self.wallets.remove(position))
    }

    /// Drop every wallet and reset the per-chain counters.
    pub fn clear(&mut self) {
        self.wallets.clear();
        self.counters = [0; ChainType::ALL.len()];
        self.failed = Default::default();
    }

    /// Wallet at `position`.
    pub fn get(&self, position: usize) -> Option<&Wallet> {
        self.wallets.get(position)
    }

    /// All wallets in insertion order.
    pub fn as_slice(&self) -> &[Wallet] {
        &self.wallets
    }

    /// Number of wallets of `chain`.
    pub fn count(&self, chain: ChainType) -> usize {
        self.wallets.iter().filter(|w| w.chain == chain).count()
    }

    /// Total number of wallets.
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    /// Whether the registry holds no wallets.
    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Active index policy.
    pub const fn policy(&self) -> IndexPolicy {
        self.policy
    }
}
