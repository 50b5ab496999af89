//! The session state machine.

use core::fmt;

use twain::{Error, Mnemonic, Result, Seed, WordCount};
use zeroize::Zeroizing;

use crate::{ChainType, IndexPolicy, Wallet, WalletRegistry};

/// Settings that shape a session.
#[derive(Clone, Default)]
pub struct SessionConfig {
    /// Length of generated phrases.
    pub word_count: WordCount,
    /// Optional BIP-39 passphrase mixed into the seed (empty for none).
    pub passphrase: Zeroizing<String>,
    /// How account indices are assigned.
    pub index_policy: IndexPolicy,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("word_count", &self.word_count)
            .field("passphrase", &if self.passphrase.is_empty() { "" } else { "[REDACTED]" })
            .field("index_policy", &self.index_policy)
            .finish()
    }
}

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No phrase loaded; adding wallets is refused.
    Empty,
    /// A phrase and its seed are loaded.
    Active,
}

/// The phrase in use together with the seed stretched from it.
struct Lineage {
    mnemonic: Mnemonic,
    seed: Seed,
}

/// Single owner of the phrase, the seed and the wallet list.
///
/// Every operation computes its complete result before touching state, so a
/// failed call leaves the session exactly as it was.
pub struct SessionController {
    config: SessionConfig,
    lineage: Option<Lineage>,
    registry: WalletRegistry,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("config", &self.config)
            .field("status", &self.status())
            .field("wallets", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Create an empty session.
    pub fn new(config: SessionConfig) -> Self {
        let registry = WalletRegistry::new(config.index_policy);
        Self {
            config,
            lineage: None,
            registry,
        }
    }

    /// Generate a fresh phrase of the configured length.
    ///
    /// Replaces any previous phrase and seed and empties the wallet list.
    pub fn generate_mnemonic(&mut self) -> Result<&Mnemonic> {
        self.generate_mnemonic_with(self.config.word_count)
    }

    /// Generate a fresh phrase of `word_count` words.
    pub fn generate_mnemonic_with(&mut self, word_count: WordCount) -> Result<&Mnemonic> {
        let mnemonic = Mnemonic::generate(word_count)?;
        tracing::info!(words = word_count.words(), "generated new mnemonic");
        Ok(self.start_lineage(mnemonic))
    }

    /// Start a session from an existing phrase.
    ///
    /// Unambiguous word prefixes of four or more letters are expanded. The
    /// checksum must validate.
    pub fn import_mnemonic(&mut self, phrase: &str) -> Result<&Mnemonic> {
        let expanded = Zeroizing::new(twain::mnemonic::expand(phrase)?);
        let mnemonic = Mnemonic::from_phrase(&expanded)?;
        tracing::info!(words = mnemonic.word_count().words(), "imported mnemonic");
        Ok(self.start_lineage(mnemonic))
    }

    fn start_lineage(&mut self, mnemonic: Mnemonic) -> &Mnemonic {
        let seed = Seed::derive(&mnemonic, &self.config.passphrase);
        self.registry.clear();
        &self.lineage.insert(Lineage { mnemonic, seed }).mnemonic
    }

    /// Derive the next wallet of `chain` and append it.
    ///
    /// # Errors
    ///
    /// [`Error::PreconditionNotMet`] when no phrase is loaded. Derivation
    /// errors are propagated; an index that hit [`Error::ScalarOverflow`] is
    /// skipped on the next attempt under either policy.
    pub fn add_wallet(&mut self, chain: ChainType) -> Result<Wallet> {
        let Some(lineage) = &self.lineage else {
            return Err(Error::PreconditionNotMet("no mnemonic loaded; generate or import one first"));
        };
        let account = self.registry.next_index(chain)?;

        match Wallet::derive(&lineage.seed, chain, account) {
            Ok(wallet) => {
                tracing::info!(chain = chain.id(), account, address = %wallet.address, "added wallet");
                self.registry.push(wallet.clone());
                Ok(wallet)
            }
            Err(err @ Error::ScalarOverflow { .. }) => {
                tracing::warn!(chain = chain.id(), account, "derived key out of range, index skipped");
                self.registry.mark_failed(chain, account);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Remove the wallet at `position` (zero-based, display order).
    ///
    /// # Errors
    ///
    /// [`Error::PreconditionNotMet`] when `position` is out of range; the
    /// list is left unchanged.
    pub fn delete_wallet(&mut self, position: usize) -> Result<Wallet> {
        let wallet = self
            .registry
            .remove(position)
            .ok_or(Error::PreconditionNotMet("no wallet at that position"))?;
        tracing::info!(chain = wallet.chain.id(), account = wallet.account, position, "deleted wallet");
        Ok(wallet)
    }

    /// Forget every wallet, the phrase and the seed.
    pub fn delete_all(&mut self) {
        let removed = self.registry.len();
        self.registry.clear();
        self.lineage = None;
        tracing::info!(removed, "cleared session");
    }

    /// Re-derive the private key of the wallet at `position`.
    ///
    /// Hex (`0x`-prefixed) for secp256k1, base-58 64-byte keypair for Ed25519.
    pub fn reveal_private_key(&self, position: usize) -> Result<Zeroizing<String>> {
        let Some(lineage) = &self.lineage else {
            return Err(Error::PreconditionNotMet("no mnemonic loaded"));
        };
        let wallet = self
            .registry
            .get(position)
            .ok_or(Error::PreconditionNotMet("no wallet at that position"))?;

        let derived = wallet.chain.derive(&lineage.seed, wallet.account)?;
        tracing::info!(chain = wallet.chain.id(), account = wallet.account, "revealed private key");
        Ok(derived.secret)
    }

    /// Wallets in insertion order.
    pub fn wallets(&self) -> &[Wallet] {
        self.registry.as_slice()
    }

    /// The phrase in use, if any.
    pub fn mnemonic(&self) -> Option<&Mnemonic> {
        self.lineage.as_ref().map(|l| &l.mnemonic)
    }

    /// Whether a phrase is loaded.
    pub const fn is_active(&self) -> bool {
        self.lineage.is_some()
    }

    /// Current coarse state.
    pub const fn status(&self) -> SessionStatus {
        if self.is_active() {
            SessionStatus::Active
        } else {
            SessionStatus::Empty
        }
    }

    /// Index the next [`add_wallet`](Self::add_wallet) for `chain` would use.
    pub fn next_index(&self, chain: ChainType) -> Result<u32> {
        self.registry.next_index(chain)
    }

    /// Session settings.
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }
}
