//! Session management for Twain.
//!
//! A [`SessionController`] owns the current recovery phrase, its seed and
//! the ordered [`WalletRegistry`] of accounts derived from them. Every
//! mutation goes through the controller:
//!
//! ```text
//! Empty --generate/import--> Active --add*--> Active[with wallets]
//!   ^                          |  ^               |
//!   +-------- delete_all ------+  +-- delete_one -+
//! ```
//!
//! Generating or importing a new phrase from any state starts a new,
//! empty lineage.
//!
//! # Example
//!
//! ```
//! use twain_session::{ChainType, SessionConfig, SessionController};
//!
//! let mut session = SessionController::new(SessionConfig::default());
//! session.import_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//! )?;
//! let wallet = session.add_wallet(ChainType::Ed25519)?;
//! assert_eq!(wallet.address, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
//! # Ok::<(), twain::Error>(())
//! ```

#![forbid(unsafe_code)]

mod chain;
mod registry;
mod session;
mod wallet;

pub use chain::{ChainType, ParseChainTypeError};
pub use registry::{IndexPolicy, ParseIndexPolicyError, WalletRegistry};
pub use session::{SessionConfig, SessionController, SessionStatus};
pub use wallet::Wallet;
