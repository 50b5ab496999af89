//! secp256k1 (Ethereum-style) accounts for Twain.
//!
//! Keys follow BIP-32 along `m/44'/60'/{account}'/0`: hardened purpose,
//! coin type and account, then a non-hardened external-chain step. The
//! address is the last 20 bytes of `keccak256(x || y)`, EIP-55 checksummed.
//!
//! # Usage
//!
//! ```
//! use twain::{Chain, Seed};
//! use twain_evm::Ethereum;
//!
//! let seed = Seed::from_phrase(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     "",
//! )?;
//! let account = Ethereum::derive_account(&seed, 0)?;
//! assert_eq!(account.address, "0xB8Fd42000d00202DCbCF5e18d6640d656345FD6A");
//! # Ok::<(), twain::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod address;
pub mod bip32;
mod deriver;

pub use address::{is_checksum_address, public_key_to_address, to_checksum_address};
pub use bip32::ExtendedPrivateKey;
pub use deriver::{Deriver, Ethereum, EthereumKeyPair, COIN_TYPE};
