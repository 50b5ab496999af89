//! One-shot account derivation.

use clap::Args;
use colored::Colorize;
use twain::{DerivationPath, DerivedAccount, Mnemonic, Seed};
use twain_session::{ChainType, SessionConfig};

/// Derive accounts from a new or existing phrase and print them.
#[derive(Args)]
pub struct DeriveCommand {
    /// Chain to derive for (sol or eth).
    #[arg(short = 'c', long)]
    chain: ChainType,

    /// BIP39 mnemonic phrase; a new one is generated when omitted.
    #[arg(short, long)]
    mnemonic: Option<String>,

    /// Number of accounts to derive.
    #[arg(short = 'n', long, default_value = "1")]
    count: u32,

    /// First account index.
    #[arg(short, long, default_value = "0")]
    start: u32,

    /// Derive at one explicit path instead, e.g. m/44'/60'/0'/0/0.
    #[arg(long, conflicts_with_all = ["count", "start"])]
    path: Option<DerivationPath>,
}

impl DeriveCommand {
    /// Execute the derive command.
    pub fn execute(self, config: &SessionConfig) -> Result<(), Box<dyn std::error::Error>> {
        let (mnemonic, generated) = match &self.mnemonic {
            Some(phrase) => (Mnemonic::from_phrase(&twain::mnemonic::expand(phrase)?)?, false),
            None => (Mnemonic::generate(config.word_count)?, true),
        };
        let seed = Seed::derive(&mnemonic, &config.passphrase);

        let accounts = match &self.path {
            Some(path) => vec![derive_path(self.chain, &seed, path)?],
            None => derive_range(self.chain, &seed, self.start, self.count)?,
        };

        print_accounts(self.chain, &mnemonic, generated, !config.passphrase.is_empty(), &accounts);
        Ok(())
    }
}

fn derive_range(chain: ChainType, seed: &Seed, start: u32, count: u32) -> twain::Result<Vec<DerivedAccount>> {
    match chain {
        ChainType::Ed25519 => twain_svm::Deriver::new(seed).derive_many(start, count),
        ChainType::Secp256k1 => twain_evm::Deriver::new(seed).derive_many(start, count),
    }
}

fn derive_path(chain: ChainType, seed: &Seed, path: &DerivationPath) -> twain::Result<DerivedAccount> {
    match chain {
        ChainType::Ed25519 => twain_svm::Deriver::new(seed).derive_path(path),
        ChainType::Secp256k1 => twain_evm::Deriver::new(seed).derive_path(path),
    }
}

#[rustfmt::skip]
fn print_accounts(
    chain: ChainType,
    mnemonic: &Mnemonic,
    generated: bool,
    has_passphrase: bool,
    accounts: &[DerivedAccount],
) {
    println!();
    println!("      {}     {}", "Mnemonic".cyan().bold(), mnemonic.phrase());
    if generated {
        println!("      {}       {}", "Source".cyan().bold(), "(generated, write it down)".yellow());
    }
    if has_passphrase {
        println!("      {}   {}", "Passphrase".cyan().bold(), "(set)".dimmed());
    }
    println!("      {}        {}", "Chain".cyan().bold(), chain.name().dimmed());
    println!();

    for (i, account) in accounts.iter().enumerate() {
        if accounts.len() > 1 {
            println!("      {}      {}", "Account".cyan().bold(), format!("[{}]", account.account).dimmed());
        }
        println!("      {}         {}", "Path".cyan().bold(), account.path);
        println!("      {}      {}", "Address".cyan().bold(), account.address.green());
        println!("      {}   {}", "Public Key".cyan().bold(), account.public_key_hex.dimmed());
        println!("      {}  {}", "Private Key".cyan().bold(), account.secret.as_str());
        if i + 1 < accounts.len() {
            println!();
        }
    }
    println!();
}
