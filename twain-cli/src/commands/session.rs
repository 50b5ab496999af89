//! Interactive wallet session.

use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use twain::WordCount;
use twain_session::{ChainType, SessionConfig, SessionController, Wallet};
use zeroize::Zeroizing;

/// Start an interactive session.
#[derive(Args)]
pub struct SessionCommand {
    /// Import this phrase on start instead of beginning empty.
    #[arg(short, long)]
    mnemonic: Option<String>,
}

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ReplCommand {
    /// Generate a new phrase; wallets from the previous one are discarded.
    Generate {
        /// 12 or 24 words (defaults to --words).
        words: Option<usize>,
    },

    /// Import an existing phrase; 4-letter prefixes are expanded.
    Import {
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,
    },

    /// Derive the next wallet for a chain (sol or eth).
    Add { chain: ChainType },

    /// Delete the wallet at a list position.
    #[command(alias = "rm")]
    Delete { position: usize },

    /// Delete every wallet and forget the phrase.
    DeleteAll,

    /// List wallets.
    #[command(alias = "ls")]
    List,

    /// Show the current phrase.
    Mnemonic,

    /// Show the private key of the wallet at a list position.
    Reveal { position: usize },

    /// Leave the session.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

impl SessionCommand {
    /// Execute the session command.
    pub fn execute(self, config: SessionConfig) -> Result<(), Box<dyn std::error::Error>> {
        let mut session = SessionController::new(config);
        if let Some(phrase) = &self.mnemonic {
            session.import_mnemonic(phrase)?;
        }

        print_banner(&session);

        let stdin = io::stdin();
        let mut line = Zeroizing::new(String::new());
        loop {
            print!("{} ", "twain>".cyan().bold());
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                println!();
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let command = match ReplLine::try_parse_from(line.split_whitespace()) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    e.print()?;
                    continue;
                }
            };

            match apply(&mut session, command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => eprintln!("{} {e}", "error:".red().bold()),
            }
        }

        tracing::debug!(wallets = session.wallets().len(), "session ended");
        Ok(())
    }
}

/// Run one command against the session and print its outcome.
fn apply(session: &mut SessionController, command: ReplCommand) -> twain::Result<Flow> {
    match command {
        ReplCommand::Generate { words } => {
            let word_count = match words {
                Some(n) => WordCount::try_from(n)?,
                None => session.config().word_count,
            };
            let mnemonic = session.generate_mnemonic_with(word_count)?;
            print_mnemonic(mnemonic.phrase(), true);
        }
        ReplCommand::Import { phrase } => {
            let phrase = Zeroizing::new(phrase.join(" "));
            let mnemonic = session.import_mnemonic(&phrase)?;
            print_mnemonic(mnemonic.phrase(), false);
        }
        ReplCommand::Add { chain } => {
            let wallet = session.add_wallet(chain)?;
            print_wallet(session.wallets().len() - 1, &wallet);
        }
        ReplCommand::Delete { position } => {
            let wallet = session.delete_wallet(position)?;
            println!("  {} {}", "Deleted".yellow().bold(), wallet.address);
        }
        ReplCommand::DeleteAll => {
            session.delete_all();
            println!("  {}", "All wallets and the mnemonic were cleared.".yellow());
        }
        ReplCommand::List => print_list(session),
        ReplCommand::Mnemonic => match session.mnemonic() {
            Some(mnemonic) => print_mnemonic(mnemonic.phrase(), false),
            None => println!("  {}", "No mnemonic loaded.".dimmed()),
        },
        ReplCommand::Reveal { position } => {
            let secret = session.reveal_private_key(position)?;
            println!("  {}  {}", "Private Key".cyan().bold(), secret.as_str());
        }
        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[rustfmt::skip]
fn print_banner(session: &SessionController) {
    println!();
    println!("  {}  {}", "Twain".cyan().bold(), env!("CARGO_PKG_VERSION").dimmed());
    println!("  {}", "Type `help` for commands, `quit` to leave.".dimmed());
    println!("  {}  {}", "Index policy".cyan().bold(), session.config().index_policy.to_string().dimmed());
    if !session.is_active() {
        println!("  {}", "No mnemonic yet: run `generate` or `import <phrase>`.".yellow());
    }
    println!();
}

#[rustfmt::skip]
fn print_mnemonic(phrase: &str, generated: bool) {
    println!();
    println!("  {}  {}", "Mnemonic".cyan().bold(), phrase);
    if generated {
        println!("  {}", "Write it down; it is never stored.".yellow());
    }
    println!();
}

#[rustfmt::skip]
fn print_wallet(position: usize, wallet: &Wallet) {
    println!("  {}  {}  {}  {}",
        format!("[{position}]").dimmed(),
        format!("{:<8}", wallet.chain.name()).cyan().bold(),
        format!("{:<18}", wallet.path.to_string()).dimmed(),
        wallet.address.green(),
    );
}

fn print_list(session: &SessionController) {
    if session.wallets().is_empty() {
        println!("  {}", "No wallets.".dimmed());
        return;
    }
    for (position, wallet) in session.wallets().iter().enumerate() {
        print_wallet(position, wallet);
    }
    for chain in ChainType::ALL {
        if let Ok(next) = session.next_index(chain) {
            println!("  {} {} {}", "next".dimmed(), chain.id().dimmed(), next.to_string().dimmed());
        }
    }
}
