use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thousand::Action;
use thousand_shared::{CardFace, Snapshot};

#[derive(Parser, Debug, Clone)]
#[command(name = "thousand-cli", version, about = "Headless client for Thousand Online", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(long, default_value = "thousand-cli.toml")]
    pub config: PathBuf,

    /// Game server base URL, e.g. http://localhost:8080 (overrides config.server)
    #[arg(long)]
    pub server: Option<String>,

    /// Game session id (overrides config.session)
    #[arg(long)]
    pub session: Option<String>,

    /// Delay between polls in `watch` mode (overrides config.poll_interval_ms)
    #[arg(long)]
    pub interval_ms: Option<u32>,

    /// Persist CLI overrides back to the config file
    #[arg(long, default_value_t = false)]
    pub persist: bool,

    /// Print each snapshot as JSON instead of text. This is the decoded
    /// view (seats as an array), not the server's flat `/update` shape.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Log at debug level
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Poll continuously and print every change
    Watch,
    /// Fetch the current snapshot once and print it
    State,
    /// Deal the cards (dealer only)
    Deal,
    /// Bid with open cards
    Open,
    /// Bid blind
    Blind,
    /// Raise the bet, or fix the final bet
    Bet { upto: u32 },
    Pass,
    /// Take the bank after winning the bidding
    Collect,
    /// Take a plus instead of playing
    Plus,
    /// Play (or discard) a card, e.g. `put HQ`
    Put { card: CardFace },
    /// Take a discarded card back, e.g. `retrieve S10`
    Retrieve { card: CardFace },
    /// Say something in the game chat
    Chat { message: String },
}

impl Commands {
    /// The page action behind a one-shot subcommand. Cards are named on the
    /// command line; the slot they sit in comes from `current`.
    pub fn to_action(&self, current: Option<&Snapshot>) -> Result<Action> {
        let action = match self {
            Commands::Watch | Commands::State => bail!("not a game action"),
            Commands::Deal => Action::Deal,
            Commands::Open => Action::GoOpen,
            Commands::Blind => Action::GoBlind,
            Commands::Bet { upto } => Action::Bet(Some(*upto)),
            Commands::Pass => Action::Pass,
            Commands::Collect => Action::Collect,
            Commands::Plus => Action::TakePlus,
            Commands::Put { card } => {
                let slot = current
                    .and_then(|s| s.cards.iter().position(|c| c == card))
                    .ok_or_else(|| anyhow!("{} is not in your hand", card))?;
                Action::PutCard(slot)
            }
            Commands::Retrieve { card } => {
                let slot = current
                    .and_then(|s| s.bank.iter().position(|c| c.as_ref() == Some(card)))
                    .ok_or_else(|| anyhow!("{} is not on the table", card))?;
                Action::RetrieveCard(slot)
            }
            Commands::Chat { message } => Action::Chat(message.clone()),
        };
        Ok(action)
    }
}
