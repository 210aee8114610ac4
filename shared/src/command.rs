//! Commands the client can send. Each one is a `POST /<path>?id=<session>`
//! with its arguments in the query string and an empty body.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::CardFace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Command {
    Deal,
    GoOpen,
    GoBlind,
    Bet { upto: u32 },
    Pass,
    Collect,
    TakePlus,
    Put { card: CardFace },
    Retrieve { card: CardFace },
    Chat { message: String },
}

impl Command {
    /// Endpoint path without the leading slash
    pub fn path(&self) -> &'static str {
        match self {
            Command::Deal => "deal",
            Command::GoOpen => "open",
            Command::GoBlind => "blind",
            Command::Bet { .. } => "bet",
            Command::Pass => "pass",
            Command::Collect => "collect",
            Command::TakePlus => "plus",
            Command::Put { .. } => "put",
            Command::Retrieve { .. } => "retrieve",
            Command::Chat { .. } => "chat",
        }
    }

    /// Query parameters beyond the session id
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Command::Bet { upto } => vec![("upto", upto.to_string())],
            Command::Put { card } | Command::Retrieve { card } => vec![("card", card.to_string())],
            Command::Chat { message } => vec![("message", message.clone())],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())?;
        for (key, value) in self.params() {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}
