//! User actions and the commands they turn into.
//!
//! The server is the authority on every move. The checks here only keep
//! obviously pointless requests (clicking a face-down card, playing out of
//! turn) off the wire, the way the page always has.

use std::cell::RefCell;

use thousand_shared::{CardFace, Command, GameState, Snapshot};

use crate::api::GameClient;
use crate::error::ClientError;
use crate::poller::{poll_once, PollState};
use crate::view::Frame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Deal,
    GoOpen,
    GoBlind,
    /// Bet the value currently selected, if any
    Bet(Option<u32>),
    Pass,
    Collect,
    TakePlus,
    /// Play the card in hand slot `n` (zero based)
    PutCard(usize),
    /// Take back the card in bank slot `n` while discarding
    RetrieveCard(usize),
    Chat(String),
}

/// Translate `action` into a command, or `None` when the click should be
/// ignored given what is on screen.
pub fn command_for(action: &Action, current: Option<&Snapshot>) -> Option<Command> {
    match action {
        Action::Deal => Some(Command::Deal),
        Action::GoOpen => Some(Command::GoOpen),
        Action::GoBlind => Some(Command::GoBlind),
        Action::Pass => Some(Command::Pass),
        Action::Collect => Some(Command::Collect),
        Action::TakePlus => Some(Command::TakePlus),
        Action::Bet(selected) => selected.map(|upto| Command::Bet { upto }),
        Action::PutCard(slot) => {
            let snapshot = current.filter(|s| s.is_my_turn())?;
            let card = face_up(snapshot.hand_card(*slot))?;
            Some(Command::Put { card })
        }
        Action::RetrieveCard(slot) => {
            let snapshot =
                current.filter(|s| s.is_my_turn() && s.state == GameState::FinalBet)?;
            let card = face_up(snapshot.bank_card(*slot))?;
            Some(Command::Retrieve { card })
        }
        Action::Chat(text) => {
            let message = text.trim();
            (!message.is_empty()).then(|| Command::Chat {
                message: message.to_string(),
            })
        }
    }
}

fn face_up(card: Option<CardFace>) -> Option<CardFace> {
    card.filter(|c| !c.is_back())
}

/// Send the command for `action` and poll right away. A failed send is
/// logged; the poll still runs so the page reflects whatever the server
/// decided. Ignored actions neither send nor poll.
pub async fn dispatch(
    client: &GameClient,
    state: &RefCell<PollState>,
    action: Action,
) -> Result<Option<Frame>, ClientError> {
    let command = command_for(&action, state.borrow().current());
    let Some(command) = command else {
        tracing::debug!(?action, "action ignored");
        return Ok(None);
    };

    if let Err(err) = client.send(&command).await {
        tracing::warn!(%command, error = %err, "command failed");
    }
    poll_once(client, state).await
}
