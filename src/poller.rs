//! Poll bookkeeping shared by the page loop and the CLI watcher.
//!
//! Only three things outlive a snapshot: the (turn, state) pair that was
//! last painted, the chat cursor, and the newest poll ticket. Everything
//! else is rebuilt from the incoming snapshot.

use std::cell::RefCell;

use thousand_shared::{ChatCursor, GameState, Seat, Snapshot};

use crate::api::GameClient;
use crate::error::ClientError;
use crate::view::Frame;

/// Identifies one poll request. Only the newest ticket may be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollTicket(u64);

/// Remembers what was last painted so controls are only rebuilt when the
/// turn moves or the state changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepaintTracker {
    last: Option<(Seat, GameState)>,
}

impl RepaintTracker {
    fn key(snapshot: &Snapshot) -> (Seat, GameState) {
        (snapshot.turn_seat(), snapshot.state.clone())
    }

    /// True if `snapshot` differs from what was last painted
    pub fn needs_repaint(&self, snapshot: &Snapshot) -> bool {
        self.last.as_ref() != Some(&Self::key(snapshot))
    }

    /// Record `snapshot` as painted; true if the page needed a repaint
    pub fn observe(&mut self, snapshot: &Snapshot) -> bool {
        let repaint = self.needs_repaint(snapshot);
        self.last = Some(Self::key(snapshot));
        repaint
    }

    /// Forget the painted state so the next snapshot repaints
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[derive(Debug)]
pub struct PollState {
    issued: u64,
    tracker: RepaintTracker,
    cursor: Option<ChatCursor>,
    current: Option<Snapshot>,
    card_image_base: String,
}

impl PollState {
    pub fn new(card_image_base: impl Into<String>) -> Self {
        Self {
            issued: 0,
            tracker: RepaintTracker::default(),
            cursor: None,
            current: None,
            card_image_base: card_image_base.into(),
        }
    }

    /// Start a poll. Any ticket handed out earlier becomes stale.
    pub fn begin(&mut self) -> PollTicket {
        self.issued += 1;
        PollTicket(self.issued)
    }

    pub fn cursor(&self) -> Option<&ChatCursor> {
        self.cursor.as_ref()
    }

    /// The snapshot currently on screen
    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn card_image_base(&self) -> &str {
        &self.card_image_base
    }

    /// Take in the response to `ticket`. Returns the frame to render, or
    /// `None` when a newer poll was started in the meantime. Call
    /// [`PollState::painted`] once the frame is on screen.
    pub fn accept(&mut self, ticket: PollTicket, snapshot: Snapshot) -> Option<Frame> {
        if ticket.0 != self.issued {
            tracing::debug!(
                ticket = ticket.0,
                newest = self.issued,
                "dropping stale snapshot"
            );
            return None;
        }

        let repaint = self.tracker.needs_repaint(&snapshot);
        if repaint {
            tracing::debug!(state = %snapshot.state, turn = ?snapshot.turn_seat(), "repaint");
        }
        let frame = Frame::build(&snapshot, repaint, &self.card_image_base);
        self.current = Some(snapshot);
        Some(frame)
    }

    /// Record that the frame from the last `accept` reached the screen.
    /// Until then the chat cursor and the repaint key stay put, so a paint
    /// that fails halfway is redone in full by the next poll.
    pub fn painted(&mut self) {
        if let Some(snapshot) = &self.current {
            if let Some(cursor) = &snapshot.last_chat {
                self.cursor = Some(cursor.clone());
            }
            self.tracker.observe(snapshot);
        }
    }
}

/// One poll cycle against shared state. The state is never borrowed across
/// the request, so actions may start their own poll concurrently.
pub async fn poll_once(
    client: &GameClient,
    state: &RefCell<PollState>,
) -> Result<Option<Frame>, ClientError> {
    let (ticket, cursor) = {
        let mut state = state.borrow_mut();
        let ticket = state.begin();
        (ticket, state.cursor().cloned())
    };
    let snapshot = client.fetch_snapshot(cursor.as_ref()).await?;
    Ok(state.borrow_mut().accept(ticket, snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use thousand_shared::ChatLine;

    fn snap(state: GameState, turn: Seat) -> Snapshot {
        let mut s = Snapshot {
            state,
            ..Default::default()
        };
        s.seats[turn.index()].turn = true;
        s
    }

    #[test]
    fn repaints_only_on_turn_or_state_change() {
        let mut tracker = RepaintTracker::default();
        assert!(tracker.observe(&snap(GameState::GoOpen, Seat::Player)));
        assert!(!tracker.observe(&snap(GameState::GoOpen, Seat::Player)));
        assert!(tracker.observe(&snap(GameState::GoOpen, Seat::Opponent1)));
        assert!(tracker.observe(&snap(GameState::Collect, Seat::Opponent1)));
        assert!(!tracker.observe(&snap(GameState::Collect, Seat::Opponent1)));
        tracker.reset();
        assert!(tracker.observe(&snap(GameState::Collect, Seat::Opponent1)));
    }

    #[test]
    fn no_turn_flag_counts_as_second_opponent() {
        let mut tracker = RepaintTracker::default();
        assert!(tracker.observe(&snap(GameState::Hosted, Seat::Opponent2)));
        let nobody = Snapshot::default();
        assert!(!tracker.observe(&nobody));
    }

    #[test]
    fn stale_ticket_is_dropped() {
        let mut state = PollState::new("/images/cards");
        let first = state.begin();
        let second = state.begin();

        assert!(state.accept(first, snap(GameState::Ready, Seat::Player)).is_none());
        assert!(state.current().is_none());

        let frame = state
            .accept(second, snap(GameState::InGame, Seat::Player))
            .expect("newest ticket renders");
        assert!(frame.repaint.is_some());
        assert_eq!(state.current().map(|s| &s.state), Some(&GameState::InGame));
    }

    #[test]
    fn a_stale_reply_does_not_disturb_the_repaint_key() {
        let mut state = PollState::new("/images/cards");
        let t = state.begin();
        state.accept(t, snap(GameState::Ready, Seat::Player));
        state.painted();

        let old = state.begin();
        let new = state.begin();
        assert!(state.accept(old, snap(GameState::Finish, Seat::Player)).is_none());
        let frame = state.accept(new, snap(GameState::Ready, Seat::Player)).unwrap();
        assert!(frame.repaint.is_none());
    }

    #[test]
    fn chat_cursor_advances_and_sticks() {
        let mut state = PollState::new("/images/cards");
        assert!(state.cursor().is_none());

        let mut s = snap(GameState::Hosted, Seat::Player);
        s.last_chat = Some(ChatCursor("100.0".into()));
        s.chat = vec![ChatLine {
            datetime: "2010.01.01 00:01:40".into(),
            player: "alice".into(),
            message: "hello".into(),
        }];
        let t = state.begin();
        let frame = state.accept(t, s).unwrap();
        assert_eq!(frame.chat.len(), 1);
        assert!(state.cursor().is_none());
        state.painted();
        assert_eq!(state.cursor(), Some(&ChatCursor("100.0".into())));

        // no new lines: the server omits last_chat, the cursor stays
        let t = state.begin();
        let frame = state.accept(t, snap(GameState::Hosted, Seat::Player)).unwrap();
        assert!(frame.chat.is_empty());
        state.painted();
        assert_eq!(state.cursor(), Some(&ChatCursor("100.0".into())));
    }

    #[test]
    fn unpainted_frame_is_redone_by_the_next_poll() {
        let mut state = PollState::new("/images/cards");
        let mut s = snap(GameState::GoOpen, Seat::Player);
        s.last_chat = Some(ChatCursor("200.0".into()));

        let t = state.begin();
        assert!(state.accept(t, s.clone()).unwrap().repaint.is_some());
        // paint failed: nothing is marked as shown
        assert!(state.cursor().is_none());

        let t = state.begin();
        let frame = state.accept(t, s).unwrap();
        assert!(frame.repaint.is_some());
        state.painted();
        assert_eq!(state.cursor(), Some(&ChatCursor("200.0".into())));

        let t = state.begin();
        let frame = state.accept(t, snap(GameState::GoOpen, Seat::Player)).unwrap();
        assert!(frame.repaint.is_none());
    }
}
