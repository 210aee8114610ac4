//! Pure view model: what the page should show for a snapshot. Keeping this
//! free of DOM types lets the render rules run natively under `cargo test`.

use thousand_shared::{CardFace, GameState, Seat, Snapshot};

pub const HAND_SLOTS: usize = 10;
pub const BANK_SLOTS: usize = 3;

pub const TITLE: &str = "1000 Online - Game";
pub const TITLE_MY_TURN: &str = "1000 Online - Game (Your turn)";

/// Toggleable controls, each backed by an element of the same id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Deal,
    Open,
    Blind,
    /// The bet `<select>`
    Bettings,
    Bet,
    Pass,
    Plus,
    Collect,
    /// "Show last trick"
    Last,
}

impl Control {
    pub const ALL: [Control; 9] = [
        Control::Deal,
        Control::Open,
        Control::Blind,
        Control::Bettings,
        Control::Bet,
        Control::Pass,
        Control::Plus,
        Control::Collect,
        Control::Last,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Control::Deal => "deal",
            Control::Open => "open",
            Control::Blind => "blind",
            Control::Bettings => "bettings",
            Control::Bet => "bet",
            Control::Pass => "pass",
            Control::Plus => "plus",
            Control::Collect => "collect",
            Control::Last => "last",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub seat: Seat,
    /// Username, with " (+)" once the seat took a plus
    pub username: String,
    pub points: String,
    pub info: String,
    pub turn: bool,
}

/// Work done only when the turn or the state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaint {
    pub title: &'static str,
    /// Shown controls; every other control is hidden
    pub visible: Vec<Control>,
    /// Replacement bet options, if the snapshot carried any
    pub bet_options: Option<Vec<u32>>,
    pub trump: String,
    pub taken: String,
}

impl Repaint {
    pub fn shows(&self, control: Control) -> bool {
        self.visible.contains(&control)
    }
}

/// Image URL per slot; `None` hides the slot
pub type Slots<const N: usize> = [Option<String>; N];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub info_header: String,
    pub seats: [SeatView; 3],
    pub repaint: Option<Repaint>,
    pub bank: Slots<BANK_SLOTS>,
    pub hand: Slots<HAND_SLOTS>,
    /// New chat lines, already formatted
    pub chat: Vec<String>,
}

impl Frame {
    pub fn build(snapshot: &Snapshot, repaint: bool, card_image_base: &str) -> Self {
        Frame {
            info_header: snapshot.info_header.clone(),
            seats: Seat::ALL.map(|seat| seat_view(snapshot, seat)),
            repaint: repaint.then(|| build_repaint(snapshot)),
            bank: slot_images(snapshot.bank.iter().copied(), card_image_base),
            hand: slot_images(snapshot.cards.iter().copied().map(Some), card_image_base),
            chat: snapshot.chat.iter().map(ToString::to_string).collect(),
        }
    }
}

pub fn seat_view(snapshot: &Snapshot, seat: Seat) -> SeatView {
    let panel = snapshot.seat(seat);
    let username = if panel.plus {
        format!("{} (+)", panel.username)
    } else {
        panel.username.clone()
    };
    SeatView {
        seat,
        username,
        points: panel.points.clone(),
        info: panel.info.clone(),
        turn: panel.turn,
    }
}

pub fn build_repaint(snapshot: &Snapshot) -> Repaint {
    let my_turn = snapshot.is_my_turn();
    let mut repaint = Repaint {
        title: if my_turn { TITLE_MY_TURN } else { TITLE },
        visible: Vec::new(),
        bet_options: None,
        trump: String::new(),
        taken: String::new(),
    };

    let bidding = |r: &mut Repaint| {
        if my_turn && !snapshot.passed {
            r.visible.extend([Control::Bettings, Control::Bet]);
            if !snapshot.first {
                r.visible.push(Control::Pass);
            }
            r.bet_options = snapshot.bettings.clone();
        }
    };

    match &snapshot.state {
        GameState::Ready if my_turn => repaint.visible.push(Control::Deal),
        GameState::OpenOrBlind => repaint.visible.extend([Control::Open, Control::Blind]),
        // A blind bidder may still look at the cards
        GameState::GoBlind => {
            repaint.visible.push(Control::Open);
            bidding(&mut repaint);
        }
        GameState::GoOpen => bidding(&mut repaint),
        GameState::Collect if my_turn => repaint.visible.push(Control::Collect),
        GameState::FinalBet if my_turn => {
            repaint.visible.extend([Control::Bettings, Control::Bet]);
            repaint.bet_options = snapshot.bettings.clone();
            if !snapshot.seat(Seat::Player).plus {
                repaint.visible.push(Control::Plus);
            }
        }
        GameState::InGame => {
            repaint.visible.push(Control::Last);
            repaint.trump = snapshot.trump.clone();
            repaint.taken = snapshot.taken.clone();
        }
        _ => {}
    }
    repaint
}

/// Bank slots while "show last trick" is held (`showing`) or released.
/// Outside of play there is no last trick and nothing changes.
pub fn last_trick_slots(
    snapshot: &Snapshot,
    showing: bool,
    card_image_base: &str,
) -> Option<Slots<BANK_SLOTS>> {
    if snapshot.state != GameState::InGame {
        return None;
    }
    let source = if showing { &snapshot.memo } else { &snapshot.bank };
    Some(slot_images(source.iter().copied(), card_image_base))
}

fn slot_images<const N: usize>(
    cards: impl Iterator<Item = Option<CardFace>>,
    card_image_base: &str,
) -> Slots<N> {
    let mut slots: Slots<N> = std::array::from_fn(|_| None);
    for (slot, card) in slots.iter_mut().zip(cards) {
        *slot = card.map(|c| c.image_url(card_image_base));
    }
    slots
}
