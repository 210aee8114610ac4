//! The `/update` snapshot: a flat JSON object describing what this player
//! currently sees. It is replaced wholesale on every poll.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::CardFace;
use crate::chat::{ChatCursor, ChatLine};

/// Game phase as seen from this player's seat
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameState {
    /// Waiting for players to join
    #[default]
    Hosted,
    /// Everyone is seated, the dealer may deal
    Ready,
    /// Choose between bidding open or blind
    OpenOrBlind,
    GoBlind,
    GoOpen,
    /// Bidding is over, the winner takes the bank
    Collect,
    /// Discard three cards and fix the final bet
    FinalBet,
    InGame,
    Finish,
    /// A state this client does not know; rendered with no controls
    Unknown(String),
}

impl GameState {
    pub fn as_str(&self) -> &str {
        match self {
            GameState::Hosted => "hosted",
            GameState::Ready => "ready",
            GameState::OpenOrBlind => "open_or_blind",
            GameState::GoBlind => "go_blind",
            GameState::GoOpen => "go_open",
            GameState::Collect => "collect",
            GameState::FinalBet => "finalBet",
            GameState::InGame => "inGame",
            GameState::Finish => "finish",
            GameState::Unknown(s) => s,
        }
    }
}

impl From<&str> for GameState {
    fn from(s: &str) -> Self {
        match s {
            // a snapshot without a state is a freshly hosted game
            "" | "hosted" => GameState::Hosted,
            "ready" => GameState::Ready,
            "open_or_blind" => GameState::OpenOrBlind,
            "go_blind" => GameState::GoBlind,
            "go_open" => GameState::GoOpen,
            "collect" => GameState::Collect,
            "finalBet" => GameState::FinalBet,
            "inGame" => GameState::InGame,
            "finish" => GameState::Finish,
            other => GameState::Unknown(other.to_string()),
        }
    }
}

impl From<String> for GameState {
    fn from(s: String) -> Self {
        GameState::from(s.as_str())
    }
}

impl From<GameState> for String {
    fn from(state: GameState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three seats, always relative to the viewing player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player,
    Opponent1,
    Opponent2,
}

impl Seat {
    pub const ALL: [Seat; 3] = [Seat::Player, Seat::Opponent1, Seat::Opponent2];

    /// Prefix used in snapshot keys and element ids
    pub fn key(self) -> &'static str {
        match self {
            Seat::Player => "player",
            Seat::Opponent1 => "opponent1",
            Seat::Opponent2 => "opponent2",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent1 => 1,
            Seat::Opponent2 => 2,
        }
    }
}

/// Per-seat panel: who sits there and what the server says about them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeatPanel {
    pub username: String,
    /// Preformatted, e.g. "120 points"
    pub points: String,
    /// e.g. "Pass" or "Bet 120 (Blind)"
    pub info: String,
    pub plus: bool,
    pub barrel: i64,
    pub turn: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSnapshot")]
pub struct Snapshot {
    /// Server timestamp of the response
    pub last: String,
    pub last_chat: Option<ChatCursor>,
    /// Chat lines newer than the cursor sent with the request
    pub chat: Vec<ChatLine>,
    pub info_header: String,
    pub state: GameState,
    /// Indexed by [`Seat::index`]
    pub seats: [SeatPanel; 3],
    /// Own hand, at most ten cards
    pub cards: Vec<CardFace>,
    /// Bank or current trick, three slots
    pub bank: Vec<Option<CardFace>>,
    /// Previous trick, only sent while playing
    pub memo: Vec<Option<CardFace>>,
    pub bettings: Option<Vec<u32>>,
    pub passed: bool,
    pub first: bool,
    pub trump: String,
    pub taken: String,
}

impl Snapshot {
    pub fn seat(&self, seat: Seat) -> &SeatPanel {
        &self.seats[seat.index()]
    }

    /// Whose turn it is. Falls through to the second opponent when no flag
    /// is set, which is how the page has always read it.
    pub fn turn_seat(&self) -> Seat {
        if self.seat(Seat::Player).turn {
            Seat::Player
        } else if self.seat(Seat::Opponent1).turn {
            Seat::Opponent1
        } else {
            Seat::Opponent2
        }
    }

    pub fn is_my_turn(&self) -> bool {
        self.seat(Seat::Player).turn
    }

    pub fn hand_card(&self, slot: usize) -> Option<CardFace> {
        self.cards.get(slot).copied()
    }

    pub fn bank_card(&self, slot: usize) -> Option<CardFace> {
        self.bank.get(slot).copied().flatten()
    }

    pub fn memo_card(&self, slot: usize) -> Option<CardFace> {
        self.memo.get(slot).copied().flatten()
    }
}

/// Wire shape. Seat fields are flat (`player_points`, `opponent1_turn`, ...)
/// and some flags arrive as `""` instead of `false`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSnapshot {
    #[serde(deserialize_with = "de::text")]
    last: String,
    last_chat: Option<ChatCursor>,
    #[serde(deserialize_with = "de::list")]
    chat: Vec<ChatLine>,
    #[serde(deserialize_with = "de::text")]
    info_header: String,
    #[serde(deserialize_with = "de::text")]
    state: String,

    #[serde(deserialize_with = "de::text")]
    player_username: String,
    #[serde(deserialize_with = "de::text")]
    player_points: String,
    #[serde(deserialize_with = "de::text")]
    player_info: String,
    #[serde(deserialize_with = "de::truthy")]
    player_plus: bool,
    #[serde(deserialize_with = "de::integer")]
    player_barrel: i64,
    #[serde(deserialize_with = "de::truthy")]
    player_turn: bool,

    #[serde(deserialize_with = "de::text")]
    opponent1_username: String,
    #[serde(deserialize_with = "de::text")]
    opponent1_points: String,
    #[serde(deserialize_with = "de::text")]
    opponent1_info: String,
    #[serde(deserialize_with = "de::truthy")]
    opponent1_plus: bool,
    #[serde(deserialize_with = "de::integer")]
    opponent1_barrel: i64,
    #[serde(deserialize_with = "de::truthy")]
    opponent1_turn: bool,

    #[serde(deserialize_with = "de::text")]
    opponent2_username: String,
    #[serde(deserialize_with = "de::text")]
    opponent2_points: String,
    #[serde(deserialize_with = "de::text")]
    opponent2_info: String,
    #[serde(deserialize_with = "de::truthy")]
    opponent2_plus: bool,
    #[serde(deserialize_with = "de::integer")]
    opponent2_barrel: i64,
    #[serde(deserialize_with = "de::truthy")]
    opponent2_turn: bool,

    #[serde(deserialize_with = "de::card_slots")]
    cards: Vec<Option<CardFace>>,
    #[serde(deserialize_with = "de::card_slots")]
    bank: Vec<Option<CardFace>>,
    #[serde(deserialize_with = "de::card_slots")]
    memo: Vec<Option<CardFace>>,
    bettings: Option<Vec<u32>>,
    #[serde(deserialize_with = "de::truthy")]
    passed: bool,
    #[serde(deserialize_with = "de::truthy")]
    first: bool,
    #[serde(deserialize_with = "de::text")]
    trump: String,
    #[serde(deserialize_with = "de::text")]
    taken: String,
}

impl From<RawSnapshot> for Snapshot {
    fn from(raw: RawSnapshot) -> Self {
        let seats = [
            SeatPanel {
                username: raw.player_username,
                points: raw.player_points,
                info: raw.player_info,
                plus: raw.player_plus,
                barrel: raw.player_barrel,
                turn: raw.player_turn,
            },
            SeatPanel {
                username: raw.opponent1_username,
                points: raw.opponent1_points,
                info: raw.opponent1_info,
                plus: raw.opponent1_plus,
                barrel: raw.opponent1_barrel,
                turn: raw.opponent1_turn,
            },
            SeatPanel {
                username: raw.opponent2_username,
                points: raw.opponent2_points,
                info: raw.opponent2_info,
                plus: raw.opponent2_plus,
                barrel: raw.opponent2_barrel,
                turn: raw.opponent2_turn,
            },
        ];

        Snapshot {
            last: raw.last,
            last_chat: raw.last_chat,
            chat: raw.chat,
            info_header: raw.info_header,
            state: GameState::from(raw.state),
            seats,
            cards: raw.cards.into_iter().flatten().collect(),
            bank: raw.bank,
            memo: raw.memo,
            bettings: raw.bettings,
            passed: raw.passed,
            first: raw.first,
            trump: raw.trump,
            taken: raw.taken,
        }
    }
}

/// Lenient field decoders for the loosely typed server output.
mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::cards::CardFace;

    /// Truthiness the way the page script reads flags
    pub fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }

    /// String that may be `null`
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(Option::<i64>::deserialize(d)?.unwrap_or_default())
    }

    /// List that may be `null`
    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
    }

    /// Card slots where `null`, `false` and `""` all mean an empty slot.
    /// A slot that cannot be read is left empty so the rest of the snapshot
    /// still renders.
    pub fn card_slots<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Option<CardFace>>, D::Error> {
        let raw: Option<Vec<Value>> = Deserialize::deserialize(d)?;
        Ok(raw.unwrap_or_default().into_iter().map(slot).collect())
    }

    fn slot(value: Value) -> Option<CardFace> {
        match value {
            Value::String(s) if !s.is_empty() => match s.parse() {
                Ok(card) => Some(card),
                Err(e) => {
                    tracing::warn!(code = %s, error = %e, "unreadable card slot");
                    None
                }
            },
            Value::String(_) | Value::Null | Value::Bool(false) => None,
            other => {
                tracing::warn!(slot = %other, "unexpected card slot");
                None
            }
        }
    }
}
