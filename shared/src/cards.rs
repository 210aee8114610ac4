//! Card faces as the server names them ("HQ", "S10", "BACK").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardSuit {
    Spades,
    Clubs,
    Diamonds,
    Hearts,
}

impl CardSuit {
    pub const ALL: [CardSuit; 4] = [
        CardSuit::Spades,
        CardSuit::Clubs,
        CardSuit::Diamonds,
        CardSuit::Hearts,
    ];

    /// Leading letter of a card code
    pub fn letter(self) -> char {
        match self {
            CardSuit::Spades => 'S',
            CardSuit::Clubs => 'C',
            CardSuit::Diamonds => 'D',
            CardSuit::Hearts => 'H',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CardSuit::Spades => "Spades",
            CardSuit::Clubs => "Clubs",
            CardSuit::Diamonds => "Diamonds",
            CardSuit::Hearts => "Hearts",
        }
    }

    /// Suit symbol for terminal output
    pub fn symbol(self) -> char {
        match self {
            CardSuit::Spades => '♠',
            CardSuit::Clubs => '♣',
            CardSuit::Diamonds => '♦',
            CardSuit::Hearts => '♥',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, CardSuit::Hearts | CardSuit::Diamonds)
    }

    fn from_letter(c: char) -> Option<Self> {
        CardSuit::ALL.into_iter().find(|s| s.letter() == c)
    }
}

/// Card value. The Thousand deck only uses nine through ace, but the
/// server's generic card type accepts the full range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardValue {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl CardValue {
    pub const ALL: [CardValue; 13] = [
        CardValue::Two,
        CardValue::Three,
        CardValue::Four,
        CardValue::Five,
        CardValue::Six,
        CardValue::Seven,
        CardValue::Eight,
        CardValue::Nine,
        CardValue::Ten,
        CardValue::Jack,
        CardValue::Queen,
        CardValue::King,
        CardValue::Ace,
    ];

    /// Value part of a card code
    pub fn code(self) -> &'static str {
        match self {
            CardValue::Two => "2",
            CardValue::Three => "3",
            CardValue::Four => "4",
            CardValue::Five => "5",
            CardValue::Six => "6",
            CardValue::Seven => "7",
            CardValue::Eight => "8",
            CardValue::Nine => "9",
            CardValue::Ten => "10",
            CardValue::Jack => "J",
            CardValue::Queen => "Q",
            CardValue::King => "K",
            CardValue::Ace => "A",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CardValue::Two => "Two",
            CardValue::Three => "Three",
            CardValue::Four => "Four",
            CardValue::Five => "Five",
            CardValue::Six => "Six",
            CardValue::Seven => "Seven",
            CardValue::Eight => "Eight",
            CardValue::Nine => "Nine",
            CardValue::Ten => "Ten",
            CardValue::Jack => "Jack",
            CardValue::Queen => "Queen",
            CardValue::King => "King",
            CardValue::Ace => "Ace",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        CardValue::ALL.into_iter().find(|v| v.code() == code)
    }
}

/// A card as shown to this player: either face down or a known card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CardFace {
    Back,
    Card { suit: CardSuit, value: CardValue },
}

impl CardFace {
    pub const BACK_CODE: &'static str = "BACK";

    pub fn new(suit: CardSuit, value: CardValue) -> Self {
        CardFace::Card { suit, value }
    }

    pub fn is_back(self) -> bool {
        matches!(self, CardFace::Back)
    }

    /// Image URL under `base`, e.g. `/images/cards/HQ.gif`
    pub fn image_url(self, base: &str) -> String {
        format!("{}/{}.gif", base.trim_end_matches('/'), self)
    }

    /// Human name such as "The Queen of Hearts"
    pub fn full_name(self) -> String {
        match self {
            CardFace::Back => "A face-down card".to_string(),
            CardFace::Card { suit, value } => {
                format!("The {} of {}", value.name(), suit.name())
            }
        }
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFace::Back => f.write_str(Self::BACK_CODE),
            CardFace::Card { suit, value } => write!(f, "{}{}", suit.letter(), value.code()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("empty card code")]
    Empty,
    #[error("unknown suit in card code '{0}'")]
    Suit(String),
    #[error("unknown value in card code '{0}'")]
    Value(String),
}

impl FromStr for CardFace {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == Self::BACK_CODE {
            return Ok(CardFace::Back);
        }
        let mut chars = s.chars();
        let first = chars.next().ok_or(ParseCardError::Empty)?;
        let suit = CardSuit::from_letter(first).ok_or_else(|| ParseCardError::Suit(s.to_string()))?;
        let value =
            CardValue::from_code(chars.as_str()).ok_or_else(|| ParseCardError::Value(s.to_string()))?;
        Ok(CardFace::Card { suit, value })
    }
}

impl TryFrom<String> for CardFace {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardFace> for String {
    fn from(card: CardFace) -> Self {
        card.to_string()
    }
}
