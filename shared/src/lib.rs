//! Wire types shared by the browser client and the headless CLI.
//!
//! The server speaks a small flat-JSON dialect: one `/update` snapshot per
//! poll and a handful of query-string commands. Everything here is plain
//! data; no game rules live on this side.

pub mod cards;
pub mod chat;
pub mod command;
pub mod snapshot;

pub use cards::{CardFace, CardSuit, CardValue, ParseCardError};
pub use chat::{ChatCursor, ChatLine};
pub use command::Command;
pub use snapshot::{GameState, Seat, SeatPanel, Snapshot};
