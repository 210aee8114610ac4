//! Chat lines delivered incrementally with each snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One chat message as the server formats it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    /// "YYYY.MM.DD HH:MM:SS"
    pub datetime: String,
    pub player: String,
    pub message: String,
}

impl fmt::Display for ChatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.datetime, self.player, self.message)
    }
}

/// Opaque chat position. Echoed back as `last_chat` so the server only
/// returns lines newer than the ones already shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatCursor(pub String);

impl ChatCursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
