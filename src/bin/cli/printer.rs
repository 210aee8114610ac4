use owo_colors::OwoColorize;
use std::io::IsTerminal;

use thousand::view::{Control, Frame, Repaint};
use thousand_shared::{CardFace, Seat, Snapshot};

/// Prints accepted frames. Full details only on a repaint; otherwise just
/// what moved (banner, table, chat).
pub struct Printer {
    json: bool,
    color: bool,
    last_header: Option<String>,
    last_table: Option<String>,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            color: std::io::stdout().is_terminal(),
            last_header: None,
            last_table: None,
        }
    }

    pub fn handle(&mut self, snapshot: &Snapshot, frame: &Frame) {
        if self.json {
            match to_json(snapshot) {
                Ok(json_str) => println!("{}", json_str),
                Err(e) => eprintln!("Failed to serialize snapshot to JSON: {}", e),
            }
            return;
        }

        if let Some(repaint) = &frame.repaint {
            println!("{}", format_banner(snapshot, self.color));
            for seat in Seat::ALL {
                println!("  {}", format_seat(snapshot, seat, self.color));
            }
            println!("  hand: {}", format_cards(&snapshot.cards, self.color));
            if let Some(actions) = format_actions(repaint) {
                println!("  you may: {}", actions);
            }
            if !repaint.trump.is_empty() || !repaint.taken.is_empty() {
                println!("  {}  {}", repaint.trump, repaint.taken);
            }
        }

        if self.last_header.as_deref() != Some(frame.info_header.as_str()) {
            if !frame.info_header.is_empty() {
                println!("» {}", frame.info_header);
            }
            self.last_header = Some(frame.info_header.clone());
        }

        let table = format_slots(&snapshot.bank, self.color);
        if self.last_table.as_deref() != Some(table.as_str()) {
            println!("  table: {}", table);
            self.last_table = Some(table);
        }

        for line in &frame.chat {
            println!("  {}", line);
        }
    }
}

/// JSON form of the decoded snapshot: seats as an array indexed like
/// [`Seat::ALL`]. It is meant for reading and scripting; it is not the
/// server's flat `/update` shape and does not decode back into a snapshot.
fn to_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

fn format_banner(snapshot: &Snapshot, color: bool) -> String {
    let turn = if snapshot.is_my_turn() {
        "your turn".to_string()
    } else {
        format!("{}'s turn", snapshot.seat(snapshot.turn_seat()).username)
    };
    let text = format!("== {} | {} ==", snapshot.state, turn);
    if color {
        text.bold().to_string()
    } else {
        text
    }
}

fn format_seat(snapshot: &Snapshot, seat: Seat, color: bool) -> String {
    let panel = snapshot.seat(seat);
    let marker = if panel.turn { "*" } else { " " };
    let plus = if panel.plus { " (+)" } else { "" };
    let name = format!("{}{}", panel.username, plus);
    let name = if color && panel.turn {
        name.green().to_string()
    } else {
        name
    };
    let mut line = format!("{} {:<10} {:<9} {}", marker, seat.key(), name, panel.points);
    if !panel.info.is_empty() {
        line.push_str(&format!(" [{}]", panel.info));
    }
    line
}

fn format_actions(repaint: &Repaint) -> Option<String> {
    let names: Vec<&str> = Control::ALL
        .into_iter()
        .filter(|c| repaint.shows(*c) && *c != Control::Bettings)
        .map(Control::element_id)
        .collect();
    if names.is_empty() {
        return None;
    }
    let mut text = names.join(", ");
    if let Some(options) = &repaint.bet_options {
        if let (Some(min), Some(max)) = (options.first(), options.last()) {
            text.push_str(&format!(" (bets {}..{})", min, max));
        }
    }
    Some(text)
}

fn format_card(card: CardFace, color: bool) -> String {
    match card {
        CardFace::Back => "##".to_string(),
        CardFace::Card { suit, value } => {
            let text = format!("{}{}", value.code(), suit.symbol());
            if color && suit.is_red() {
                text.red().to_string()
            } else {
                text
            }
        }
    }
}

fn format_cards(cards: &[CardFace], color: bool) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(|c| format_card(*c, color))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_slots(slots: &[Option<CardFace>], color: bool) -> String {
    if slots.is_empty() {
        return "-".to_string();
    }
    slots
        .iter()
        .map(|slot| slot.map_or_else(|| "..".to_string(), |c| format_card(c, color)))
        .collect::<Vec<_>>()
        .join(" ")
}
