use crate::error::ClientError;
use crate::view::{Control, Frame, Repaint};

use super::dom::Dom;

pub const INFO_HEADER: &str = "info_header";
pub const TRUMP: &str = "trump";
pub const TAKEN: &str = "taken";
pub const CHAT_LOG: &str = "chat_log";
/// Slot ids are the prefix plus a one-based index: bank1..bank3
pub const BANK_PREFIX: &str = "bank";
/// card1..card10
pub const HAND_PREFIX: &str = "card";

pub fn render(dom: &Dom, frame: &Frame) -> Result<(), ClientError> {
    dom.set_text(INFO_HEADER, &frame.info_header)?;

    for seat in &frame.seats {
        let key = seat.seat.key();
        dom.set_text(&format!("{key}_username"), &seat.username)?;
        dom.set_text(&format!("{key}_points"), &seat.points)?;
        dom.set_text(&format!("{key}_info"), &seat.info)?;
        dom.set_visible(&format!("{key}_turn"), seat.turn)?;
    }

    if let Some(repaint) = &frame.repaint {
        render_repaint(dom, repaint)?;
    }

    render_slots(dom, BANK_PREFIX, &frame.bank)?;
    render_slots(dom, HAND_PREFIX, &frame.hand)?;

    for line in &frame.chat {
        dom.append_line(CHAT_LOG, line)?;
    }
    Ok(())
}

pub fn render_repaint(dom: &Dom, repaint: &Repaint) -> Result<(), ClientError> {
    dom.set_title(repaint.title);
    dom.set_text(TRUMP, &repaint.trump)?;
    dom.set_text(TAKEN, &repaint.taken)?;

    for control in Control::ALL {
        dom.set_visible(control.element_id(), repaint.shows(control))?;
    }
    if let Some(options) = &repaint.bet_options {
        dom.set_options(Control::Bettings.element_id(), options)?;
    }
    Ok(())
}

pub fn render_slots(dom: &Dom, prefix: &str, slots: &[Option<String>]) -> Result<(), ClientError> {
    for (i, src) in slots.iter().enumerate() {
        dom.set_slot(&format!("{prefix}{}", i + 1), src.as_deref())?;
    }
    Ok(())
}
