//! Click handlers. Each one turns a page event into an [`Action`] and
//! hands it to the app; the listeners live as long as the page.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlElement, KeyboardEvent};

use crate::dispatch::Action;
use crate::error::ClientError;
use crate::view::{Control, BANK_SLOTS, HAND_SLOTS};

use super::render::{BANK_PREFIX, HAND_PREFIX};
use super::App;

pub const CHAT_INPUT: &str = "chat_input";
pub const CHAT_SEND: &str = "chat_send";
pub const QUIT: &str = "quit";

pub fn bind(app: &Rc<App>) -> Result<(), ClientError> {
    let simple = [
        (Control::Deal, Action::Deal),
        (Control::Open, Action::GoOpen),
        (Control::Blind, Action::GoBlind),
        (Control::Pass, Action::Pass),
        (Control::Collect, Action::Collect),
        (Control::Plus, Action::TakePlus),
    ];
    for (control, action) in simple {
        on_action(app, control.element_id(), "click", move |_, _| {
            Some(action.clone())
        })?;
    }

    on_action(app, Control::Bet.element_id(), "click", |app, _| {
        let selected = app
            .dom
            .selected_number(Control::Bettings.element_id())
            .ok()
            .flatten();
        Some(Action::Bet(selected))
    })?;

    for slot in 0..HAND_SLOTS {
        let id = format!("{HAND_PREFIX}{}", slot + 1);
        on_action(app, &id, "click", move |_, _| Some(Action::PutCard(slot)))?;
    }
    for slot in 0..BANK_SLOTS {
        let id = format!("{BANK_PREFIX}{}", slot + 1);
        on_action(app, &id, "click", move |_, _| Some(Action::RetrieveCard(slot)))?;
    }

    on_action(app, CHAT_SEND, "click", |app, _| chat_action(app))?;
    on_action(app, CHAT_INPUT, "keydown", |app, event| {
        let enter = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|k| k.key() == "Enter");
        if enter {
            chat_action(app)
        } else {
            None
        }
    })?;

    on_event(app, Control::Last.element_id(), "mouseover", |app, _| {
        app.show_last_trick(true)
    })?;
    on_event(app, Control::Last.element_id(), "mouseout", |app, _| {
        app.show_last_trick(false)
    })?;
    on_event(app, QUIT, "click", |app, _| {
        if let Err(err) = app.quit() {
            tracing::warn!(error = %err, "could not leave the game page");
        }
    })?;

    Ok(())
}

fn chat_action(app: &App) -> Option<Action> {
    match app.dom.take_input(CHAT_INPUT) {
        Ok(text) => Some(Action::Chat(text)),
        Err(err) => {
            tracing::warn!(error = %err, "chat input unavailable");
            None
        }
    }
}

/// Listen for `event` on `id`; a produced action is dispatched in the
/// background.
fn on_action<F>(app: &Rc<App>, id: &str, event: &str, make: F) -> Result<(), ClientError>
where
    F: Fn(&App, &Event) -> Option<Action> + 'static,
{
    on_event(app, id, event, move |app, e| {
        if let Some(action) = make(app.as_ref(), e) {
            let app = Rc::clone(app);
            spawn_local(async move { app.act(action).await });
        }
    })
}

fn on_event<F>(app: &Rc<App>, id: &str, event: &str, handler: F) -> Result<(), ClientError>
where
    F: Fn(&Rc<App>, &Event) + 'static,
{
    let target = app.dom.element::<HtmlElement>(id)?;
    let app = Rc::clone(app);
    let callback = Closure::<dyn FnMut(Event)>::new(move |e: Event| handler(&app, &e));
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}
