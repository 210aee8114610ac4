//! Browser side: timer loop, DOM painting and click handlers.

pub mod dom;
pub mod handlers;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::api::GameClient;
use crate::config::ClientConfig;
use crate::dispatch::{dispatch, Action};
use crate::error::ClientError;
use crate::poller::{poll_once, PollState};
use crate::view::{last_trick_slots, Frame};

use dom::Dom;

/// The running game page
pub struct App {
    config: ClientConfig,
    client: GameClient,
    state: RefCell<PollState>,
    dom: Dom,
}

impl App {
    pub fn new(config: ClientConfig, dom: Dom) -> Self {
        Self {
            client: GameClient::new(&config),
            state: RefCell::new(PollState::new(config.card_image_base.clone())),
            config,
            dom,
        }
    }

    /// Configure from the current page, bind handlers and start polling.
    pub fn launch() -> Result<Rc<Self>, ClientError> {
        let window = web_sys::window().ok_or_else(|| ClientError::Js("no window".into()))?;
        let href = window.location().href()?;
        let config = ClientConfig::from_page_url(&href)?;

        let app = Rc::new(App::new(config, Dom::new()?));
        handlers::bind(&app)?;

        tracing::info!(
            session = %app.config.session,
            interval_ms = app.config.poll_interval_ms,
            "starting poller"
        );
        let poller = Rc::clone(&app);
        spawn_local(async move { poller.run().await });
        Ok(app)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Poll, then wait a full interval before the next one
    async fn run(self: Rc<Self>) {
        loop {
            self.poll().await;
            TimeoutFuture::new(self.config.poll_interval_ms).await;
        }
    }

    pub async fn poll(&self) {
        match poll_once(&self.client, &self.state).await {
            Ok(Some(frame)) => self.paint(&frame),
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "poll failed"),
        }
    }

    pub async fn act(&self, action: Action) {
        match dispatch(&self.client, &self.state, action).await {
            Ok(Some(frame)) => self.paint(&frame),
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "poll after action failed"),
        }
    }

    fn paint(&self, frame: &Frame) {
        match render::render(&self.dom, frame) {
            Ok(()) => self.state.borrow_mut().painted(),
            Err(err) => tracing::warn!(error = %err, "render failed"),
        }
    }

    /// Swap the bank slots for the previous trick while `showing`
    pub fn show_last_trick(&self, showing: bool) {
        let slots = {
            let state = self.state.borrow();
            state
                .current()
                .and_then(|snapshot| last_trick_slots(snapshot, showing, state.card_image_base()))
        };
        if let Some(slots) = slots {
            if let Err(err) = render::render_slots(&self.dom, render::BANK_PREFIX, &slots) {
                tracing::warn!(error = %err, "could not show last trick");
            }
        }
    }

    pub fn quit(&self) -> Result<(), ClientError> {
        let window = web_sys::window().ok_or_else(|| ClientError::Js("no window".into()))?;
        window.location().set_href(&self.config.quit_path)?;
        Ok(())
    }
}
