//! Thousand Online - browser client for the "1000" card game
//!
//! The page polls the game server for a snapshot every few seconds, paints
//! it into the game page, and forwards clicks as commands. All rules live
//! on the server.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod poller;
pub mod view;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use api::GameClient;
pub use config::ClientConfig;
pub use dispatch::{command_for, dispatch, Action};
pub use error::ClientError;
pub use poller::{poll_once, PollState, PollTicket, RepaintTracker};
pub use view::{Control, Frame};

#[allow(unused_imports)]
use wasm_bindgen::prelude::*;

/// Main entry point for the game page
///
/// Reads the session id from the page address, wires the click handlers
/// and starts polling.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import init, {start} from './pkg/thousand.js';
///
/// async function run() {
///     await init();
///     start();
/// }
///
/// run();
/// ```
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Forward tracing::info!/warn!/error! to the browser console
    tracing_wasm::set_as_global_default();

    web::App::launch()?;
    Ok(())
}
