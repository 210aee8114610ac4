pub mod args;
pub mod config;
pub mod printer;

pub use args::{Cli, Commands};
pub use config::CliConfig;
pub use printer::Printer;

use anyhow::Context;
use std::cell::RefCell;
use std::time::Duration;

use thousand::config::DEFAULT_CARD_IMAGE_BASE;
use thousand::view::Frame;
use thousand::{dispatch, poll_once, GameClient, PollState};

/// Poll until interrupted, printing every accepted frame.
pub async fn watch(
    client: &GameClient,
    interval: Duration,
    wait: Duration,
    printer: &mut Printer,
) -> anyhow::Result<()> {
    let state = RefCell::new(PollState::new(DEFAULT_CARD_IMAGE_BASE));
    loop {
        match tokio::time::timeout(wait, poll_once(client, &state)).await {
            Ok(Ok(Some(frame))) => print_frame(&state, &frame, printer),
            Ok(Ok(None)) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "poll failed"),
            Err(_) => tracing::warn!(wait_ms = wait.as_millis() as u64, "poll timed out"),
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
    Ok(())
}

/// Fetch and print one snapshot.
pub async fn show_state(client: &GameClient, wait: Duration, printer: &mut Printer) -> anyhow::Result<()> {
    let state = RefCell::new(PollState::new(DEFAULT_CARD_IMAGE_BASE));
    let frame = tokio::time::timeout(wait, poll_once(client, &state))
        .await
        .context("timed out waiting for the server")??
        .context("no snapshot received")?;
    print_frame(&state, &frame, printer);
    Ok(())
}

/// Run one subcommand the way a click on the page would: read the current
/// snapshot, dispatch the action (send, then poll) and print the result.
pub async fn act_and_show(
    client: &GameClient,
    command: &Commands,
    wait: Duration,
    printer: &mut Printer,
) -> anyhow::Result<()> {
    let state = RefCell::new(PollState::new(DEFAULT_CARD_IMAGE_BASE));
    tokio::time::timeout(wait, poll_once(client, &state))
        .await
        .context("timed out waiting for the server")?
        .context("fetching the current state")?;

    let action = command.to_action(state.borrow().current())?;
    tracing::info!(?action, "dispatching");
    let frame = tokio::time::timeout(wait, dispatch(client, &state, action))
        .await
        .context("timed out waiting for the server")??
        .context("not possible in the current game state, nothing was sent")?;
    print_frame(&state, &frame, printer);
    Ok(())
}

fn print_frame(state: &RefCell<PollState>, frame: &Frame, printer: &mut Printer) {
    if let Some(snapshot) = state.borrow().current() {
        printer.handle(snapshot, frame);
    }
    state.borrow_mut().painted();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::{header, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use std::sync::{Arc, Mutex};
    use thousand::ClientConfig;
    use url::Url;

    const MY_TURN: &str = r#"{"state":"ready","player_turn":true,"player_username":"alice"}"#;

    type Calls = Arc<Mutex<Vec<String>>>;

    /// Game server whose commands all fail with 500
    async fn failing_server(calls: Calls) -> Url {
        let app = Router::new()
            .route(
                "/update",
                get(|State(calls): State<Calls>| async move {
                    calls.lock().unwrap().push("update".to_string());
                    ([(header::CONTENT_TYPE, "application/json")], MY_TURN)
                }),
            )
            .route(
                "/:cmd",
                post(|State(calls): State<Calls>, Path(cmd): Path<String>| async move {
                    calls.lock().unwrap().push(cmd);
                    StatusCode::INTERNAL_SERVER_ERROR
                }),
            )
            .with_state(calls);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{}/", addr)).unwrap()
    }

    fn client(base: Url) -> GameClient {
        GameClient::new(&ClientConfig::new(base, "3"))
    }

    #[tokio::test]
    async fn failed_send_is_still_followed_by_a_poll() {
        let calls = Calls::default();
        let client = client(failing_server(calls.clone()).await);
        let mut printer = Printer::new(false);

        act_and_show(&client, &Commands::Deal, Duration::from_secs(5), &mut printer)
            .await
            .expect("a failed send is not fatal");
        assert_eq!(*calls.lock().unwrap(), vec!["update", "deal", "update"]);
    }

    #[tokio::test]
    async fn blank_chat_is_never_sent() {
        let calls = Calls::default();
        let client = client(failing_server(calls.clone()).await);
        let mut printer = Printer::new(false);

        let chat = Commands::Chat {
            message: "   ".into(),
        };
        let res = act_and_show(&client, &chat, Duration::from_secs(5), &mut printer).await;
        assert!(res.is_err());
        assert_eq!(*calls.lock().unwrap(), vec!["update"]);
    }
}
