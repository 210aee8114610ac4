#![cfg(not(target_arch = "wasm32"))]

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

use thousand::{dispatch, poll_once, Action, ClientConfig, ClientError, GameClient, PollState};
use thousand_shared::{CardFace, CardSuit, CardValue, GameState, Seat};

const FIRST: &str = r#"{
    "last":"1262304000.5","last_chat":"1262304000.0",
    "chat":[{"datetime":"2010.01.01 00:00:00","player":"bob","message":"hi all"}],
    "player_turn":true,"player_username":"alice","player_points":"0 points",
    "player_info":"","player_plus":false,"player_barrel":0,
    "opponent1_turn":"","opponent1_username":"bob","opponent1_points":"0 points",
    "opponent1_info":"Plays 120","opponent1_plus":false,"opponent1_barrel":0,
    "opponent2_turn":"","opponent2_username":"carol","opponent2_points":"0 points",
    "opponent2_info":"","opponent2_plus":false,"opponent2_barrel":0,
    "info_header":"bob calls 100 (Hearts)","state":"inGame",
    "cards":["S9","SQ","HK"],"bank":[null,"HA",null],"memo":[null,null,null],
    "trump":"Trump: Hearts","taken":"Taken: 0"
}"#;

const LATER: &str = r#"{
    "last":"1262304003.5","chat":[],
    "player_turn":"","opponent1_turn":true,
    "player_username":"alice","opponent1_username":"bob","opponent2_username":"carol",
    "info_header":"","state":"inGame",
    "cards":["SQ","HK"],"bank":["S9","HA",null]
}"#;

type Calls = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

#[derive(Clone, Default)]
struct Recorder {
    calls: Calls,
}

impl Recorder {
    fn push(&self, name: &str, query: HashMap<String, String>) {
        self.calls.lock().unwrap().push((name.to_string(), query));
    }

    fn calls(&self) -> Vec<(String, HashMap<String, String>)> {
        self.calls.lock().unwrap().clone()
    }
}

async fn update(
    State(rec): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let body = if query.contains_key("last_chat") {
        LATER
    } else {
        FIRST
    };
    rec.push("update", query);
    ([(header::CONTENT_TYPE, "application/json")], body)
}

async fn command(
    State(rec): State<Recorder>,
    Path(cmd): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    rec.push(&cmd, query);
    StatusCode::OK
}

fn router(rec: Recorder) -> Router {
    Router::new()
        .route("/update", get(update))
        .route("/:cmd", post(command))
        .route(
            "/broken/update",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/rejecting/update",
            get(|State(rec): State<Recorder>| async move {
                rec.push("update", HashMap::new());
                ([(header::CONTENT_TYPE, "application/json")], FIRST)
            }),
        )
        .route(
            "/rejecting/:cmd",
            post(|State(rec): State<Recorder>, Path(cmd): Path<String>| async move {
                rec.push(&cmd, HashMap::new());
                StatusCode::INTERNAL_SERVER_ERROR
            }),
        )
        .route(
            "/html/update",
            get(|| async { "<html><body>This session does not exist.</body></html>" }),
        )
        .with_state(rec)
}

/// Serve on an OS-assigned port and return the base URL.
async fn serve(rec: Recorder) -> Result<Url> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(rec);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(Url::parse(&format!("http://{}/", addr))?)
}

fn client(base: &Url, path: &str, session: &str) -> Result<GameClient> {
    let cfg = ClientConfig::new(base.join(path)?, session);
    Ok(GameClient::new(&cfg))
}

#[tokio::test]
async fn fetches_and_decodes_a_snapshot() -> Result<()> {
    let rec = Recorder::default();
    let base = serve(rec.clone()).await?;
    let client = client(&base, "/", "7")?;

    let snapshot = client.fetch_snapshot(None).await?;
    assert_eq!(snapshot.state, GameState::InGame);
    assert_eq!(snapshot.turn_seat(), Seat::Player);
    assert_eq!(snapshot.seat(Seat::Opponent1).info, "Plays 120");
    assert_eq!(snapshot.cards.len(), 3);
    assert_eq!(snapshot.chat.len(), 1);

    let calls = rec.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "update");
    assert_eq!(calls[0].1.get("id").map(String::as_str), Some("7"));
    assert!(!calls[0].1.contains_key("last_chat"));
    Ok(())
}

#[tokio::test]
async fn poll_then_action_sends_command_and_repolls_with_cursor() -> Result<()> {
    let rec = Recorder::default();
    let base = serve(rec.clone()).await?;
    let client = client(&base, "/", "7")?;
    let state = RefCell::new(PollState::new("/images/cards"));

    let first = poll_once(&client, &state).await?.expect("first poll renders");
    assert!(first.repaint.is_some());
    assert_eq!(first.hand[0].as_deref(), Some("/images/cards/S9.gif"));
    assert_eq!(first.chat, vec!["[2010.01.01 00:00:00] bob: hi all".to_string()]);
    state.borrow_mut().painted();

    let after = dispatch(&client, &state, Action::PutCard(0))
        .await?
        .expect("poll after action renders");
    // the turn moved to the next seat
    assert!(after.repaint.is_some());
    assert!(after.chat.is_empty());
    assert_eq!(after.bank[0].as_deref(), Some("/images/cards/S9.gif"));

    let calls = rec.calls();
    let names: Vec<&str> = calls.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["update", "put", "update"]);
    assert_eq!(calls[1].1.get("card").map(String::as_str), Some("S9"));
    assert_eq!(calls[1].1.get("id").map(String::as_str), Some("7"));
    assert_eq!(
        calls[2].1.get("last_chat").map(String::as_str),
        Some("1262304000.0")
    );
    Ok(())
}

#[tokio::test]
async fn guarded_action_does_not_touch_the_server() -> Result<()> {
    let rec = Recorder::default();
    let base = serve(rec.clone()).await?;
    let client = client(&base, "/", "7")?;
    let state = RefCell::new(PollState::new("/images/cards"));

    poll_once(&client, &state).await?;
    // not discarding, so retrieving a bank card is ignored
    let res = dispatch(&client, &state, Action::RetrieveCard(1)).await?;
    assert!(res.is_none());
    assert_eq!(rec.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn bet_and_chat_reach_their_endpoints() -> Result<()> {
    let rec = Recorder::default();
    let base = serve(rec.clone()).await?;
    let client = client(&base, "/", "7")?;
    let state = RefCell::new(PollState::new("/images/cards"));

    dispatch(&client, &state, Action::Bet(Some(140))).await?;
    dispatch(&client, &state, Action::Chat("  nice trick & thanks ".into())).await?;

    let calls = rec.calls();
    let names: Vec<&str> = calls.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["bet", "update", "chat", "update"]);
    assert_eq!(calls[0].1.get("upto").map(String::as_str), Some("140"));
    assert_eq!(
        calls[2].1.get("message").map(String::as_str),
        Some("nice trick & thanks")
    );
    Ok(())
}

#[tokio::test]
async fn rejected_command_is_still_followed_by_a_poll() -> Result<()> {
    let rec = Recorder::default();
    let base = serve(rec.clone()).await?;
    let client = client(&base, "/rejecting/", "7")?;
    let state = RefCell::new(PollState::new("/images/cards"));

    let frame = dispatch(&client, &state, Action::Deal).await?;
    assert!(frame.is_some());
    assert_eq!(state.borrow().current().map(|s| &s.state), Some(&GameState::InGame));

    let calls = rec.calls();
    let names: Vec<&str> = calls.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["deal", "update"]);
    Ok(())
}

#[tokio::test]
async fn failed_poll_keeps_what_is_on_screen() -> Result<()> {
    let rec = Recorder::default();
    let base = serve(rec.clone()).await?;
    let state = RefCell::new(PollState::new("/images/cards"));

    let good = client(&base, "/", "7")?;
    poll_once(&good, &state).await?;
    state.borrow_mut().painted();

    let broken = client(&base, "/broken/", "7")?;
    let err = poll_once(&broken, &state).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 500, .. }));

    let state = state.borrow();
    let current = state.current().expect("snapshot survives the failure");
    assert_eq!(current.info_header, "bob calls 100 (Hearts)");
    assert_eq!(
        state.cursor().map(|c| c.as_str()),
        Some("1262304000.0")
    );
    Ok(())
}

#[tokio::test]
async fn error_status_is_reported() -> Result<()> {
    let base = serve(Recorder::default()).await?;
    let client = client(&base, "/broken/", "7")?;

    let err = client.fetch_snapshot(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    Ok(())
}

#[tokio::test]
async fn html_error_page_is_a_decode_error() -> Result<()> {
    let base = serve(Recorder::default()).await?;
    let client = client(&base, "/html/", "7")?;

    let err = client.fetch_snapshot(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() -> Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let base = Url::parse(&format!("http://{}/", addr))?;
    let client = client(&base, "/", "7")?;
    let err = client
        .send(&thousand_shared::Command::Put {
            card: CardFace::new(CardSuit::Hearts, CardValue::King),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http { .. }));
    Ok(())
}
