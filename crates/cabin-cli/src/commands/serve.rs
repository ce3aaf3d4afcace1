//! Serve sessions over a websocket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use cabin_engine::protocol::parse_client_message;
use cabin_engine::{EngineConfig, EngineResult, Interpreter, ServerMessage, Session};
use futures::{Sink, SinkExt, Stream, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// Shared across connections: config, one interpreter (and its cache), and
/// a live-session counter.
#[derive(Clone)]
struct AppState {
    config: Arc<EngineConfig>,
    interpreter: Interpreter,
    sessions: Arc<AtomicUsize>,
}

impl AppState {
    fn new(config: &EngineConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
            interpreter: super::build_interpreter(config),
            sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A fresh game for one connection. Web sessions keep no saves.
    fn open_session(&self) -> EngineResult<Session> {
        Session::from_config(&self.config, self.interpreter.clone())
    }
}

pub fn run(config: &EngineConfig, addr: SocketAddr) -> Result<(), String> {
    let runtime =
        tokio::runtime::Runtime::new().map_err(|e| format!("cannot start runtime: {e}"))?;
    runtime.block_on(serve(AppState::new(config), addr))
}

async fn serve(state: AppState, addr: SocketAddr) -> Result<(), String> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("cannot bind {addr}: {e}"))?;
    info!(%addr, "listening");
    println!("Listening on ws://{addr}/ws");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| format!("server error: {e}"))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(connect))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.sessions.load(Ordering::Relaxed),
    }))
}

async fn connect(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    let id = Uuid::new_v4();
    ws.on_upgrade(move |socket| play_socket(socket, state).instrument(info_span!("session", %id)))
}

async fn play_socket(socket: WebSocket, state: AppState) {
    let (mut outgoing, mut incoming) = socket.split();
    let mut session = match state.open_session() {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "cannot start session");
            let refusal = ServerMessage::error("The forest will not open tonight.");
            let _ = send(&mut outgoing, &refusal).await;
            return;
        }
    };

    state.sessions.fetch_add(1, Ordering::Relaxed);
    info!("session opened");
    let idle = state.config.session_idle();

    if send(&mut outgoing, &session.intro().into()).await.is_ok() {
        serve_session(&mut incoming, &mut outgoing, &mut session, idle).await;
    }

    state.sessions.fetch_sub(1, Ordering::Relaxed);
    info!("session closed");
}

/// Answer each incoming message in arrival order until the game ends, the
/// client goes away, or nothing arrives for `idle`.
async fn serve_session<R, W, E>(
    incoming: &mut R,
    outgoing: &mut W,
    session: &mut Session,
    idle: Duration,
) where
    R: Stream<Item = Result<Message, E>> + Unpin,
    W: Sink<Message> + Unpin,
{
    loop {
        let Ok(next) = tokio::time::timeout(idle, incoming.next()).await else {
            info!("idle timeout");
            break;
        };
        let reply = match next {
            Some(Ok(Message::Text(text))) => match parse_client_message(text.as_str()) {
                Ok(message) => ServerMessage::from(session.handle(message).await),
                Err(e) => ServerMessage::error(format!("unreadable message: {e}")),
            },
            Some(Ok(Message::Ping(payload))) => {
                if outgoing.send(Message::Pong(payload)).await.is_err() {
                    break;
                }
                continue;
            }
            Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
            _ => continue,
        };

        if send(outgoing, &reply).await.is_err() || session.is_over() {
            break;
        }
    }
}

async fn send<W>(outgoing: &mut W, message: &ServerMessage) -> Result<(), W::Error>
where
    W: Sink<Message> + Unpin,
{
    outgoing.send(Message::Text(message.to_json().into())).await
}
