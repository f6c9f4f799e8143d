use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use futures::{future, SinkExt, StreamExt};
use session::{InboundFrame, Session, SessionError, Window};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

pub mod config;
pub mod error;

use config::Settings;
use error::HostError;

#[derive(Clone)]
pub struct HostState {
    pub session: Arc<Session>,
}

pub async fn show(window: Window, settings: &Settings) -> Result<(), HostError> {
    let session = Arc::new(Session::build(window, settings.session_options())?);
    let listener = bind_first_available(settings).await?;
    run(session, listener).await
}

pub async fn run(session: Arc<Session>, listener: TcpListener) -> Result<(), HostError> {
    let addr = listener.local_addr()?;
    info!(%addr, "running on http://{addr}");

    let mut exit = session.exit_signal();
    let app = build_router(Arc::new(HostState { session }));
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { exit.wait().await })
        .await?;
    info!("session closed");
    Ok(())
}

pub async fn bind_first_available(settings: &Settings) -> Result<TcpListener, HostError> {
    for port in settings.port_start..=settings.port_end {
        match TcpListener::bind((settings.bind_host.as_str(), port)).await {
            Ok(listener) => return Ok(listener),
            Err(err) => debug!(port, %err, "port unavailable"),
        }
    }
    Err(HostError::NoAvailableConnection {
        host: settings.bind_host.clone(),
        start: settings.port_start,
        end: settings.port_end,
    })
}

pub fn build_router(state: Arc<HostState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn index(State(state): State<Arc<HostState>>) -> Html<String> {
    Html(state.session.page().to_owned())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<HostState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

async fn ws_connection(state: Arc<HostState>, socket: WebSocket) {
    let (sender, receiver) = socket.split();
    let reader = receiver.map(|msg| msg.map(inbound_frame));
    let writer = sender.with(|text: String| future::ready(Ok::<_, axum::Error>(Message::Text(text))));

    match state.session.serve(reader, writer).await {
        Ok(()) => info!("renderer disconnected"),
        Err(SessionError::AlreadyConnected) => {
            warn!("refusing second renderer connection");
        }
    }
}

fn inbound_frame(message: Message) -> InboundFrame {
    match message {
        Message::Text(text) => InboundFrame::Text(text),
        Message::Binary(bytes) => InboundFrame::Binary(bytes),
        Message::Ping(_) | Message::Pong(_) => InboundFrame::Heartbeat,
        Message::Close(_) => InboundFrame::Close,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
