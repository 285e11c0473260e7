//! Axum web server with WebSocket streaming of demo frames.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use showcase_site::checklist::{Section, CHECKLIST};
use showcase_site::{
    Challenge, ChallengeStatus, Content, SnippetRunner, SnippetState, Storage, SITE,
};
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::config::VisConfig;
use crate::error::{Error, Result};
use crate::frames::{Frame, WsCommand, WsEvent};
use crate::playback::{Control, PlaybackStatus};
use crate::player::{DemoInfo, PlayerHandle};

/// Shared application state.
pub struct AppState {
    catalog: Catalog,
    storage: Arc<Storage>,
    challenge: Arc<Challenge>,
    snippet: SnippetRunner,
}

impl AppState {
    pub fn new(catalog: Catalog, storage: Arc<Storage>, asset_url: &str) -> Self {
        Self {
            catalog,
            challenge: Arc::new(Challenge::new(Arc::clone(&storage))),
            storage,
            snippet: SnippetRunner::new(asset_url),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }

    pub fn challenge(&self) -> &Arc<Challenge> {
        &self.challenge
    }
}

/// Showcase server.
pub struct VisServer {
    addr: SocketAddr,
    state: Arc<AppState>,
}

impl VisServer {
    /// Open the store and spawn the demo players described by `config`.
    pub fn new(config: &VisConfig) -> Result<Self> {
        let storage = Arc::new(Storage::open_in(&config.data_dir));
        let catalog = Catalog::spawn_defaults(config.autoplay)?;
        Ok(Self::from_state(
            AppState::new(catalog, storage, &config.asset_url),
            config.addr,
        ))
    }

    pub fn from_state(state: AppState, addr: SocketAddr) -> Self {
        Self {
            addr,
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            // Demo playback
            .route("/api/status", get(status_handler))
            .route("/api/demos", get(list_demos_handler))
            .route("/api/demos/{name}", get(frame_handler))
            .route("/api/demos/{name}/{action}", post(control_handler))
            .route("/ws/{name}", get(ws_handler))
            // Site services
            .route("/api/content", get(content_handler))
            .route(
                "/api/storage/{key}",
                get(get_item_handler)
                    .put(set_item_handler)
                    .delete(remove_item_handler),
            )
            .route("/api/challenge", get(challenge_handler))
            .route("/api/challenge/switch", post(switch_handler))
            .route("/api/challenge/press", post(press_handler))
            .route("/api/checklist", get(checklist_handler))
            .route("/api/snippet", get(snippet_handler))
            .route("/api/snippet/run", post(run_snippet_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server and the challenge checker until the listener fails.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!("Showcase server running on http://{}", self.addr);

        let checker = self.state.challenge.spawn_checker();
        let served = axum::serve(listener, self.router()).await;
        checker.abort();

        Ok(served?)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        use showcase_site::Error as SiteError;

        let status = match &self {
            Error::UnknownDemo(_) => StatusCode::NOT_FOUND,
            Error::Site(SiteError::ButtonDisabled) => StatusCode::CONFLICT,
            Error::Site(SiteError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Error::Site(SiteError::Network(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    demos: usize,
    storage_keys: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        demos: state.catalog.len(),
        storage_keys: state.storage.keys().len(),
    })
}

async fn list_demos_handler(State(state): State<Arc<AppState>>) -> Json<Vec<DemoInfo>> {
    Json(state.catalog.list())
}

async fn frame_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Frame>> {
    let player = state.catalog.get(&name)?;
    Ok(Json(player.frame().await?))
}

async fn control_handler(
    State(state): State<Arc<AppState>>,
    Path((name, action)): Path<(String, Control)>,
) -> Result<Json<PlaybackStatus>> {
    let player = state.catalog.get(&name)?;
    Ok(Json(player.control(action).await?))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let player = state.catalog.get(&name)?.clone();
    Ok(ws.on_upgrade(move |socket| handle_ws(socket, player)))
}

async fn handle_ws(socket: WebSocket, player: PlayerHandle) {
    info!("WebSocket client connected to {}", player.name());

    let (mut sender, mut receiver) = socket.split();
    let mut frames = player.subscribe();

    // Send the frame at the current cursor
    let initial = match player.frame().await {
        Ok(frame) => WsEvent::Frame(frame),
        Err(e) => {
            warn!("No initial frame for {}: {}", player.name(), e);
            return;
        }
    };
    if let Err(e) = send_event(&mut sender, &initial).await {
        warn!("Failed to send initial frame: {}", e);
        return;
    }

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let event = match serde_json::from_str::<WsCommand>(&text) {
                            Ok(command) => handle_ws_command(&player, command).await,
                            Err(e) => WsEvent::Error {
                                message: format!("Invalid command: {}", e),
                            },
                        };
                        if let Err(e) = send_event(&mut sender, &event).await {
                            warn!("Failed to send reply: {}", e);
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = sender.send(Message::Pong(data)).await {
                            warn!("Failed to send pong: {}", e);
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            frame = frames.recv() => {
                let event = match frame {
                    Ok(frame) => WsEvent::Frame(frame),
                    Err(RecvError::Lagged(skipped)) => WsEvent::Lagged { skipped },
                    Err(RecvError::Closed) => break,
                };
                if let Err(e) = send_event(&mut sender, &event).await {
                    debug!("Client for {} went away: {}", player.name(), e);
                    break;
                }
            }
        }
    }

    info!("WebSocket client disconnected from {}", player.name());
}

async fn handle_ws_command(player: &PlayerHandle, command: WsCommand) -> WsEvent {
    let result = match command.control() {
        Some(control) => player.control(control).await.map(WsEvent::Status),
        None => player.frame().await.map(WsEvent::Frame),
    };
    result.unwrap_or_else(|e| WsEvent::Error {
        message: e.to_string(),
    })
}

async fn send_event<S>(sender: &mut S, event: &WsEvent) -> std::result::Result<(), axum::Error>
where
    S: futures::Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(event).map_err(axum::Error::new)?;
    sender.send(Message::Text(json.into())).await
}

async fn content_handler() -> Json<Content> {
    Json(SITE)
}

/// One key/value pair; `value` is null when the key is absent.
#[derive(Serialize)]
struct StorageEntry {
    key: String,
    value: Option<String>,
}

#[derive(Deserialize)]
struct SetItemRequest {
    value: String,
}

async fn get_item_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Json<StorageEntry> {
    let value = state.storage.get(&key);
    Json(StorageEntry { key, value })
}

async fn set_item_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(req): Json<SetItemRequest>,
) -> Json<StorageEntry> {
    state.storage.set(&key, &req.value);
    Json(StorageEntry {
        key,
        value: Some(req.value),
    })
}

async fn remove_item_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Json<StorageEntry> {
    let value = state.storage.remove(&key);
    Json(StorageEntry { key, value })
}

async fn challenge_handler(State(state): State<Arc<AppState>>) -> Json<ChallengeStatus> {
    Json(state.challenge.status())
}

#[derive(Deserialize)]
struct SwitchRequest {
    on: bool,
}

async fn switch_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SwitchRequest>,
) -> Json<ChallengeStatus> {
    state.challenge.set_switch(req.on);
    Json(state.challenge.status())
}

#[derive(Deserialize)]
struct PressRequest {
    key: String,
    value: String,
}

async fn press_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PressRequest>,
) -> Result<Json<ChallengeStatus>> {
    state.challenge.press(&req.key, &req.value)?;
    Ok(Json(state.challenge.status()))
}

async fn checklist_handler() -> Json<&'static [Section]> {
    Json(CHECKLIST)
}

async fn snippet_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    Ok(Json(serde_json::to_value(state.snippet.view())?))
}

async fn run_snippet_handler(State(state): State<Arc<AppState>>) -> Result<Json<SnippetState>> {
    state.snippet.run().await?;
    Ok(Json(state.snippet.state()))
}
