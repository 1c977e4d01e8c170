use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, Request};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use protocol::control::{AnalysisReport, AnalyzeRequest, PresetInfo, ShellEvent, ShellSnapshot};
use protocol::AnalysisInput;
use std::time::SystemTime;
use tokio::sync::broadcast;

use crate::error::ShellError;
use crate::poster::Poster;
use crate::presets::Preset;
use crate::service::AnalysisService;

pub(crate) fn build_router(service: AnalysisService) -> Router {
    let body_limit = service.intake().request_body_limit();
    Router::new()
        .route("/health", get(health))
        .route("/state", get(get_state))
        .route("/analyze", post(analyze))
        .route("/presets", get(list_presets))
        .route("/presets/:name/analyze", post(analyze_preset))
        .route("/reset", post(reset))
        .route("/poster", get(download_poster))
        .route("/ws", get(ws_handler))
        .with_state(service)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(log_http_request))
}

async fn health() -> &'static str {
    "ok"
}

async fn get_state(State(service): State<AnalysisService>) -> Json<ShellSnapshot> {
    Json(service.snapshot().await)
}

async fn analyze(
    State(service): State<AnalysisService>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ShellError> {
    let Json(request) = payload?;
    let report = service.analyze_request(request).await?;
    Ok(Json(report))
}

async fn list_presets() -> Json<Vec<PresetInfo>> {
    Json(Preset::ALL.into_iter().map(Preset::info).collect())
}

async fn analyze_preset(
    State(service): State<AnalysisService>,
    Path(name): Path<String>,
) -> Result<Json<AnalysisReport>, ShellError> {
    let preset = Preset::from_name(&name).ok_or(ShellError::UnknownPreset(name))?;
    let report = service.submit(AnalysisInput::text(preset.text())).await?;
    Ok(Json(report))
}

async fn reset(
    State(service): State<AnalysisService>,
) -> Result<Json<ShellSnapshot>, ShellError> {
    Ok(Json(service.reset().await?))
}

async fn download_poster(State(service): State<AnalysisService>) -> Result<Response, ShellError> {
    let report = service.current_report().await.ok_or(ShellError::NoResult)?;
    let poster = Poster::new(&report.result, SystemTime::now());
    let disposition = format!("attachment; filename=\"{}\"", poster.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        poster.render(),
    )
        .into_response())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<AnalysisService>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, service))
}

async fn handle_ws(socket: WebSocket, service: AnalysisService) {
    // Subscribe before taking the snapshot so no change slips in between.
    let events = service.subscribe();
    let snapshot = service.snapshot().await;
    let (mut outgoing, incoming) = socket.split();
    pump_events(&mut outgoing, incoming, events, snapshot).await;
}

/// Sends the initial snapshot, then every state change, until the client
/// closes its side or the event channel shuts down.
async fn pump_events<S, R, E>(
    outgoing: &mut S,
    mut incoming: R,
    mut events: broadcast::Receiver<ShellEvent>,
    snapshot: ShellSnapshot,
) where
    S: Sink<Message> + Unpin,
    R: Stream<Item = Result<Message, E>> + Unpin,
{
    if send_ws_event(outgoing, ShellEvent::Snapshot { snapshot })
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            biased;
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if send_ws_event(outgoing, event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "websocket subscriber lagged");
                        continue;
                    }
                    Err(_) => break,
                }
            }
            msg = incoming.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }
}

async fn send_ws_event<S>(outgoing: &mut S, event: ShellEvent) -> Result<(), S::Error>
where
    S: Sink<Message> + Unpin,
{
    let payload = match serde_json::to_string(&event) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize websocket event");
            return Ok(());
        }
    };
    outgoing.send(Message::Text(payload)).await
}

async fn log_http_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    let status = response.status();
    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        "http request"
    );
    response
}
