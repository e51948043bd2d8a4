use axum::{
    body::Bytes,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{Sink, SinkExt, Stream, StreamExt, stream::SplitSink, stream::SplitStream};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use super::api::{ApiError, SharedState};
use crate::section::SectionService;
use crate::staleness::{Invalidation, Trigger};

/// How often to send WebSocket Ping frames.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// How long to wait for a Pong response before considering the connection dead.
const PONG_TIMEOUT: Duration = Duration::from_secs(60);

// ── WebSocket message types ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WsMessage {
    /// A section's stored list was replaced.
    Invalidated { invalidation: Invalidation },
    /// Current display view of a section, sent on load and on every reload.
    View { group: String, view: Value },
}

impl WsMessage {
    fn to_text(&self) -> Option<Message> {
        match serde_json::to_string(self) {
            Ok(json) => Some(Message::Text(json.into())),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize WsMessage");
                None
            }
        }
    }
}

/// Map a client text frame to a display trigger. Clients send `visibility`
/// when the page becomes visible and `focus` when it regains focus.
pub fn parse_client_trigger(text: &str) -> Option<Trigger> {
    match text.trim().to_ascii_lowercase().as_str() {
        "visibility" | "visible" => Some(Trigger::Visibility),
        "focus" => Some(Trigger::Focus),
        _ => None,
    }
}

// ── Invalidation stream ──────────────────────────────────────────────

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    let rx = state.registry.bus().subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

async fn handle_socket(socket: WebSocket, rx: broadcast::Receiver<Invalidation>) {
    let (sender, receiver) = socket.split();
    run_socket_loop(sender, receiver, rx).await;
}

/// Core WebSocket loop with ping/pong keepalive.
///
/// Forwards every invalidation to the client and checks liveness with
/// periodic pings. If no Pong arrives within [`PONG_TIMEOUT`] after a Ping,
/// the connection is considered dead and the loop exits.
async fn run_socket_loop(
    mut sender: SplitSink<WebSocket, Message>,
    mut receiver: SplitStream<WebSocket>,
    mut rx: broadcast::Receiver<Invalidation>,
) {
    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    // The first tick completes immediately.
    ping_interval.tick().await;

    let mut last_pong = Instant::now();
    let mut awaiting_pong = false;

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if awaiting_pong && last_pong.elapsed() > PONG_TIMEOUT {
                    tracing::debug!("websocket pong timeout");
                    break;
                }
                if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
                awaiting_pong = true;
            }

            result = rx.recv() => {
                match result {
                    Ok(invalidation) => {
                        let Some(msg) = (WsMessage::Invalidated { invalidation }).to_text() else {
                            continue;
                        };
                        if sender.send(msg).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "websocket client lagged behind invalidations");
                        continue;
                    }
                }
            }

            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Pong(_))) => {
                        last_pong = Instant::now();
                        awaiting_pong = false;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    let _ = sender.send(Message::Close(None)).await;
}

// ── Section display ──────────────────────────────────────────────────

/// Serve a live display of one section. The view is pushed on connect and
/// again whenever the section goes stale; closing the socket unmounts it.
pub async fn display_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
    Path(group): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let section = state.registry.get(&group)?;
    let bus = state.registry.bus().subscribe();
    let poll_interval = state.poll_interval;
    Ok(ws.on_upgrade(move |socket| handle_display_socket(socket, section, bus, poll_interval)))
}

async fn handle_display_socket(
    socket: WebSocket,
    section: Arc<dyn SectionService>,
    bus: broadcast::Receiver<Invalidation>,
    poll_interval: Duration,
) {
    let (sender, receiver) = socket.split();
    run_display_loop(sender, receiver, section, bus, poll_interval).await;
}

/// Frame loop behind `/ws/{group}`.
///
/// Pushes a `View` frame for every load the display performs and turns
/// client `visibility`/`focus` text frames into triggers. Ends when the
/// client goes away or the display stops, then sends a Close frame.
async fn run_display_loop<S, R, E>(
    mut sender: S,
    mut receiver: R,
    section: Arc<dyn SectionService>,
    bus: broadcast::Receiver<Invalidation>,
    poll_interval: Duration,
) where
    S: Sink<Message> + Unpin,
    R: Stream<Item = Result<Message, E>> + Unpin,
{
    let (trigger_tx, trigger_rx) = mpsc::channel(8);
    let (update_tx, mut update_rx) = mpsc::channel(8);
    let group = section.slug().to_string();

    let display = {
        let section = section.clone();
        tokio::spawn(async move { section.run_display(poll_interval, bus, trigger_rx, update_tx).await })
    };

    loop {
        tokio::select! {
            update = update_rx.recv() => {
                let Some(view) = update else { break };
                let Some(msg) = (WsMessage::View { group: group.clone(), view }).to_text() else {
                    continue;
                };
                if sender.send(msg).await.is_err() {
                    break;
                }
            }

            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(trigger) = parse_client_trigger(text.as_str())
                            && trigger_tx.send(trigger).await.is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    drop(trigger_tx);
    drop(update_rx);
    match display.await {
        Ok(summary) => tracing::debug!(%group, triggers = summary.triggers, reloads = summary.reloads, "display socket closed"),
        Err(e) => tracing::warn!(%group, error = %e, "display task failed"),
    }
    let _ = sender.send(Message::Close(None)).await;
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::api::tests::test_state;
    use crate::staleness::InvalidationBus;
    use serde_json::json;
    use uuid::Uuid;

    type Client = (mpsc::Sender<Message>, mpsc::Receiver<Message>);

    /// Spawn the display loop over in-memory channels standing in for a
    /// socket. Returns the client's outgoing sender and incoming receiver.
    fn connect(section: Arc<dyn SectionService>, bus: broadcast::Receiver<Invalidation>) -> (Client, tokio::task::JoinHandle<()>) {
        let (server_tx, client_rx) = mpsc::channel::<Message>(8);
        let (client_tx, server_rx) = mpsc::channel::<Message>(8);

        let sink = Box::pin(futures_util::sink::unfold(server_tx, |tx, msg: Message| async move {
            tx.send(msg).await?;
            Ok::<_, mpsc::error::SendError<Message>>(tx)
        }));
        let stream = Box::pin(futures_util::stream::unfold(server_rx, |mut rx| async move {
            rx.recv().await.map(|msg| (Ok::<_, axum::Error>(msg), rx))
        }));

        let task = tokio::spawn(run_display_loop(sink, stream, section, bus, Duration::from_secs(3600)));
        ((client_tx, client_rx), task)
    }

    async fn next_frame(rx: &mut mpsc::Receiver<Message>) -> Message {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for a frame")
            .expect("display loop hung up")
    }

    fn view_frame(msg: Message) -> Value {
        match msg {
            Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
            other => panic!("Expected a text frame, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_display_loop_pushes_view_and_reloads_on_focus() {
        let state = test_state();
        let section = state.registry.get("contact").unwrap();
        // A bus nobody publishes on, so only client frames can trigger a reload.
        let quiet = InvalidationBus::new(4);
        let ((client_tx, mut client_rx), task) = connect(section.clone(), quiet.subscribe());

        let first = view_frame(next_frame(&mut client_rx).await);
        assert_eq!(first["type"], "View");
        assert_eq!(first["data"]["group"], "contact");
        assert_eq!(first["data"]["view"].as_array().map(Vec::len), Some(5));

        section
            .commit_json(json!({
                "fields": { "email": { "enabled": false } },
                "fieldsOrder": ["mobile", "mobileAlt", "phone", "whatsapp", "email"]
            }))
            .await
            .unwrap();
        client_tx.send(Message::Text(String::from("hello").into())).await.unwrap();
        client_tx.send(Message::Text(String::from("focus").into())).await.unwrap();

        let second = view_frame(next_frame(&mut client_rx).await);
        let ids: Vec<&str> = second["data"]["view"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["mobile", "mobileAlt", "phone", "whatsapp"]);

        // A second focus finds the flag clear, so the next frame is the Close.
        client_tx.send(Message::Text(String::from("focus").into())).await.unwrap();
        drop(client_tx);
        assert!(matches!(next_frame(&mut client_rx).await, Message::Close(None)));
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_display_loop_ends_on_client_close() {
        let state = test_state();
        let section = state.registry.get("links").unwrap();
        let ((client_tx, mut client_rx), task) = connect(section, state.registry.bus().subscribe());

        let first = view_frame(next_frame(&mut client_rx).await);
        assert_eq!(first["data"]["group"], "links");

        client_tx.send(Message::Close(None)).await.unwrap();
        assert!(matches!(next_frame(&mut client_rx).await, Message::Close(None)));
        task.await.unwrap();
        assert!(client_rx.recv().await.is_none());
    }

    #[test]
    fn test_ws_message_invalidated_serialization() {
        let msg = WsMessage::Invalidated {
            invalidation: Invalidation::new("links", "links-data-updated", Uuid::nil()),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"Invalidated\""));
        assert!(json.contains("\"data\""));
        assert!(json.contains("\"flag\":\"links-data-updated\""));
    }

    #[test]
    fn test_ws_message_view_serialization() {
        let msg = WsMessage::View {
            group: "contact".into(),
            view: serde_json::json!([{"id": "mobile"}]),
        };
        let value: Value = serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(value["type"], "View");
        assert_eq!(value["data"]["group"], "contact");
        assert_eq!(value["data"]["view"][0]["id"], "mobile");
    }

    #[test]
    fn test_parse_client_trigger() {
        assert_eq!(parse_client_trigger("focus"), Some(Trigger::Focus));
        assert_eq!(parse_client_trigger(" Visibility\n"), Some(Trigger::Visibility));
        assert_eq!(parse_client_trigger("hello"), None);
    }
}
