//! WebSocket connection handler: the event gateway.
//!
//! Each connection gets its own unbounded channel; inbound protocol events
//! are dispatched to the corresponding usecase and the resulting state is
//! pushed to every connection in the room's broadcast group. The gateway
//! holds no game logic itself.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    common::time::get_jst_timestamp,
    domain::{CellPosition, ConnectionId, ConnectionIdFactory, GameError, PlayerName, RoomId},
    infrastructure::dto::websocket::{
        ActionRejectedMessage, ClientEvent, GameCreatedMessage, GameResetMessage, GameStartMessage,
        MessageType, MoveMadeMessage, RoomFullMessage,
    },
    ui::state::{AppState, ClientInfo},
    usecase::{JoinGameUseCase, JoinOutcome, MakeMoveUseCase, ResetGameUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let conn_id = ConnectionIdFactory::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, conn_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, conn_id: ConnectionId) {
    let (mut sender, mut receiver) = socket.split();

    // Channel through which this connection receives its own and broadcast events
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    tracing::info!("Connection '{}' established", conn_id);

    let recv_state = state.clone();
    let recv_conn_id = conn_id.clone();
    let recv_tx = tx.clone();

    // Spawn a task to receive protocol events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text);

                    // Validate the payload shape before touching any session state
                    match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            dispatch_event(&recv_state, &recv_conn_id, &recv_tx, event).await;
                        }
                        Err(e) => {
                            tracing::warn!("Failed to parse message as JSON: {}", e);
                            send_rejection(&recv_tx, "invalid message format");
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_conn_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued events out to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Disconnection only drops broadcast membership. The game session itself
    // is not transitioned: a room with a vanished player stays as it was.
    leave_all_rooms(&state, &conn_id).await;
    tracing::info!("Connection '{}' closed", conn_id);
}

/// Route one inbound event to its usecase and fan out the result.
async fn dispatch_event(
    state: &Arc<AppState>,
    conn_id: &ConnectionId,
    tx: &mpsc::UnboundedSender<String>,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinGame { username, room } => {
            let (player, room_id) = match (PlayerName::new(username), RoomId::new(room)) {
                (Ok(player), Ok(room_id)) => (player, room_id),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!("Invalid joinGame payload: {}", e);
                    send_rejection(tx, &e.to_string());
                    return;
                }
            };

            let usecase = JoinGameUseCase::new(state.registry.clone());
            match usecase.execute(&room_id, &player).await {
                JoinOutcome::Created(_) => {
                    join_room(state, &room_id, conn_id, tx.clone()).await;
                    let msg = GameCreatedMessage {
                        r#type: MessageType::GameCreated,
                        room: room_id.as_str().to_string(),
                    };
                    send_to(tx, &serde_json::to_string(&msg).unwrap());
                    tracing::info!("'{}' created room '{}'", player, room_id);
                }
                JoinOutcome::Started(snapshot) => {
                    join_room(state, &room_id, conn_id, tx.clone()).await;
                    let msg = GameStartMessage::from_snapshot(&snapshot);
                    broadcast_to_room(state, &room_id, &serde_json::to_string(&msg).unwrap()).await;
                    tracing::info!("'{}' joined room '{}', game started", player, room_id);
                }
                JoinOutcome::Rejected(reason) => {
                    // The rejected requester is never added to the broadcast group
                    let message = match reason {
                        GameError::RoomFull => {
                            "Room is full. Please join another room.".to_string()
                        }
                        other => other.to_string(),
                    };
                    let msg = RoomFullMessage {
                        r#type: MessageType::RoomFull,
                        message,
                    };
                    send_to(tx, &serde_json::to_string(&msg).unwrap());
                    tracing::warn!("Rejected join of '{}' to room '{}'", player, room_id);
                }
            }
        }
        ClientEvent::MakeMove {
            room,
            row,
            col,
            username,
        } => {
            let (player, room_id, pos) = match (
                PlayerName::new(username),
                RoomId::new(room),
                CellPosition::new(row, col),
            ) {
                (Ok(player), Ok(room_id), Ok(pos)) => (player, room_id, pos),
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                    tracing::warn!("Invalid makeMove payload: {}", e);
                    send_rejection(tx, &e.to_string());
                    return;
                }
            };

            let usecase = MakeMoveUseCase::new(state.registry.clone());
            match usecase.execute(&room_id, &player, pos).await {
                Ok(snapshot) => {
                    let msg = MoveMadeMessage::from_snapshot(&snapshot);
                    broadcast_to_room(state, &room_id, &serde_json::to_string(&msg).unwrap()).await;
                    tracing::info!("'{}' moved at {} in room '{}'", player, pos, room_id);
                }
                Err(e) => {
                    // Rejections go to the acting connection only
                    tracing::warn!("Rejected move by '{}' in room '{}': {}", player, room_id, e);
                    send_rejection(tx, &e.to_string());
                }
            }
        }
        ClientEvent::ResetGame { room } => {
            let room_id = match RoomId::new(room) {
                Ok(room_id) => room_id,
                Err(e) => {
                    tracing::warn!("Invalid resetGame payload: {}", e);
                    send_rejection(tx, &e.to_string());
                    return;
                }
            };

            let usecase = ResetGameUseCase::new(state.registry.clone());
            match usecase.execute(&room_id).await {
                Ok(snapshot) => {
                    let msg = GameResetMessage::from_snapshot(&snapshot);
                    broadcast_to_room(state, &room_id, &serde_json::to_string(&msg).unwrap()).await;
                    tracing::info!("Room '{}' was reset", room_id);
                }
                Err(e) => {
                    tracing::warn!("Rejected reset of room '{}': {}", room_id, e);
                    send_rejection(tx, &e.to_string());
                }
            }
        }
    }
}

/// Add a connection to a room's broadcast group.
async fn join_room(
    state: &AppState,
    room: &RoomId,
    conn_id: &ConnectionId,
    sender: mpsc::UnboundedSender<String>,
) {
    let mut members = state.room_members.lock().await;
    members.entry(room.as_str().to_string()).or_default().insert(
        conn_id.as_str().to_string(),
        ClientInfo {
            sender,
            connected_at: get_jst_timestamp(),
        },
    );
}

/// Push an event to every connection currently joined to the room.
///
/// Best-effort: a failed delivery to one connection does not affect the
/// others or the session state.
async fn broadcast_to_room(state: &AppState, room: &RoomId, payload: &str) {
    let members = state.room_members.lock().await;
    if let Some(connections) = members.get(room.as_str()) {
        for (conn_id, client_info) in connections.iter() {
            if client_info.sender.send(payload.to_string()).is_err() {
                tracing::warn!("Failed to send message to connection '{}'", conn_id);
            }
        }
    }
}

/// Remove a connection from every room's broadcast group.
async fn leave_all_rooms(state: &AppState, conn_id: &ConnectionId) {
    let mut members = state.room_members.lock().await;
    for (room, connections) in members.iter_mut() {
        if connections.remove(conn_id.as_str()).is_some() {
            tracing::info!("Connection '{}' left room '{}'", conn_id, room);
        }
    }
    members.retain(|_, connections| !connections.is_empty());
}

/// Send an event to a single connection.
fn send_to(tx: &mpsc::UnboundedSender<String>, payload: &str) {
    if tx.send(payload.to_string()).is_err() {
        tracing::warn!("Failed to send message to own connection");
    }
}

/// Send an `actionRejected` notice to the acting connection only.
fn send_rejection(tx: &mpsc::UnboundedSender<String>, message: &str) {
    let msg = ActionRejectedMessage {
        r#type: MessageType::ActionRejected,
        message: message.to_string(),
    };
    send_to(tx, &serde_json::to_string(&msg).unwrap());
}
