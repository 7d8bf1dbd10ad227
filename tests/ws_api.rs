//! WebSocket protocol integration tests.
//!
//! Full end-to-end scenarios over real connections: room creation, second
//! join, moves, win/draw detection, reset, and the rejection notices.

mod fixtures;
use std::time::Duration;

use fixtures::TestServer;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(server: &TestServer) -> WsClient {
    let (ws, _) = connect_async(server.ws_url())
        .await
        .expect("Failed to connect WebSocket");
    ws
}

async fn send_event(ws: &mut WsClient, event: Value) {
    ws.send(Message::text(event.to_string()))
        .await
        .expect("Failed to send event");
}

async fn recv_event(ws: &mut WsClient) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Connection closed unexpectedly")
            .expect("WebSocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).expect("Failed to parse message as JSON");
        }
    }
}

async fn assert_silent(ws: &mut WsClient) {
    let result = tokio::time::timeout(Duration::from_millis(300), ws.next()).await;
    assert!(result.is_err(), "expected no message, got {result:?}");
}

/// alice がルームを作成し、bob が合流して対局が始まった状態まで進める
async fn start_game(server: &TestServer, room: &str) -> (WsClient, WsClient) {
    let mut alice = connect(server).await;
    send_event(
        &mut alice,
        json!({"type": "joinGame", "username": "alice", "room": room}),
    )
    .await;
    let created = recv_event(&mut alice).await;
    assert_eq!(created["type"], "gameCreated");

    let mut bob = connect(server).await;
    send_event(
        &mut bob,
        json!({"type": "joinGame", "username": "bob", "room": room}),
    )
    .await;
    let start_alice = recv_event(&mut alice).await;
    let start_bob = recv_event(&mut bob).await;
    assert_eq!(start_alice["type"], "gameStart");
    assert_eq!(start_alice, start_bob);

    (alice, bob)
}

/// 1手指して、ルーム全員に届いた moveMade を返す
async fn play(
    alice: &mut WsClient,
    bob: &mut WsClient,
    mover: &str,
    room: &str,
    row: usize,
    col: usize,
) -> Value {
    let ws = if mover == "alice" { &mut *alice } else { &mut *bob };
    send_event(
        ws,
        json!({"type": "makeMove", "room": room, "row": row, "col": col, "username": mover}),
    )
    .await;

    let seen_by_alice = recv_event(alice).await;
    let seen_by_bob = recv_event(bob).await;
    assert_eq!(seen_by_alice["type"], "moveMade");
    assert_eq!(seen_by_alice, seen_by_bob);
    seen_by_alice
}

#[tokio::test]
async fn test_join_and_start() {
    // テスト項目: シナリオ A — 作成 ACK は作成者のみ、2人目の合流で gameStart が全員に届く
    // given (前提条件):
    let server = TestServer::start(19090).await;

    // when (操作):
    let mut alice = connect(&server).await;
    send_event(
        &mut alice,
        json!({"type": "joinGame", "username": "alice", "room": "r1"}),
    )
    .await;

    // then (期待する結果): 作成 ACK
    let created = recv_event(&mut alice).await;
    assert_eq!(created["type"], "gameCreated");
    assert_eq!(created["room"], "r1");

    // when (操作): bob が同じルームに合流
    let mut bob = connect(&server).await;
    send_event(
        &mut bob,
        json!({"type": "joinGame", "username": "bob", "room": "r1"}),
    )
    .await;

    // then (期待する結果): 空盤面・両プレイヤー・alice の手番で gameStart
    let start = recv_event(&mut alice).await;
    assert_eq!(start["type"], "gameStart");
    assert_eq!(start["players"], json!(["alice", "bob"]));
    assert_eq!(start["currentPlayer"], "alice");
    assert_eq!(
        start["board"],
        json!([["", "", ""], ["", "", ""], ["", "", ""]])
    );
    let start_bob = recv_event(&mut bob).await;
    assert_eq!(start_bob, start);
}

#[tokio::test]
async fn test_move_broadcast() {
    // テスト項目: シナリオ B — 受理された手が盤面・手番・結果とともに全員に届く
    // given (前提条件):
    let server = TestServer::start(19091).await;
    let (mut alice, mut bob) = start_game(&server, "r1").await;

    // when (操作):
    let moved = play(&mut alice, &mut bob, "alice", "r1", 0, 0).await;

    // then (期待する結果):
    assert_eq!(moved["board"][0][0], "X");
    assert_eq!(moved["currentPlayer"], "bob");
    assert!(moved["winner"].is_null());
    assert_eq!(moved["isDraw"], false);
}

#[tokio::test]
async fn test_win_by_row() {
    // テスト項目: シナリオ C — 上段を揃えた5手目で winner "X" になる
    // given (前提条件):
    let server = TestServer::start(19092).await;
    let (mut alice, mut bob) = start_game(&server, "r1").await;

    // when (操作): alice(0,0) bob(1,0) alice(0,1) bob(1,1) alice(0,2)
    play(&mut alice, &mut bob, "alice", "r1", 0, 0).await;
    play(&mut alice, &mut bob, "bob", "r1", 1, 0).await;
    play(&mut alice, &mut bob, "alice", "r1", 0, 1).await;
    play(&mut alice, &mut bob, "bob", "r1", 1, 1).await;
    let final_move = play(&mut alice, &mut bob, "alice", "r1", 0, 2).await;

    // then (期待する結果):
    assert_eq!(final_move["winner"], "X");
    assert_eq!(final_move["isDraw"], false);
    assert_eq!(
        final_move["board"][0],
        json!(["X", "X", "X"])
    );

    // 決着後の着手は actionRejected になる
    send_event(
        &mut bob,
        json!({"type": "makeMove", "room": "r1", "row": 2, "col": 2, "username": "bob"}),
    )
    .await;
    let rejected = recv_event(&mut bob).await;
    assert_eq!(rejected["type"], "actionRejected");
    assert_eq!(rejected["message"], "game is already finished");
    assert_silent(&mut alice).await;
}

#[tokio::test]
async fn test_draw() {
    // テスト項目: シナリオ D — 揃った列なしで9手目を置くと引き分けになる
    // given (前提条件):
    let server = TestServer::start(19093).await;
    let (mut alice, mut bob) = start_game(&server, "r1").await;

    // when (操作): 引き分けになる着手列
    let moves = [
        ("alice", 0, 0),
        ("bob", 0, 1),
        ("alice", 0, 2),
        ("bob", 1, 1),
        ("alice", 1, 0),
        ("bob", 1, 2),
        ("alice", 2, 1),
        ("bob", 2, 0),
    ];
    for (mover, row, col) in moves {
        let moved = play(&mut alice, &mut bob, mover, "r1", row, col).await;
        assert!(moved["winner"].is_null());
    }
    let final_move = play(&mut alice, &mut bob, "alice", "r1", 2, 2).await;

    // then (期待する結果):
    assert_eq!(final_move["winner"], "draw");
    assert_eq!(final_move["isDraw"], true);
}

#[tokio::test]
async fn test_reset_after_finish() {
    // テスト項目: シナリオ E — 決着後のリセットで空盤面・alice の手番・winner null が届く
    // given (前提条件): alice が勝利済みのルーム
    let server = TestServer::start(19094).await;
    let (mut alice, mut bob) = start_game(&server, "r1").await;
    play(&mut alice, &mut bob, "alice", "r1", 0, 0).await;
    play(&mut alice, &mut bob, "bob", "r1", 1, 0).await;
    play(&mut alice, &mut bob, "alice", "r1", 0, 1).await;
    play(&mut alice, &mut bob, "bob", "r1", 1, 1).await;
    play(&mut alice, &mut bob, "alice", "r1", 0, 2).await;

    // when (操作): bob がリセットを要求
    send_event(&mut bob, json!({"type": "resetGame", "room": "r1"})).await;

    // then (期待する結果):
    let reset_alice = recv_event(&mut alice).await;
    let reset_bob = recv_event(&mut bob).await;
    assert_eq!(reset_alice, reset_bob);
    assert_eq!(reset_alice["type"], "gameReset");
    assert_eq!(
        reset_alice["board"],
        json!([["", "", ""], ["", "", ""], ["", "", ""]])
    );
    assert_eq!(reset_alice["currentPlayer"], "alice");
    assert!(reset_alice["winner"].is_null());
}

#[tokio::test]
async fn test_third_join_rejected() {
    // テスト項目: 満室ルームへの3人目の参加は roomFull のみを受け取り、以後の
    // ブロードキャストからも外れる
    // given (前提条件):
    let server = TestServer::start(19095).await;
    let (mut alice, mut bob) = start_game(&server, "r1").await;

    // when (操作): charlie が満室のルームに参加を試みる
    let mut charlie = connect(&server).await;
    send_event(
        &mut charlie,
        json!({"type": "joinGame", "username": "charlie", "room": "r1"}),
    )
    .await;

    // then (期待する結果): charlie だけに roomFull、既存プレイヤーには何も届かない
    let rejected = recv_event(&mut charlie).await;
    assert_eq!(rejected["type"], "roomFull");
    assert_eq!(rejected["message"], "Room is full. Please join another room.");
    assert_silent(&mut alice).await;
    assert_silent(&mut bob).await;

    // 以後の moveMade も charlie には届かない
    play(&mut alice, &mut bob, "alice", "r1", 0, 0).await;
    assert_silent(&mut charlie).await;
}

#[tokio::test]
async fn test_move_out_of_turn_rejected() {
    // テスト項目: 手番でない着手は本人だけに actionRejected が届き、相手には何も届かない
    // given (前提条件):
    let server = TestServer::start(19096).await;
    let (mut alice, mut bob) = start_game(&server, "r1").await;

    // when (操作): bob が先に着手しようとする
    send_event(
        &mut bob,
        json!({"type": "makeMove", "room": "r1", "row": 0, "col": 0, "username": "bob"}),
    )
    .await;

    // then (期待する結果):
    let rejected = recv_event(&mut bob).await;
    assert_eq!(rejected["type"], "actionRejected");
    assert_eq!(rejected["message"], "it is not 'bob's turn");
    assert_silent(&mut alice).await;

    // セッションは無傷: alice の正規の手が通る
    let moved = play(&mut alice, &mut bob, "alice", "r1", 0, 0).await;
    assert_eq!(moved["board"][0][0], "X");
}

#[tokio::test]
async fn test_move_occupied_cell_rejected() {
    // テスト項目: 埋まっているセルへの着手は actionRejected になる
    // given (前提条件):
    let server = TestServer::start(19097).await;
    let (mut alice, mut bob) = start_game(&server, "r1").await;
    play(&mut alice, &mut bob, "alice", "r1", 0, 0).await;

    // when (操作): bob が同じセルに着手しようとする
    send_event(
        &mut bob,
        json!({"type": "makeMove", "room": "r1", "row": 0, "col": 0, "username": "bob"}),
    )
    .await;

    // then (期待する結果):
    let rejected = recv_event(&mut bob).await;
    assert_eq!(rejected["type"], "actionRejected");
    assert_eq!(rejected["message"], "cell (0, 0) is already occupied");
    assert_silent(&mut alice).await;
}

#[tokio::test]
async fn test_move_unknown_room_rejected() {
    // テスト項目: 存在しないルームへの着手は actionRejected になる
    // given (前提条件):
    let server = TestServer::start(19098).await;
    let mut ws = connect(&server).await;

    // when (操作):
    send_event(
        &mut ws,
        json!({"type": "makeMove", "room": "ghost", "row": 0, "col": 0, "username": "alice"}),
    )
    .await;

    // then (期待する結果):
    let rejected = recv_event(&mut ws).await;
    assert_eq!(rejected["type"], "actionRejected");
    assert_eq!(rejected["message"], "room 'ghost' does not exist");
}

#[tokio::test]
async fn test_reset_before_opponent_pinned() {
    // テスト項目: ゲスト不在のリセットは InProgress 扱いのまま、後からの合流で対局できる
    // （観測挙動の固定）
    // given (前提条件): alice のみのルーム
    let server = TestServer::start(19099).await;
    let mut alice = connect(&server).await;
    send_event(
        &mut alice,
        json!({"type": "joinGame", "username": "alice", "room": "r1"}),
    )
    .await;
    recv_event(&mut alice).await; // gameCreated

    // when (操作): ゲスト不在のままリセット
    send_event(&mut alice, json!({"type": "resetGame", "room": "r1"})).await;

    // then (期待する結果): gameReset が届き、手番は alice
    let reset = recv_event(&mut alice).await;
    assert_eq!(reset["type"], "gameReset");
    assert_eq!(reset["currentPlayer"], "alice");

    // 相手不在の間、着手は拒否される
    send_event(
        &mut alice,
        json!({"type": "makeMove", "room": "r1", "row": 0, "col": 0, "username": "alice"}),
    )
    .await;
    let rejected = recv_event(&mut alice).await;
    assert_eq!(rejected["type"], "actionRejected");
    assert_eq!(rejected["message"], "waiting for an opponent to join");

    // 後からの合流でゲームが始まる
    let mut bob = connect(&server).await;
    send_event(
        &mut bob,
        json!({"type": "joinGame", "username": "bob", "room": "r1"}),
    )
    .await;
    let start = recv_event(&mut alice).await;
    assert_eq!(start["type"], "gameStart");
    assert_eq!(start["currentPlayer"], "alice");
    recv_event(&mut bob).await; // bob 側の gameStart

    let moved = play(&mut alice, &mut bob, "alice", "r1", 0, 0).await;
    assert_eq!(moved["board"][0][0], "X");
}

#[tokio::test]
async fn test_malformed_payload_rejected() {
    // テスト項目: JSON として解釈できないペイロードは actionRejected になる
    // given (前提条件):
    let server = TestServer::start(19100).await;
    let mut ws = connect(&server).await;

    // when (操作):
    ws.send(Message::text("this is not json"))
        .await
        .expect("Failed to send event");

    // then (期待する結果):
    let rejected = recv_event(&mut ws).await;
    assert_eq!(rejected["type"], "actionRejected");
    assert_eq!(rejected["message"], "invalid message format");
}

#[tokio::test]
async fn test_rooms_endpoint_after_join() {
    // テスト項目: /api/rooms が参加済みルームのサマリを返す
    // given (前提条件):
    let server = TestServer::start(19101).await;
    let mut alice = connect(&server).await;
    send_event(
        &mut alice,
        json!({"type": "joinGame", "username": "alice", "room": "r1"}),
    )
    .await;
    recv_event(&mut alice).await; // gameCreated

    // when (操作):
    let response = reqwest::Client::new()
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    let rooms = body.as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["room"], "r1");
    assert_eq!(rooms[0]["players"], json!(["alice"]));
    assert_eq!(rooms[0]["phase"], "awaitingOpponent");
    assert_eq!(rooms[0]["moves_made"], 0);
}
