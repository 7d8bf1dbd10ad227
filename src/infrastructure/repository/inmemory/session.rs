//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! エントリは最初の参加時に作成され、プロセスが生きている間は削除されません
//! （eviction なし、容量制限なし、TTL なし）。セッションごとに Mutex を持つため、
//! ルーム単位の遷移はマルチスレッドランタイム上でも逐次化されます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    common::time::get_jst_timestamp,
    domain::{
        GameSession, GameSnapshot, PlayerName, RoomId, SessionHandle, SessionRegistry, Timestamp,
    },
};

/// インメモリ Session Registry 実装
///
/// HashMap をインメモリ DB として使用する実装。
/// ドメイン層の SessionRegistry trait を実装します（依存性の逆転）。
pub struct InMemorySessionRegistry {
    /// ルーム ID からセッションへのマッピング
    sessions: Mutex<HashMap<RoomId, SessionHandle>>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn lookup(&self, room: &RoomId) -> Option<SessionHandle> {
        let sessions = self.sessions.lock().await;
        sessions.get(room).cloned()
    }

    async fn lookup_or_create(&self, room: &RoomId, host: &PlayerName) -> (SessionHandle, bool) {
        let mut sessions = self.sessions.lock().await;
        if let Some(handle) = sessions.get(room) {
            return (handle.clone(), false);
        }

        let session = GameSession::new(host.clone(), Timestamp::new(get_jst_timestamp()));
        let handle: SessionHandle = Arc::new(Mutex::new(session));
        sessions.insert(room.clone(), handle.clone());
        (handle, true)
    }

    async fn list(&self) -> Vec<(RoomId, GameSnapshot)> {
        // マップのロックを保持したままセッションのロックを待たない
        let handles: Vec<(RoomId, SessionHandle)> = {
            let sessions = self.sessions.lock().await;
            sessions
                .iter()
                .map(|(room, handle)| (room.clone(), handle.clone()))
                .collect()
        };

        let mut snapshots = Vec::with_capacity(handles.len());
        for (room, handle) in handles {
            let session = handle.lock().await;
            snapshots.push((room, session.snapshot()));
        }
        snapshots
    }
}
