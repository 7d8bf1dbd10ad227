//! UseCase: ルームへの参加（作成 or 合流）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinGameUseCase::execute() メソッド
//! - 未知のルームに対するセッション作成と、既存ルームへの2人目の合流
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：最初の参加者がホスト（slot 0）になる
//! - 2人目の合流でゲームが開始されることを保証
//! - 満室のルームへの参加が既存状態を壊さないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルーム作成、2人目の合流
//! - 異常系：満室ルームへの3人目の参加、ホスト自身の再参加
//! - エッジケース：リセット直後（ゲスト不在の InProgress）のルームへの合流

use std::sync::Arc;

use crate::domain::{GameError, GameSnapshot, PlayerName, RoomId, SessionRegistry};

/// Result of a create-or-join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The room was unseen; a session was created with the requester as host
    Created(GameSnapshot),
    /// The requester filled the guest slot; the game starts
    Started(GameSnapshot),
    /// No slot available for the requester; nothing was mutated
    Rejected(GameError),
}

/// ルーム参加のユースケース
pub struct JoinGameUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl JoinGameUseCase {
    /// 新しい JoinGameUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 参加先のルーム ID（Domain Model）
    /// * `player` - 参加するプレイヤー名（Domain Model）
    ///
    /// # Returns
    ///
    /// 作成・開始・拒否のいずれかを表す [`JoinOutcome`]
    pub async fn execute(&self, room: &RoomId, player: &PlayerName) -> JoinOutcome {
        // 1. Registry からセッションを取得（未知のルームなら作成）
        let (handle, created) = self.registry.lookup_or_create(room, player).await;
        let mut session = handle.lock().await;

        if created {
            tracing::info!("Created game session for room '{}' hosted by '{}'", room, player);
            return JoinOutcome::Created(session.snapshot());
        }

        // 2. 既存セッションへの合流を試みる
        match session.join(player.clone()) {
            Ok(()) => JoinOutcome::Started(session.snapshot()),
            Err(reason) => JoinOutcome::Rejected(reason),
        }
    }
}
