//! UseCase: 着手処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MakeMoveUseCase::execute() メソッド
//! - Registry からのセッション解決と、Domain 層による着手の受理・拒否
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：受理された手だけがブロードキャスト対象になる
//! - 存在しないルームへの着手が明示的なエラーになることを保証
//! - 拒否された手がセッション状態を変化させないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：手番プレイヤーの着手と勝利・引き分けの検出
//! - 異常系：未知のルーム、手番違い、埋まったセルへの着手
//! - エッジケース：決着直後の着手

use std::sync::Arc;

use crate::domain::{CellPosition, GameSnapshot, PlayerName, RoomId, SessionRegistry};

use super::error::MakeMoveError;

/// 着手のユースケース
pub struct MakeMoveUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl MakeMoveUseCase {
    /// 新しい MakeMoveUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 着手を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 対象ルームの ID（Domain Model）
    /// * `player` - 着手するプレイヤー名（Domain Model）
    /// * `pos` - 着手先のセル座標（検証済み）
    ///
    /// # Returns
    ///
    /// * `Ok(GameSnapshot)` - 着手後のセッション状態（ブロードキャスト用）
    /// * `Err(MakeMoveError)` - 着手拒否（セッション状態は不変）
    pub async fn execute(
        &self,
        room: &RoomId,
        player: &PlayerName,
        pos: CellPosition,
    ) -> Result<GameSnapshot, MakeMoveError> {
        // 1. Registry からセッションを解決（未知のルームはエラー）
        let handle = self
            .registry
            .lookup(room)
            .await
            .ok_or_else(|| MakeMoveError::RoomNotFound(room.as_str().to_string()))?;

        // 2. Domain 層に遷移を委譲
        let mut session = handle.lock().await;
        session.make_move(player, pos)?;

        Ok(session.snapshot())
    }
}
