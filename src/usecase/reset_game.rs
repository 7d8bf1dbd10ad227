//! UseCase: ゲームリセット処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ResetGameUseCase::execute() メソッド
//! - 任意の状態からの盤面初期化とスロット保持
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：リセット後はホストの手番から再開する
//! - 存在しないルームへのリセットが明示的なエラーになることを保証
//! - ゲスト不在のリセットが観測挙動どおり InProgress に遷移することを固定
//!
//! ### どのような状況を想定しているか
//! - 正常系：決着後のリセット
//! - 異常系：未知のルームへのリセット
//! - エッジケース：対戦相手の参加前のリセット

use std::sync::Arc;

use crate::domain::{GameSnapshot, RoomId, SessionRegistry};

use super::error::ResetError;

/// ゲームリセットのユースケース
pub struct ResetGameUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl ResetGameUseCase {
    /// 新しい ResetGameUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// リセットを実行
    ///
    /// # Arguments
    ///
    /// * `room` - 対象ルームの ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(GameSnapshot)` - リセット後のセッション状態（ブロードキャスト用）
    /// * `Err(ResetError)` - 未知のルーム
    pub async fn execute(&self, room: &RoomId) -> Result<GameSnapshot, ResetError> {
        let handle = self
            .registry
            .lookup(room)
            .await
            .ok_or_else(|| ResetError::RoomNotFound(room.as_str().to_string()))?;

        let mut session = handle.lock().await;
        session.reset();

        Ok(session.snapshot())
    }
}
