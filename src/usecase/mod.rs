//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（Event Gateway）から呼び出され、Domain 層を操作します。

pub mod error;
pub mod join_game;
pub mod make_move;
pub mod reset_game;

pub use error::{MakeMoveError, ResetError};
pub use join_game::{JoinGameUseCase, JoinOutcome};
pub use make_move::MakeMoveUseCase;
pub use reset_game::ResetGameUseCase;
