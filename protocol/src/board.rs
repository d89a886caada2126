//! 对局状态

use serde::{Deserialize, Serialize};

use crate::fence::Fence;
use crate::pawn::{Pawn, Side};

/// 完整的对局状态
///
/// 仅由规则引擎的 `apply` 入口修改；对局结束后整体重建，不做局部修补。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 双方棋子，下标为 `Side::index()`
    pub players: [Pawn; 2],
    /// 已放置的墙壁
    pub fences: Vec<Fence>,
    /// 当前行动方
    pub current_turn: Side,
    /// 胜者（终局后设置，此后拒绝一切动作）
    pub winner: Option<Side>,
}

impl GameState {
    /// 创建开局状态
    pub fn initial() -> Self {
        Self {
            players: [Pawn::new(Side::White), Pawn::new(Side::Black)],
            fences: Vec::new(),
            current_turn: Side::White,
            winner: None,
        }
    }

    /// 获取指定阵营的棋子
    pub fn player(&self, side: Side) -> &Pawn {
        &self.players[side.index()]
    }

    /// 获取指定阵营的棋子（可变）
    pub fn player_mut(&mut self, side: Side) -> &mut Pawn {
        &mut self.players[side.index()]
    }

    /// 切换行动方
    pub fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// 对局是否已结束
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
