//! 客户端对局会话
//!
//! 持有本地权威状态副本。本地动作先过规则引擎再交给网络会话；
//! 对手动作下行后同样在本地完整复验一遍再应用——中继不校验规则，
//! 异常对端不能借此破坏本地状态。

use protocol::{
    Action, Cell, GameError, GameState, MoveGenerator, Orientation, RulesEngine, SeatId, Side,
    COUNTDOWN_SECS,
};

/// 对局阶段
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchPhase {
    /// 等待双方就位
    Lobby,
    /// 开局倒计时（双方就位后同步开始）
    Countdown {
        /// 剩余秒数
        remaining: f32,
    },
    /// 对局进行中
    Playing,
    /// 对局结束
    Finished {
        /// 胜者
        winner: Side,
    },
}

/// 客户端对局会话
pub struct ClientGame {
    /// 本地对局状态
    pub state: GameState,
    /// 本方阵营（分到座位后设置）
    pub my_side: Option<Side>,
    /// 对手昵称
    pub opponent_name: Option<String>,
    /// 选中棋子后的合法落点缓存（用于高亮显示）
    pub valid_moves: Vec<Cell>,
    /// 最近一次被接受的动作
    pub last_action: Option<Action>,
    /// 对局阶段
    pub phase: MatchPhase,
}

impl ClientGame {
    pub fn new() -> Self {
        Self {
            state: GameState::initial(),
            my_side: None,
            opponent_name: None,
            valid_moves: Vec::new(),
            last_action: None,
            phase: MatchPhase::Lobby,
        }
    }

    /// 注册成功后绑定座位
    pub fn assign_seat(&mut self, seat: SeatId) {
        self.my_side = Side::from_seat(seat);
    }

    /// 对手就位，进入开局倒计时
    pub fn opponent_joined(&mut self, name: String) {
        self.opponent_name = Some(name);
        self.phase = MatchPhase::Countdown {
            remaining: COUNTDOWN_SECS,
        };
    }

    /// 推进倒计时，归零后进入对局
    pub fn tick(&mut self, dt: f32) {
        if let MatchPhase::Countdown { remaining } = self.phase {
            let remaining = remaining - dt;
            self.phase = if remaining <= 0.0 {
                MatchPhase::Playing
            } else {
                MatchPhase::Countdown { remaining }
            };
        }
    }

    /// 是否轮到本方行动
    pub fn is_my_turn(&self) -> bool {
        matches!(self.phase, MatchPhase::Playing) && self.my_side == Some(self.state.current_turn)
    }

    /// 选中本方棋子，刷新合法落点缓存
    pub fn select_pawn(&mut self) -> &[Cell] {
        self.valid_moves = match self.my_side {
            Some(side) if self.is_my_turn() => MoveGenerator::legal_moves_for(&self.state, side),
            _ => Vec::new(),
        };
        &self.valid_moves
    }

    /// 清除选中状态
    pub fn clear_selection(&mut self) {
        self.valid_moves.clear();
    }

    /// 尝试本地移动；成功时返回应提交给中继的动作
    pub fn try_move(&mut self, to: Cell) -> Result<Action, GameError> {
        self.try_local(Action::Move { to })
    }

    /// 尝试本地放墙；成功时返回应提交给中继的动作
    pub fn try_place_fence(
        &mut self,
        anchor: Cell,
        orientation: Orientation,
    ) -> Result<Action, GameError> {
        self.try_local(Action::PlaceFence {
            anchor,
            orientation,
        })
    }

    fn try_local(&mut self, action: Action) -> Result<Action, GameError> {
        // 回合归属在本地先行检查，不持回合时根本不尝试动作
        if !self.is_my_turn() {
            return Err(GameError::NotYourTurn);
        }
        self.apply(action)?;
        Ok(action)
    }

    /// 应用对手的动作（先经本地规则引擎复验）
    pub fn apply_remote(&mut self, action: Action) -> Result<(), GameError> {
        if self.my_side == Some(self.state.current_turn) {
            tracing::warn!("remote action arrived on our turn, ignoring");
            return Err(GameError::NotYourTurn);
        }
        self.apply(action)
    }

    fn apply(&mut self, action: Action) -> Result<(), GameError> {
        let winner = RulesEngine::apply(&mut self.state, action)?;
        self.last_action = Some(action);
        self.valid_moves.clear();
        if let Some(winner) = winner {
            self.phase = MatchPhase::Finished { winner };
        }
        Ok(())
    }

    /// 重开一局：状态整体重建，座位与对手保持不变
    pub fn reset(&mut self) {
        self.state = GameState::initial();
        self.valid_moves.clear();
        self.last_action = None;
        self.phase = if self.opponent_name.is_some() {
            MatchPhase::Countdown {
                remaining: COUNTDOWN_SECS,
            }
        } else {
            MatchPhase::Lobby
        };
    }
}

impl Default for ClientGame {
    fn default() -> Self {
        Self::new()
    }
}
