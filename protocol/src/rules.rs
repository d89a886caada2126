//! 规则引擎
//!
//! 对局状态机的唯一修改入口：校验动作、应用变更、交换回合、判定胜负。
//! 非法动作以原因拒绝，状态不变，仍等待同一玩家行动。

use crate::board::GameState;
use crate::error::GameError;
use crate::fence::{Fence, FenceValidator, Orientation};
use crate::message::Action;
use crate::moves::MoveGenerator;
use crate::pawn::{Cell, Side};

/// 规则引擎
pub struct RulesEngine;

impl RulesEngine {
    /// 应用一个动作
    ///
    /// 动作不携带玩家身份，恒以当前行动方的名义执行。
    /// 成功时交换回合并检查胜负，返回胜者（如果本步制胜）。
    pub fn apply(state: &mut GameState, action: Action) -> Result<Option<Side>, GameError> {
        if state.is_over() {
            return Err(GameError::GameOver);
        }

        match action {
            Action::Move { to } => Self::apply_move(state, to)?,
            Action::PlaceFence {
                anchor,
                orientation,
            } => Self::apply_fence(state, anchor, orientation)?,
        }

        state.switch_turn();
        state.winner = Self::check_winner(state);
        Ok(state.winner)
    }

    /// 应用移动动作
    fn apply_move(state: &mut GameState, to: Cell) -> Result<(), GameError> {
        let side = state.current_turn;
        let legal = MoveGenerator::legal_moves_for(state, side);
        if !legal.contains(&to) {
            tracing::debug!("rejected move to {} for {:?}", to, side);
            return Err(GameError::IllegalMove { x: to.x, y: to.y });
        }

        state.player_mut(side).position = to;
        Ok(())
    }

    /// 应用放墙动作
    fn apply_fence(
        state: &mut GameState,
        anchor: Cell,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        let side = state.current_turn;
        // 墙壁用尽的玩家不能进入放置校验
        if state.player(side).fences_remaining == 0 {
            return Err(GameError::FencesExhausted);
        }

        let fence = Fence::new(anchor, orientation, side);
        FenceValidator::can_place(&fence, &state.fences, &state.players)?;

        state.fences.push(fence);
        state.player_mut(side).fences_remaining -= 1;
        Ok(())
    }

    /// 检查是否有玩家到达终线
    pub fn check_winner(state: &GameState) -> Option<Side> {
        [Side::White, Side::Black]
            .into_iter()
            .find(|side| state.player(*side).has_reached_goal())
    }
}
