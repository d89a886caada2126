//! 走法生成
//!
//! 正交单步、跳过对手的直跳、以及直跳受阻时的斜跳。

use crate::board::GameState;
use crate::constants::MAX_LEGAL_MOVES;
use crate::fence::{step_blocked, Fence};
use crate::pawn::{Cell, Pawn, Side};

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成玩家的所有合法落点
    ///
    /// 每个方向（左、右、上、下）恰好产生以下之一：
    /// 无落点、普通单步、直跳、或至多两个斜跳。
    pub fn legal_moves(player: &Pawn, opponent: &Pawn, fences: &[Fence]) -> Vec<Cell> {
        let mut moves = Vec::with_capacity(MAX_LEGAL_MOVES);
        let directions = [(-1i8, 0i8), (1, 0), (0, -1), (0, 1)];

        for (dx, dy) in directions {
            let Some(step) = player.position.offset(dx, dy) else {
                continue;
            };
            if step_blocked(player.position, step, fences) {
                continue;
            }

            if step != opponent.position {
                moves.push(step);
                continue;
            }

            // 对手占据相邻格：尝试直接跳过
            match step.offset(dx, dy) {
                Some(beyond) if !step_blocked(step, beyond, fences) => moves.push(beyond),
                _ => {
                    // 直跳被墙壁或棋盘边缘挡住，改为斜跳
                    let diagonals = if dy == 0 {
                        [(0i8, -1i8), (0, 1)]
                    } else {
                        [(-1, 0), (1, 0)]
                    };
                    for (px, py) in diagonals {
                        if let Some(diag) = step.offset(px, py) {
                            if !step_blocked(step, diag, fences) {
                                moves.push(diag);
                            }
                        }
                    }
                }
            }
        }

        moves
    }

    /// 生成当前行动方的所有合法落点
    pub fn legal_moves_for(state: &GameState, side: Side) -> Vec<Cell> {
        Self::legal_moves(
            state.player(side),
            state.player(side.opponent()),
            &state.fences,
        )
    }
}
