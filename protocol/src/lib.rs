//! Quoridor 共享协议库
//!
//! 包含:
//! - 格子、棋子、墙壁、对局状态等核心数据结构
//! - 连通性检查（BFS 终线可达性判定）
//! - 走法生成（含跳跃与斜跳特例）
//! - 墙壁放置合法性校验
//! - 规则引擎（动作应用、回合交换、胜负判定）
//! - 动作线上文本编解码与中继哨兵值

mod board;
mod constants;
mod error;
mod fence;
mod message;
mod moves;
mod pawn;
mod path;
mod rules;

pub use board::GameState;
pub use constants::*;
pub use error::{GameError, ProtocolError, Result};
pub use fence::{step_blocked, Fence, FenceValidator, Orientation};
pub use message::{
    relayed_text, Action, SeatId, ACTION_FENCE, ACTION_MOVE, HEADER_ACTION_TYPE,
    HEADER_HORIZONTAL, HEADER_SEAT, HEADER_X, HEADER_Y, NOT_YOUR_TURN, NO_MESSAGES, SERVER_FULL,
    WAITING,
};
pub use moves::MoveGenerator;
pub use pawn::{Cell, Pawn, Side};
pub use path::has_path_to_goal;
pub use rules::RulesEngine;
