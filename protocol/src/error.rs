//! 错误类型定义

use thiserror::Error;

/// 规则错误
///
/// 全部为本地可恢复错误：提示原因后状态保持不变，允许玩家重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 目标格不在合法落点集合内
    #[error("Invalid move to ({x}, {y})")]
    IllegalMove { x: u8, y: u8 },

    /// 墙壁（含延伸段）超出棋盘范围
    #[error("Wall out of bounds at ({x}, {y})")]
    FenceOutOfBounds { x: u8, y: u8 },

    /// 与已有同向墙壁的段重叠
    #[error("Overlaps with another wall")]
    FenceOverlap,

    /// 封死了某一方通往终线的所有路径
    #[error("It blocks all paths")]
    FencePathBlocked,

    /// 墙壁已用完
    #[error("No walls left")]
    FencesExhausted,

    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 对局已结束
    #[error("Game is already over")]
    GameOver,
}

/// 协议错误（线上文本解析失败等）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// 动作文本无法解析
    #[error("Malformed action payload: {reason}")]
    MalformedAction { reason: String },

    /// 未知的动作类型编码
    #[error("Unknown action type: {0}")]
    UnknownActionType(u8),

    /// 座位号超出范围
    #[error("Invalid seat number: {0}")]
    InvalidSeat(u8),
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
