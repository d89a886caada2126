//! 协议常量定义

use std::time::Duration;

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 9;

/// 每名玩家的初始墙壁数量
pub const INITIAL_FENCES: u8 = 10;

/// 中继服务器座位数上限
pub const MAX_SEATS: usize = 2;

/// 单名玩家可走选项上限（本规则集的物理最大值）
pub const MAX_LEGAL_MOVES: usize = 6;

/// 昵称最大长度
pub const MAX_NICKNAME_LEN: usize = 20;

/// 中继服务器默认端口
pub const DEFAULT_PORT: u16 = 25565;

/// 回合/消息轮询间隔（毫秒）
pub const POLL_INTERVAL_MS: u64 = 1500;

/// 对手就绪轮询间隔（毫秒）
pub const READY_POLL_INTERVAL_MS: u64 = 1000;

/// 传输失败后的固定重试延迟（毫秒）
pub const RETRY_DELAY_MS: u64 = 1500;

/// 开局倒计时时长（秒）
pub const COUNTDOWN_SECS: f32 = 5.0;

/// 轮询间隔 Duration
pub const POLL_INTERVAL: Duration = Duration::from_millis(POLL_INTERVAL_MS);

/// 就绪轮询间隔 Duration
pub const READY_POLL_INTERVAL: Duration = Duration::from_millis(READY_POLL_INTERVAL_MS);

/// 重试延迟 Duration
pub const RETRY_DELAY: Duration = Duration::from_millis(RETRY_DELAY_MS);
