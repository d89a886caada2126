//! 动作与线上文本格式定义
//!
//! 中继协议的所有正文都是纯 UTF-8 文本。动作在发送端编码为自由文本正文，
//! 中继包装后转发，接收端从转发文本中按数字位恢复出同样的四元组字段。

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::fence::Orientation;
use crate::pawn::Cell;

/// 座位号（1 或 2）
pub type SeatId = u8;

/// HTTP 头：座位号
pub const HEADER_SEAT: &str = "Client-ID";
/// HTTP 头：动作类型
pub const HEADER_ACTION_TYPE: &str = "Action-Type";
/// HTTP 头：x 坐标
pub const HEADER_X: &str = "X";
/// HTTP 头：y 坐标
pub const HEADER_Y: &str = "Y";
/// HTTP 头：墙壁方向标志
pub const HEADER_HORIZONTAL: &str = "Is-Horizontal";

/// 注册时服务器满员的应答文本
pub const SERVER_FULL: &str = "Server is full.Please try again later";
/// 等待对手加入的应答文本
pub const WAITING: &str = "Waiting";
/// 尚无消息的哨兵文本
pub const NO_MESSAGES: &str = "No messages yet.";
/// 非当前回合提交动作的拒绝文本
pub const NOT_YOUR_TURN: &str = "Not your turn to send message.";

/// 动作类型编码：移动
pub const ACTION_MOVE: u8 = 1;
/// 动作类型编码：放置墙壁
pub const ACTION_FENCE: u8 = 2;

/// 一次玩家动作（回合交换的最小单位）
///
/// 不携带玩家身份：接收端根据回合交替推断是谁的动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// 移动到目标格
    Move {
        /// 目标格
        to: Cell,
    },
    /// 放置墙壁
    PlaceFence {
        /// 锚点
        anchor: Cell,
        /// 方向
        orientation: Orientation,
    },
}

impl Action {
    /// 动作类型编码
    pub fn kind(&self) -> u8 {
        match self {
            Action::Move { .. } => ACTION_MOVE,
            Action::PlaceFence { .. } => ACTION_FENCE,
        }
    }

    /// 动作涉及的格子
    pub fn cell(&self) -> Cell {
        match self {
            Action::Move { to } => *to,
            Action::PlaceFence { anchor, .. } => *anchor,
        }
    }

    /// 墙壁方向标志（移动动作恒为 0）
    pub fn horizontal_flag(&self) -> u8 {
        match self {
            Action::PlaceFence {
                orientation: Orientation::Horizontal,
                ..
            } => 1,
            _ => 0,
        }
    }

    /// 从四元组字段还原动作
    pub fn from_fields(kind: u8, x: u8, y: u8, horizontal: bool) -> Result<Action> {
        let cell = Cell::new(x, y).ok_or_else(|| ProtocolError::MalformedAction {
            reason: format!("cell ({}, {}) out of range", x, y),
        })?;
        match kind {
            ACTION_MOVE => Ok(Action::Move { to: cell }),
            ACTION_FENCE => Ok(Action::PlaceFence {
                anchor: cell,
                orientation: if horizontal {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                },
            }),
            other => Err(ProtocolError::UnknownActionType(other)),
        }
    }

    /// 编码为提交给中继的正文文本
    pub fn encode_body(&self) -> String {
        let cell = self.cell();
        format!(
            "ActionType: {} | {{{} , {}}} | isHorizontal: {} | ",
            self.kind(),
            cell.x,
            cell.y,
            self.horizontal_flag()
        )
    }

    /// 从中继转发的文本解码
    ///
    /// 转发文本形如 `Client 1 sent message: ActionType: 1 | {3 , 4} | isHorizontal: 0 | `，
    /// 其中全部字段都是单个数字；按出现顺序扫描数字位即可恢复
    /// （座位号、动作类型、x、y、方向标志）。
    pub fn decode_relayed(text: &str) -> Result<(SeatId, Action)> {
        let digits: Vec<u8> = text
            .bytes()
            .filter(|b| b.is_ascii_digit())
            .map(|b| b - b'0')
            .collect();

        if digits.len() < 5 {
            return Err(ProtocolError::MalformedAction {
                reason: format!("expected 5 digit fields, found {}", digits.len()),
            });
        }

        let seat = digits[0];
        if seat != 1 && seat != 2 {
            return Err(ProtocolError::InvalidSeat(seat));
        }

        let action = Self::from_fields(digits[1], digits[2], digits[3], digits[4] != 0)?;
        Ok((seat, action))
    }
}

/// 将动作正文包装为中继转发文本
pub fn relayed_text(seat: SeatId, body: &str) -> String {
    format!("Client {} sent message: {}", seat, body)
}
