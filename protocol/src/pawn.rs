//! 棋子与座位定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, INITIAL_FENCES};
use crate::message::SeatId;

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（先手，座位 1，从左侧出发）
    White,
    /// 黑方（后手，座位 2，从右侧出发）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 玩家数组下标
    pub fn index(&self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// 中继座位号（1 或 2）
    pub fn seat(&self) -> SeatId {
        match self {
            Side::White => 1,
            Side::Black => 2,
        }
    }

    /// 从中继座位号解析
    pub fn from_seat(seat: SeatId) -> Option<Side> {
        match seat {
            1 => Some(Side::White),
            2 => Some(Side::Black),
            _ => None,
        }
    }

    /// 开局位置
    pub fn start_position(&self) -> Cell {
        match self {
            Side::White => Cell::new_unchecked(0, 4),
            Side::Black => Cell::new_unchecked(8, 4),
        }
    }

    /// 终线（到达该列即获胜）
    pub fn goal_x(&self) -> u8 {
        match self {
            Side::White => (BOARD_SIZE - 1) as u8,
            Side::Black => 0,
        }
    }
}

/// 棋盘格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// 列 (0-8)
    pub x: u8,
    /// 行 (0-8)
    pub y: u8,
}

impl Cell {
    /// 创建新格子（越界返回 None）
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if (x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub const fn new_unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 检查格子是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }

    /// 获取偏移后的格子
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Cell> {
        let new_x = self.x as i8 + dx;
        let new_y = self.y as i8 + dy;
        if new_x >= 0 && (new_x as usize) < BOARD_SIZE && new_y >= 0 && (new_y as usize) < BOARD_SIZE
        {
            Some(Cell {
                x: new_x as u8,
                y: new_y as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 玩家棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    /// 当前位置
    pub position: Cell,
    /// 剩余墙壁数量
    pub fences_remaining: u8,
    /// 终线（整场对局固定）
    pub goal_x: u8,
}

impl Pawn {
    /// 按阵营创建开局棋子
    pub fn new(side: Side) -> Self {
        Self {
            position: side.start_position(),
            fences_remaining: INITIAL_FENCES,
            goal_x: side.goal_x(),
        }
    }

    /// 是否已到达终线
    pub fn has_reached_goal(&self) -> bool {
        self.position.x == self.goal_x
    }
}
