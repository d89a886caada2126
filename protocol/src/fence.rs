//! 墙壁定义与放置合法性校验

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::error::GameError;
use crate::path::has_path_to_goal;
use crate::pawn::{Cell, Pawn, Side};

/// 墙壁方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// 水平：从锚点向 +x 方向延伸一格
    Horizontal,
    /// 垂直：从锚点向 +y 方向延伸一格
    Vertical,
}

/// 墙壁
///
/// 占据从锚点起两格长的边段，由放置它的玩家所有。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fence {
    /// 锚点（起始格）
    pub anchor: Cell,
    /// 方向
    pub orientation: Orientation,
    /// 放置者
    pub owner: Side,
}

impl Fence {
    /// 创建新墙壁
    pub fn new(anchor: Cell, orientation: Orientation, owner: Side) -> Self {
        Self {
            anchor,
            orientation,
            owner,
        }
    }

    /// 检查锚点及延伸段是否都在棋盘内
    pub fn is_in_bounds(&self) -> bool {
        let limit = (BOARD_SIZE - 1) as u8;
        match self.orientation {
            // 水平墙壁的第二段是 (x+1, y)
            Orientation::Horizontal => self.anchor.x < limit && self.anchor.y <= limit,
            // 垂直墙壁的第二段是 (x, y+1)
            Orientation::Vertical => self.anchor.x <= limit && self.anchor.y < limit,
        }
    }

    /// 检查是否与另一面墙壁的段重叠
    ///
    /// 仅同向墙壁会重叠：锚点相同，或沿延伸轴相差一格。
    /// 异向墙壁允许在交点十字交叉，永不互相排斥。
    pub fn overlaps(&self, other: &Fence) -> bool {
        if self.orientation != other.orientation {
            return false;
        }
        match self.orientation {
            Orientation::Horizontal => {
                self.anchor.y == other.anchor.y
                    && (self.anchor.x as i16 - other.anchor.x as i16).abs() <= 1
            }
            Orientation::Vertical => {
                self.anchor.x == other.anchor.x
                    && (self.anchor.y as i16 - other.anchor.y as i16).abs() <= 1
            }
        }
    }
}

/// 判断一步正交移动是否被墙壁阻挡
///
/// 墙壁跨越两格宽，因此会阻挡两条平行的格间边：
/// - 垂直墙壁 (fx, fy) 阻挡列 fx-1 与 fx 之间、行 fy 和 fy+1 处的水平移动；
/// - 水平墙壁 (fx, fy) 阻挡行 fy-1 与 fy 之间、列 fx 和 fx+1 处的垂直移动。
pub fn step_blocked(from: Cell, to: Cell, fences: &[Fence]) -> bool {
    if from.y == to.y {
        // 左右移动
        let min_x = from.x.min(to.x);
        fences.iter().any(|f| {
            f.orientation == Orientation::Vertical
                && f.anchor.x == min_x + 1
                && (f.anchor.y == from.y || f.anchor.y + 1 == from.y)
        })
    } else if from.x == to.x {
        // 上下移动
        let min_y = from.y.min(to.y);
        fences.iter().any(|f| {
            f.orientation == Orientation::Horizontal
                && f.anchor.y == min_y + 1
                && (f.anchor.x == from.x || f.anchor.x + 1 == from.x)
        })
    } else {
        false
    }
}

/// 墙壁放置校验器
pub struct FenceValidator;

impl FenceValidator {
    /// 检查墙壁能否放置
    ///
    /// 依次校验：边界、与已有墙壁重叠、试放后双方是否仍有通往终线的路径。
    /// 任一校验失败即拒绝，且不改动墙壁集合。
    pub fn can_place(fence: &Fence, fences: &[Fence], players: &[Pawn; 2]) -> Result<(), GameError> {
        if !fence.is_in_bounds() {
            return Err(GameError::FenceOutOfBounds {
                x: fence.anchor.x,
                y: fence.anchor.y,
            });
        }

        if fences.iter().any(|existing| existing.overlaps(fence)) {
            return Err(GameError::FenceOverlap);
        }

        // 试放墙壁，检查双方路径都未被封死
        let mut tentative = fences.to_vec();
        tentative.push(*fence);
        for pawn in players {
            if !has_path_to_goal(pawn, &tentative) {
                return Err(GameError::FencePathBlocked);
            }
        }

        Ok(())
    }
}
