//! 连通性检查
//!
//! 回答"在当前墙壁集合下，玩家是否仍能到达终线"。
//! 用于墙壁放置前的预校验，可安全地对一个含试放墙壁的集合调用。

use std::collections::VecDeque;

use crate::constants::BOARD_SIZE;
use crate::fence::{step_blocked, Fence};
use crate::pawn::Pawn;

/// 广度优先搜索：玩家从当前位置能否到达终线
pub fn has_path_to_goal(pawn: &Pawn, fences: &[Fence]) -> bool {
    let mut visited = [false; BOARD_SIZE * BOARD_SIZE];
    let mut frontier = VecDeque::new();

    visited[pawn.position.to_index()] = true;
    frontier.push_back(pawn.position);

    while let Some(cell) = frontier.pop_front() {
        if cell.x == pawn.goal_x {
            return true;
        }

        for (dx, dy) in [(0i8, -1i8), (0, 1), (-1, 0), (1, 0)] {
            let Some(next) = cell.offset(dx, dy) else {
                continue;
            };
            if visited[next.to_index()] || step_blocked(cell, next, fences) {
                continue;
            }
            visited[next.to_index()] = true;
            frontier.push_back(next);
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fence::Orientation;
    use crate::pawn::{Cell, Side};

    fn fence(x: u8, y: u8, orientation: Orientation) -> Fence {
        Fence::new(Cell::new_unchecked(x, y), orientation, Side::White)
    }

    #[test]
    fn test_empty_board_has_path() {
        assert!(has_path_to_goal(&Pawn::new(Side::White), &[]));
        assert!(has_path_to_goal(&Pawn::new(Side::Black), &[]));
    }

    #[test]
    fn test_path_found_through_gap() {
        // 沿列 1 竖起一道不完整的墙，白方仍可从缺口绕行
        let fences = vec![
            fence(1, 0, Orientation::Vertical),
            fence(1, 2, Orientation::Vertical),
            fence(1, 4, Orientation::Vertical),
            fence(1, 6, Orientation::Vertical),
        ];
        assert!(has_path_to_goal(&Pawn::new(Side::White), &fences));
    }

    #[test]
    fn test_boxed_in_pawn_has_no_path() {
        // 黑方起点 (8, 4) 三面被封，右侧是棋盘边缘
        let fences = vec![
            fence(8, 4, Orientation::Vertical),
            fence(7, 4, Orientation::Horizontal),
            fence(7, 5, Orientation::Horizontal),
        ];
        assert!(!has_path_to_goal(&Pawn::new(Side::Black), &fences));

        // 同样的墙壁不影响白方
        assert!(has_path_to_goal(&Pawn::new(Side::White), &fences));
    }

    #[test]
    fn test_pawn_on_goal_line() {
        let mut pawn = Pawn::new(Side::White);
        pawn.position = Cell::new_unchecked(8, 0);
        assert!(has_path_to_goal(&pawn, &[]));
    }

    #[test]
    fn test_full_wall_blocks() {
        // 列 1 处连续五段垂直墙壁覆盖全部 9 行，白方无路可走
        let fences = vec![
            fence(1, 0, Orientation::Vertical),
            fence(1, 2, Orientation::Vertical),
            fence(1, 4, Orientation::Vertical),
            fence(1, 6, Orientation::Vertical),
            fence(1, 7, Orientation::Vertical),
        ];
        assert!(!has_path_to_goal(&Pawn::new(Side::White), &fences));
    }
}
