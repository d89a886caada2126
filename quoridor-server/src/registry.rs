//! 座位注册表

use std::collections::HashMap;

use thiserror::Error;

use protocol::{SeatId, MAX_NICKNAME_LEN, MAX_SEATS};

/// 注册错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// 两个座位都已被占用
    #[error("Server is full")]
    Full,
    /// 昵称非法
    #[error("Invalid nickname: {0}")]
    InvalidNickname(&'static str),
}

/// 座位注册表
///
/// 昵称 -> 座位号，按注册顺序分配 1、2，最多两个座位。
pub struct SeatRegistry {
    seats: HashMap<String, SeatId>,
}

impl SeatRegistry {
    pub fn new() -> Self {
        Self {
            seats: HashMap::new(),
        }
    }

    /// 验证昵称
    pub fn validate_nickname(nickname: &str) -> Result<(), RegisterError> {
        if nickname.trim().is_empty() {
            return Err(RegisterError::InvalidNickname("nickname is empty"));
        }
        if nickname.chars().count() > MAX_NICKNAME_LEN {
            return Err(RegisterError::InvalidNickname("nickname too long"));
        }
        Ok(())
    }

    /// 注册玩家并分配座位
    ///
    /// 已注册的昵称返回原座位，掉线后用同名重新登录即回到同一座位。
    pub fn register(&mut self, nickname: &str) -> Result<SeatId, RegisterError> {
        Self::validate_nickname(nickname)?;

        if let Some(&seat) = self.seats.get(nickname) {
            return Ok(seat);
        }
        if self.seats.len() >= MAX_SEATS {
            return Err(RegisterError::Full);
        }

        let seat = (self.seats.len() + 1) as SeatId;
        self.seats.insert(nickname.to_string(), seat);
        Ok(seat)
    }

    /// 获取对手昵称
    pub fn opponent_name(&self, seat: SeatId) -> Option<&str> {
        self.seats
            .iter()
            .find(|(_, &s)| s != seat)
            .map(|(name, _)| name.as_str())
    }

    /// 两个座位是否都已占用
    pub fn is_full(&self) -> bool {
        self.seats.len() >= MAX_SEATS
    }

    /// 已注册的玩家数量
    pub fn count(&self) -> usize {
        self.seats.len()
    }
}

impl Default for SeatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
