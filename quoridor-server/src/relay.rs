//! 中继状态机
//!
//! 只裁决"现在轮到谁"并转发最近的动作文本，不校验动作的规则合法性——
//! 合法性由双方客户端各自的规则引擎独立复验。

use protocol::{relayed_text, SeatId, NOT_YOUR_TURN, NO_MESSAGES, SERVER_FULL, WAITING};

use crate::registry::{RegisterError, SeatRegistry};

/// 中继器
///
/// 持有对局期间的全部共享状态：座位注册表、当前行动座位、追加式消息日志。
/// 传输层完全无状态，所有请求都针对这一份数据读写。
pub struct Relay {
    registry: SeatRegistry,
    /// 当前允许提交动作的座位，开局为座位 1
    active_seat: SeatId,
    /// 已转发的动作文本（追加式日志，对外只暴露最新一条）
    messages: Vec<String>,
}

impl Relay {
    pub fn new() -> Self {
        Self {
            registry: SeatRegistry::new(),
            active_seat: 1,
            messages: Vec::new(),
        }
    }

    /// 处理注册：应答座位号文本，或满员/昵称非法的提示文本
    pub fn register(&mut self, nickname: &str) -> String {
        match self.registry.register(nickname) {
            Ok(seat) => {
                tracing::info!("client {} [{}] registered", seat, nickname);
                seat.to_string()
            }
            Err(RegisterError::Full) => SERVER_FULL.to_string(),
            Err(err @ RegisterError::InvalidNickname(_)) => err.to_string(),
        }
    }

    /// 处理就绪查询：对手未到位时应答 `Waiting`，否则应答对手昵称
    pub fn ready(&self, seat: SeatId) -> String {
        if !self.registry.is_full() {
            return WAITING.to_string();
        }
        self.registry
            .opponent_name(seat)
            .unwrap_or(WAITING)
            .to_string()
    }

    /// 处理动作提交
    ///
    /// 非当前回合的座位提交会收到哨兵应答且状态不变；
    /// 接受后记录转发文本、交换行动座位，并应答新的行动座位号。
    pub fn submit(&mut self, seat: SeatId, body: &str) -> String {
        if seat != self.active_seat {
            tracing::warn!(
                "seat {} submitted out of turn (active seat: {})",
                seat,
                self.active_seat
            );
            return NOT_YOUR_TURN.to_string();
        }

        self.messages.push(relayed_text(seat, body));
        self.active_seat = if self.active_seat == 1 { 2 } else { 1 };
        tracing::info!("client {} sent message: {}", seat, body);

        self.active_seat.to_string()
    }

    /// 当前行动座位号文本
    pub fn turn(&self) -> String {
        self.active_seat.to_string()
    }

    /// 最近一条转发消息，尚无消息时应答哨兵文本
    pub fn latest(&self) -> String {
        self.messages
            .last()
            .cloned()
            .unwrap_or_else(|| NO_MESSAGES.to_string())
    }

    /// 已转发的动作总数
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Action, Cell};

    #[test]
    fn test_register_two_seats_then_full() {
        let mut relay = Relay::new();

        assert_eq!(relay.register("alice"), "1");
        assert_eq!(relay.register("bob"), "2");
        assert_eq!(relay.register("carol"), SERVER_FULL);
    }

    #[test]
    fn test_ready_reports_opponent() {
        let mut relay = Relay::new();

        relay.register("alice");
        assert_eq!(relay.ready(1), WAITING);

        relay.register("bob");
        assert_eq!(relay.ready(1), "bob");
        assert_eq!(relay.ready(2), "alice");
    }

    #[test]
    fn test_turn_alternates_on_submit() {
        let mut relay = Relay::new();
        relay.register("alice");
        relay.register("bob");
        assert_eq!(relay.turn(), "1");

        // 座位 1 在自己的回合提交，行动座位变为 2
        assert_eq!(relay.submit(1, "ActionType: 1 | {1 , 4} | isHorizontal: 0 | "), "2");
        assert_eq!(relay.turn(), "2");

        // 座位 2 随后提交同样成功
        assert_eq!(relay.submit(2, "ActionType: 1 | {7 , 4} | isHorizontal: 0 | "), "1");
        assert_eq!(relay.turn(), "1");
    }

    #[test]
    fn test_out_of_turn_submit_rejected() {
        let mut relay = Relay::new();
        relay.register("alice");
        relay.register("bob");

        assert_eq!(relay.submit(2, "payload"), NOT_YOUR_TURN);
        assert_eq!(relay.turn(), "1");
        assert_eq!(relay.message_count(), 0);
    }

    #[test]
    fn test_latest_message_is_decodable() {
        let mut relay = Relay::new();
        relay.register("alice");
        relay.register("bob");

        assert_eq!(relay.latest(), NO_MESSAGES);

        let action = Action::Move {
            to: Cell::new_unchecked(1, 4),
        };
        relay.submit(1, &action.encode_body());

        let (seat, decoded) = Action::decode_relayed(&relay.latest()).unwrap();
        assert_eq!(seat, 1);
        assert_eq!(decoded, action);
    }

    #[test]
    fn test_log_is_append_only() {
        let mut relay = Relay::new();
        relay.register("alice");
        relay.register("bob");

        relay.submit(1, "first");
        relay.submit(2, "second");

        assert_eq!(relay.message_count(), 2);
        assert_eq!(relay.latest(), relayed_text(2, "second"));
    }
}
