//! 后台网络会话
//!
//! 所有网络往返都发生在独立的 tokio 任务里：注册、等待对手、
//! 回合轮询、动作提交。交互/渲染循环只通过同步共享状态与之交换
//! 数据，永远不会被请求阻塞。任务伴随进程存活，没有取消原语；
//! 传输失败一律按固定延迟重试，不向玩家上抛。

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use protocol::{
    Action, SeatId, NOT_YOUR_TURN, NO_MESSAGES, POLL_INTERVAL, READY_POLL_INTERVAL, RETRY_DELAY,
    SERVER_FULL, WAITING,
};

use crate::transport::RelayTransport;

/// 会话节奏配置
///
/// 默认值取协议常量；测试中可以调小间隔加速收敛。
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// 回合/消息轮询间隔
    pub poll_interval: Duration,
    /// 对手就绪轮询间隔
    pub ready_poll_interval: Duration,
    /// 传输失败后的固定重试延迟
    pub retry_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            ready_poll_interval: READY_POLL_INTERVAL,
            retry_delay: RETRY_DELAY,
        }
    }
}

/// 会话事件（后台任务产生，前端循环消费）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// 注册成功，获得座位
    SeatAssigned(SeatId),
    /// 服务器满员，会话终止
    ServerFull,
    /// 对手已就位（可以开始开局倒计时）
    OpponentJoined(String),
    /// 当前行动座位变化
    TurnChanged(SeatId),
    /// 收到对手的动作
    OpponentAction(Action),
    /// 本地动作被中继按回合违规拒绝，已丢弃
    SubmitRejected(Action),
}

/// 后台任务与前端共享的会话状态
struct Shared {
    seat: Option<SeatId>,
    opponent: Option<String>,
    active_seat: Option<SeatId>,
    /// 待提交动作（单槽，仅在持有回合时由前端写入）
    pending: Option<Action>,
    /// 最近一次请求是否成功（失败期间前端可显示瞬时提示）
    reachable: bool,
    events: Vec<SessionEvent>,
}

impl Default for Shared {
    fn default() -> Self {
        Self {
            seat: None,
            opponent: None,
            active_seat: None,
            pending: None,
            reachable: true,
            events: Vec::new(),
        }
    }
}

/// 后台网络会话句柄
#[derive(Clone)]
pub struct NetworkSession {
    shared: Arc<Mutex<Shared>>,
}

impl NetworkSession {
    /// 启动后台任务
    pub fn spawn(
        transport: Arc<dyn RelayTransport>,
        nickname: String,
        config: SessionConfig,
    ) -> Self {
        let session = Self {
            shared: Arc::new(Mutex::new(Shared::default())),
        };
        let shared = Arc::clone(&session.shared);
        tokio::spawn(run(transport, nickname, config, shared));
        session
    }

    /// 排队一个待提交动作（覆盖尚未发出的旧动作）
    pub fn queue_action(&self, action: Action) {
        self.lock().pending = Some(action);
    }

    /// 取走累计的会话事件
    pub fn drain_events(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.lock().events)
    }

    /// 本方座位（注册成功前为 None）
    pub fn seat(&self) -> Option<SeatId> {
        self.lock().seat
    }

    /// 对手昵称
    pub fn opponent(&self) -> Option<String> {
        self.lock().opponent.clone()
    }

    /// 是否轮到本方行动
    pub fn is_my_turn(&self) -> bool {
        let shared = self.lock();
        shared.seat.is_some() && shared.seat == shared.active_seat
    }

    /// 中继当前是否可达（传输失败在后台静默重试，这里只供界面提示）
    pub fn relay_reachable(&self) -> bool {
        self.lock().reachable
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn lock_shared(shared: &Arc<Mutex<Shared>>) -> MutexGuard<'_, Shared> {
    shared
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn push_event(shared: &Arc<Mutex<Shared>>, event: SessionEvent) {
    lock_shared(shared).events.push(event);
}

fn mark_reachable(shared: &Arc<Mutex<Shared>>, reachable: bool) {
    lock_shared(shared).reachable = reachable;
}

/// 后台任务主体：注册 -> 等待对手 -> 轮询/提交循环
async fn run(
    transport: Arc<dyn RelayTransport>,
    nickname: String,
    config: SessionConfig,
    shared: Arc<Mutex<Shared>>,
) {
    // 注册，直到拿到座位号
    let seat = loop {
        match transport.register(&nickname).await {
            Ok(body) if body == SERVER_FULL => {
                tracing::warn!("relay is full, session aborted");
                push_event(&shared, SessionEvent::ServerFull);
                return;
            }
            Ok(body) => match body.trim().parse::<SeatId>() {
                Ok(seat) => break seat,
                Err(_) => {
                    tracing::warn!("unexpected register response: {}", body);
                    tokio::time::sleep(config.retry_delay).await;
                }
            },
            Err(err) => {
                tracing::warn!("register failed: {:#}, retrying", err);
                mark_reachable(&shared, false);
                tokio::time::sleep(config.retry_delay).await;
            }
        }
    };
    mark_reachable(&shared, true);
    tracing::info!("registered as seat {}", seat);
    {
        let mut guard = lock_shared(&shared);
        guard.seat = Some(seat);
        guard.events.push(SessionEvent::SeatAssigned(seat));
    }

    // 等待对手就位
    loop {
        match transport.ready(seat).await {
            Ok(body) if body == WAITING => {}
            Ok(name) => {
                tracing::info!("opponent joined: {}", name);
                let mut guard = lock_shared(&shared);
                guard.opponent = Some(name.clone());
                guard.events.push(SessionEvent::OpponentJoined(name));
                break;
            }
            Err(err) => {
                tracing::warn!("ready poll failed: {:#}, retrying", err);
            }
        }
        tokio::time::sleep(config.ready_poll_interval).await;
    }

    // 回合轮询循环
    let mut last_message = String::new();
    loop {
        let turn_body = match transport.current_turn().await {
            Ok(body) => {
                mark_reachable(&shared, true);
                body
            }
            Err(err) => {
                tracing::warn!("turn poll failed: {:#}, retrying", err);
                mark_reachable(&shared, false);
                tokio::time::sleep(config.retry_delay).await;
                continue;
            }
        };

        if let Ok(active) = turn_body.trim().parse::<SeatId>() {
            let mut guard = lock_shared(&shared);
            if guard.active_seat != Some(active) {
                guard.active_seat = Some(active);
                guard.events.push(SessionEvent::TurnChanged(active));
            }
        }

        let my_turn = lock_shared(&shared).active_seat == Some(seat);
        if my_turn {
            // 轮到本方：先取对手最近的动作
            match transport.latest_message().await {
                Ok(body) if body != NO_MESSAGES && body != last_message => {
                    last_message = body.clone();
                    match Action::decode_relayed(&body) {
                        Ok((from_seat, action)) if from_seat != seat => {
                            push_event(&shared, SessionEvent::OpponentAction(action));
                        }
                        Ok(_) => {
                            // 自己动作的回显，忽略
                        }
                        Err(err) => {
                            tracing::warn!("undecodable relay message: {}", err);
                        }
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!("message poll failed: {:#}", err);
                }
            }

            // 有排队动作则提交
            let queued = lock_shared(&shared).pending.take();
            if let Some(action) = queued {
                match transport.submit(seat, &action).await {
                    Ok(body) if body == NOT_YOUR_TURN => {
                        tracing::warn!("submit rejected out of turn, dropping action");
                        push_event(&shared, SessionEvent::SubmitRejected(action));
                    }
                    Ok(new_turn) => {
                        if let Ok(active) = new_turn.trim().parse::<SeatId>() {
                            let mut guard = lock_shared(&shared);
                            if guard.active_seat != Some(active) {
                                guard.active_seat = Some(active);
                                guard.events.push(SessionEvent::TurnChanged(active));
                            }
                        }
                    }
                    Err(err) => {
                        // 提交失败不能丢动作，重新排队下轮重试
                        tracing::warn!("submit failed: {:#}, requeueing", err);
                        let mut guard = lock_shared(&shared);
                        guard.pending.get_or_insert(action);
                    }
                }
            }
        }

        tokio::time::sleep(config.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    use protocol::Cell;
    use quoridor_server::Relay;

    /// 进程内中继：跳过 HTTP，直接驱动中继状态机
    struct InMemoryRelay(Arc<Mutex<Relay>>);

    impl InMemoryRelay {
        fn shared() -> Arc<Mutex<Relay>> {
            Arc::new(Mutex::new(Relay::new()))
        }

        fn lock(&self) -> MutexGuard<'_, Relay> {
            self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    #[async_trait]
    impl RelayTransport for InMemoryRelay {
        async fn register(&self, nickname: &str) -> Result<String> {
            Ok(self.lock().register(nickname))
        }

        async fn ready(&self, seat: SeatId) -> Result<String> {
            Ok(self.lock().ready(seat))
        }

        async fn submit(&self, seat: SeatId, action: &Action) -> Result<String> {
            Ok(self.lock().submit(seat, &action.encode_body()))
        }

        async fn current_turn(&self) -> Result<String> {
            Ok(self.lock().turn())
        }

        async fn latest_message(&self) -> Result<String> {
            Ok(self.lock().latest())
        }
    }

    fn fast_config() -> SessionConfig {
        SessionConfig {
            poll_interval: Duration::from_millis(5),
            ready_poll_interval: Duration::from_millis(5),
            retry_delay: Duration::from_millis(5),
        }
    }

    /// 轮询会话事件直到谓词命中或超时
    async fn wait_for_event<F>(session: &NetworkSession, mut pred: F) -> SessionEvent
    where
        F: FnMut(&SessionEvent) -> bool,
    {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            for event in session.drain_events() {
                if pred(&event) {
                    return event;
                }
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "timed out waiting for session event"
            );
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_two_sessions_exchange_actions() {
        let relay = InMemoryRelay::shared();
        let alice = NetworkSession::spawn(
            Arc::new(InMemoryRelay(Arc::clone(&relay))),
            "alice".to_string(),
            fast_config(),
        );

        let seat = wait_for_event(&alice, |e| matches!(e, SessionEvent::SeatAssigned(_))).await;
        assert_eq!(seat, SessionEvent::SeatAssigned(1));

        let bob = NetworkSession::spawn(
            Arc::new(InMemoryRelay(Arc::clone(&relay))),
            "bob".to_string(),
            fast_config(),
        );

        // 双方互相发现对手
        let joined = wait_for_event(&alice, |e| matches!(e, SessionEvent::OpponentJoined(_))).await;
        assert_eq!(joined, SessionEvent::OpponentJoined("bob".to_string()));
        wait_for_event(&bob, |e| matches!(e, SessionEvent::OpponentJoined(_))).await;
        assert_eq!(bob.seat(), Some(2));

        // 座位 1 先行动，动作抵达座位 2
        let opening = Action::Move {
            to: Cell::new_unchecked(1, 4),
        };
        alice.queue_action(opening);
        let received =
            wait_for_event(&bob, |e| matches!(e, SessionEvent::OpponentAction(_))).await;
        assert_eq!(received, SessionEvent::OpponentAction(opening));
        assert!(bob.is_my_turn());

        // 座位 2 回应，动作抵达座位 1
        let reply = Action::Move {
            to: Cell::new_unchecked(7, 4),
        };
        bob.queue_action(reply);
        let received =
            wait_for_event(&alice, |e| matches!(e, SessionEvent::OpponentAction(_))).await;
        assert_eq!(received, SessionEvent::OpponentAction(reply));
        assert!(alice.is_my_turn());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_third_session_sees_server_full() {
        let relay = InMemoryRelay::shared();
        let _alice = NetworkSession::spawn(
            Arc::new(InMemoryRelay(Arc::clone(&relay))),
            "alice".to_string(),
            fast_config(),
        );
        let _bob = NetworkSession::spawn(
            Arc::new(InMemoryRelay(Arc::clone(&relay))),
            "bob".to_string(),
            fast_config(),
        );

        // 前两个座位分配完成后，第三个会话收到满员事件
        let carol_transport = InMemoryRelay(Arc::clone(&relay));
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while carol_transport.lock().ready(0) == WAITING {
            assert!(tokio::time::Instant::now() < deadline);
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        let carol = NetworkSession::spawn(
            Arc::new(carol_transport),
            "carol".to_string(),
            fast_config(),
        );
        let event = wait_for_event(&carol, |e| matches!(e, SessionEvent::ServerFull)).await;
        assert_eq!(event, SessionEvent::ServerFull);
    }
}
