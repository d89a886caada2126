//! HTTP 路由
//!
//! 五个操作都以纯文本请求/应答，全部中继状态由一把互斥锁保护，
//! 两个客户端并发轮询/提交时不会丢失更新。

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;

use protocol::{SeatId, HEADER_SEAT, NOT_YOUR_TURN};

use crate::relay::Relay;

/// 共享中继状态（单一互斥锁）
pub type SharedRelay = Arc<Mutex<Relay>>;

/// 构建路由表
pub fn router(relay: SharedRelay) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/ready", get(ready))
        .route("/message", post(message))
        .route("/turn", get(turn))
        .route("/messages", get(messages))
        .with_state(relay)
}

/// 在给定监听器上运行中继服务
pub async fn serve(listener: tokio::net::TcpListener, relay: SharedRelay) -> std::io::Result<()> {
    axum::serve(listener, router(relay)).await
}

/// 取锁；锁中毒时继续使用内部数据
fn lock(relay: &SharedRelay) -> MutexGuard<'_, Relay> {
    relay.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 从请求头解析座位号
fn seat_from_headers(headers: &HeaderMap) -> Option<SeatId> {
    headers.get(HEADER_SEAT)?.to_str().ok()?.parse().ok()
}

/// POST /login：正文为昵称，应答座位号或满员提示
async fn login(State(relay): State<SharedRelay>, body: String) -> String {
    lock(&relay).register(&body)
}

/// GET /ready：应答 Waiting 或对手昵称
async fn ready(State(relay): State<SharedRelay>, headers: HeaderMap) -> String {
    let seat = seat_from_headers(&headers).unwrap_or(0);
    lock(&relay).ready(seat)
}

/// POST /message：提交动作；中继只读座位头，正文按不透明文本转发
async fn message(State(relay): State<SharedRelay>, headers: HeaderMap, body: String) -> String {
    match seat_from_headers(&headers) {
        Some(seat) => lock(&relay).submit(seat, &body),
        // 缺失或无法解析的座位头按回合违规处理
        None => NOT_YOUR_TURN.to_string(),
    }
}

/// GET /turn：应答当前行动座位号
async fn turn(State(relay): State<SharedRelay>) -> String {
    lock(&relay).turn()
}

/// GET /messages：应答最近一条转发消息
async fn messages(State(relay): State<SharedRelay>) -> String {
    lock(&relay).latest()
}
