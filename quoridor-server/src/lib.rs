//! Quoridor 中继服务端
//!
//! 包含:
//! - 座位注册表（昵称 -> 座位，最多两席）
//! - 回合裁决与动作转发
//! - HTTP 路由（纯文本请求/应答）

pub mod registry;
pub mod relay;
pub mod routes;

pub use registry::{RegisterError, SeatRegistry};
pub use relay::Relay;
pub use routes::{router, serve, SharedRelay};
