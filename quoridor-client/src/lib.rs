//! Quoridor 客户端网络层
//!
//! 包含:
//! - 中继传输抽象与 reqwest HTTP 实现
//! - 后台轮询会话（注册、等待对手、回合轮询、动作提交）
//! - 客户端对局会话（本地状态、倒计时、动作复验）
//!
//! 渲染、菜单与音频由外部前端负责，本库只提供它们消费的会话层。

pub mod game;
pub mod session;
pub mod transport;

pub use game::{ClientGame, MatchPhase};
pub use session::{NetworkSession, SessionConfig, SessionEvent};
pub use transport::{HttpRelay, RelayConfig, RelayTransport};
