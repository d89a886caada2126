//! 中继传输层
//!
//! `RelayTransport` 把五个中继操作抽象成 trait，使轮询循环与具体
//! HTTP 实现解耦，测试中可以用进程内中继替代真实网络。

use anyhow::{Context, Result};
use async_trait::async_trait;

use protocol::{
    Action, SeatId, DEFAULT_PORT, HEADER_ACTION_TYPE, HEADER_HORIZONTAL, HEADER_SEAT, HEADER_X,
    HEADER_Y,
};

/// 中继客户端配置
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// 中继服务器地址，如 `http://192.168.1.107:25565`
    pub base_url: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://127.0.0.1:{}", DEFAULT_PORT),
            timeout_secs: 10,
        }
    }
}

/// 中继操作抽象
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// 注册昵称，应答座位号文本或满员提示
    async fn register(&self, nickname: &str) -> Result<String>;

    /// 查询对手是否就绪（`Waiting` 或对手昵称）
    async fn ready(&self, seat: SeatId) -> Result<String>;

    /// 提交动作，应答新的行动座位号或回合违规提示
    async fn submit(&self, seat: SeatId, action: &Action) -> Result<String>;

    /// 查询当前行动座位号
    async fn current_turn(&self) -> Result<String>;

    /// 查询最近一条转发消息
    async fn latest_message(&self) -> Result<String>;
}

/// 基于 reqwest 的 HTTP 中继实现
pub struct HttpRelay {
    config: RelayConfig,
    client: reqwest::Client,
}

impl HttpRelay {
    /// 创建新的 HTTP 中继客户端
    pub fn new(config: RelayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { config, client })
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Result<Self> {
        Self::new(RelayConfig::default())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn register(&self, nickname: &str) -> Result<String> {
        let body = self
            .client
            .post(self.url("/login"))
            .header("Content-Type", "text/plain")
            .body(nickname.to_string())
            .send()
            .await?
            .text()
            .await?;
        Ok(body)
    }

    async fn ready(&self, seat: SeatId) -> Result<String> {
        let body = self
            .client
            .get(self.url("/ready"))
            .header(HEADER_SEAT, seat.to_string())
            .send()
            .await?
            .text()
            .await?;
        Ok(body)
    }

    async fn submit(&self, seat: SeatId, action: &Action) -> Result<String> {
        let cell = action.cell();
        let body = self
            .client
            .post(self.url("/message"))
            .header(HEADER_SEAT, seat.to_string())
            .header(HEADER_ACTION_TYPE, action.kind().to_string())
            .header(HEADER_X, cell.x.to_string())
            .header(HEADER_Y, cell.y.to_string())
            .header(HEADER_HORIZONTAL, action.horizontal_flag().to_string())
            .header("Content-Type", "text/plain")
            .body(action.encode_body())
            .send()
            .await?
            .text()
            .await?;
        Ok(body)
    }

    async fn current_turn(&self) -> Result<String> {
        let body = self
            .client
            .get(self.url("/turn"))
            .send()
            .await?
            .text()
            .await?;
        Ok(body)
    }

    async fn latest_message(&self) -> Result<String> {
        let body = self
            .client
            .get(self.url("/messages"))
            .send()
            .await?
            .text()
            .await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use protocol::{Cell, NOT_YOUR_TURN, NO_MESSAGES, SERVER_FULL, WAITING};
    use quoridor_server::Relay;

    /// 在回环地址上启动一个真实中继，返回指向它的 HTTP 传输
    async fn spawn_relay() -> HttpRelay {
        let relay = Arc::new(Mutex::new(Relay::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(quoridor_server::serve(listener, relay));

        HttpRelay::new(RelayConfig {
            base_url: format!("http://{}", addr),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_full_relay_round_trip_over_http() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let transport = spawn_relay().await;

        // 注册两个座位，第三个被拒
        assert_eq!(transport.register("alice").await.unwrap(), "1");
        assert_eq!(transport.ready(1).await.unwrap(), WAITING);
        assert_eq!(transport.register("bob").await.unwrap(), "2");
        assert_eq!(transport.register("carol").await.unwrap(), SERVER_FULL);

        // 就绪查询互报对手昵称
        assert_eq!(transport.ready(1).await.unwrap(), "bob");
        assert_eq!(transport.ready(2).await.unwrap(), "alice");

        // 开局轮到座位 1，尚无消息
        assert_eq!(transport.current_turn().await.unwrap(), "1");
        assert_eq!(transport.latest_message().await.unwrap(), NO_MESSAGES);

        // 座位 2 抢跑被拒，回合不变
        let action = Action::Move {
            to: Cell::new_unchecked(1, 4),
        };
        assert_eq!(transport.submit(2, &action).await.unwrap(), NOT_YOUR_TURN);
        assert_eq!(transport.current_turn().await.unwrap(), "1");

        // 座位 1 提交后回合交给座位 2
        assert_eq!(transport.submit(1, &action).await.unwrap(), "2");
        assert_eq!(transport.current_turn().await.unwrap(), "2");

        // 转发文本可以解码回同一个动作
        let relayed = transport.latest_message().await.unwrap();
        let (seat, decoded) = Action::decode_relayed(&relayed).unwrap();
        assert_eq!(seat, 1);
        assert_eq!(decoded, action);

        // 座位 2 随后提交成功
        let reply = Action::Move {
            to: Cell::new_unchecked(7, 4),
        };
        assert_eq!(transport.submit(2, &reply).await.unwrap(), "1");
    }
}
