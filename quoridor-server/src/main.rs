use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use protocol::DEFAULT_PORT;
use quoridor_server::{serve, Relay};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quoridor_server=debug".parse()?),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let relay = Arc::new(Mutex::new(Relay::new()));

    // 监听所有网卡，允许局域网内的对手连接
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("中继服务器监听端口 {}...", port);
    serve(listener, relay).await?;

    Ok(())
}
