//! 服务器实现
//!
//! 组合配置、状态与 HTTP 服务，负责启动和优雅关闭。

use crate::core::{Config, Result, ServerError, ServerState};

/// 预订服务器
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    /// 创建新的服务器实例 (状态在 `run` 时初始化)
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// 使用预初始化的状态创建服务器实例
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// 运行服务器直到收到关闭信号
    ///
    /// Ctrl+C 触发优雅关闭：先关闭所有订单流 (打开的 SSE 响应
    /// 随之结束)，再等待 HTTP 服务排空退出。
    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(state) => state.clone(),
            None => ServerState::initialize(&self.config),
        };

        tracing::info!(
            "🌊 Marea Booking Server listening on 0.0.0.0:{}",
            self.config.http_port
        );
        tracing::info!("Environment: {}", self.config.environment);

        let registry = state.order_streams.clone();
        let shutdown = async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
            registry.shutdown();
        };

        state
            .http
            .start_server(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
