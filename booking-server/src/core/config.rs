/// 服务器配置 - 预订服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SSE_KEEPALIVE_SECS | 15 | SSE 保活注释帧间隔 (秒) |
/// | WEBHOOK_SECRET | (无) | 支付方 webhook HMAC 密钥，未设置则跳过验签 |
/// | WEBHOOK_TOLERANCE_SECS | 300 | webhook 时间戳容差窗口 (秒) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 WEBHOOK_SECRET=whsec_xxx cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// SSE 保活帧间隔 (秒)
    pub sse_keepalive_secs: u64,
    /// 支付方 webhook 共享密钥 (可选，空串视为未设置)
    pub webhook_secret: Option<String>,
    /// webhook 时间戳容差 (秒)，超出视为重放
    pub webhook_tolerance_secs: i64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            sse_keepalive_secs: std::env::var("SSE_KEEPALIVE_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(15),
            webhook_secret: std::env::var("WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            webhook_tolerance_secs: std::env::var("WEBHOOK_TOLERANCE_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(300),
        }
    }

    /// 使用自定义端口覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
