//! Marea Booking Server - 冲浪营地预订平台核心服务
//!
//! # 架构概述
//!
//! 本模块是预订服务的主入口，提供以下核心功能：
//!
//! - **报价计算** (`pricing`): 住宿 + 活动的价格明细，decimal 精度
//! - **订单通知** (`notify`): 订单状态流注册表，SSE 扇出
//! - **HTTP API** (`api`): 报价、活动目录、状态流、支付 webhook
//! - **webhook 验签** (`api/webhook`): HMAC-SHA256 + 重放窗口
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、错误、服务器生命周期
//! ├── services/      # HTTP 传输装配
//! ├── api/           # HTTP 路由和处理器
//! ├── notify/        # 订单状态流注册表
//! ├── pricing/       # 报价计算与目录
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod api;
pub mod core;
pub mod notify;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use notify::{OrderStreamRegistry, OrderSubscription};
pub use pricing::{ActivityCatalog, RoomRateSource, StaticRoomRates, compute_quote};
pub use shared::OrderEvent;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：加载 .env 并初始化日志
///
/// `LOG_LEVEL` 控制日志级别 (默认 info)，`LOG_DIR` 指向已存在的
/// 目录时日志按天滚动写文件。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /___ _________  ____ _
  / /|_/ / __ `/ ___/ _ \/ __ `/
 / /  / / /_/ / /  /  __/ /_/ /
/_/  /_/\__,_/_/   \___/\__,_/
    "#
    );
}
