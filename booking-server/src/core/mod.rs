//! 核心模块 - 服务器配置、状态与顶层错误
//!
//! | 子模块 | 职责 |
//! |--------|------|
//! | config | 环境变量配置加载 |
//! | error | 服务器级错误类型 |
//! | server | 服务器启动与优雅关闭 |
//! | state | 全局共享状态 |

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
