//! 服务器级错误定义
//!
//! 启动和运行期的顶层错误，API 层错误见 [`crate::utils::AppError`]。

use thiserror::Error;

/// 服务器错误类型
#[derive(Error, Debug)]
pub enum ServerError {
    /// IO 错误 (端口绑定失败等)
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 内部服务器错误
    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器结果类型
pub type Result<T> = std::result::Result<T, ServerError>;
