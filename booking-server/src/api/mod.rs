//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`quote`] - 报价计算接口
//! - [`activities`] - 活动目录接口
//! - [`stream`] - 支付状态 SSE 流
//! - [`webhook`] - 支付方 webhook 入口

pub mod activities;
pub mod health;
pub mod quote;
pub mod stream;
pub mod webhook;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
