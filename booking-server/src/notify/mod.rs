//! 订单状态实时通知
//!
//! 进程内的发布端 (webhook 处理器) 与任意数量的浏览器 Tab 之间的
//! 解耦层：生产者只认订单号，不关心传输细节。
//!
//! ```text
//! webhook ──▶ ServerState::notify_order ──▶ OrderStreamRegistry
//!                                                │ broadcast
//!                               ┌────────────────┼────────────────┐
//!                               ▼                ▼                ▼
//!                         Subscription     Subscription     Subscription
//!                          (SSE 流 A)       (SSE 流 B)       (其他 Tab)
//! ```

mod registry;
mod subscription;

pub use registry::OrderStreamRegistry;
pub use subscription::OrderSubscription;
pub use shared::notify::OrderEvent;
