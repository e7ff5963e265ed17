//! 订单流注册表核心实现
//!
//! # 架构
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 OrderStreamRegistry                      │
//! │  ┌───────────────────────────────────────────────────┐  │
//! │  │  DashMap<orderId, Vec<StreamHandle>>              │  │
//! │  └───────────────────────────────────────────────────┘  │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//!              ┌───────────┴───────────┐
//!              │  broadcast(orderId)   │  ◄── webhook 等生产者
//!              └───────────┬───────────┘
//!                          │ 每桶序列化一次，逐句柄投递
//!      ┌───────────────────┼───────────────────┐
//!      ▼                   ▼                   ▼
//!  SSE stream          SSE stream          SSE stream
//!  (浏览器 Tab A)      (浏览器 Tab B)      (其他订单的订阅者收不到)
//! ```
//!
//! # 投递模型
//!
//! 至多一次、尽力而为：无确认、无重试、无积压。晚到的订阅者收不到
//! 历史事件，客户端通过拉取接口对账。单个句柄投递失败只影响它自己，
//! 失败的句柄会被就地清理。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use shared::notify::OrderEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::subscription::OrderSubscription;

/// 注册表中的一条流句柄
///
/// 发送端持有预序列化的 JSON 字符串通道；接收端活在 SSE 响应流里。
#[derive(Debug)]
struct StreamHandle {
    id: u64,
    tx: mpsc::UnboundedSender<String>,
}

/// 订单流注册表 - 把状态事件扇出到所有观察该订单的打开流
///
/// # 职责
///
/// - 句柄管理 (register, unregister, subscribe)
/// - 事件扇出 (broadcast)
/// - 连接诊断 (order_connections, total_connections)
/// - 生命周期 (close_order, close_all, shutdown)
///
/// 显式构造、可注入，克隆代价是一次 Arc 浅拷贝；测试为每个用例
/// 构造独立实例，不共享进程级状态。
#[derive(Debug, Clone)]
pub struct OrderStreamRegistry {
    /// orderId -> 打开的流句柄桶
    buckets: Arc<DashMap<String, Vec<StreamHandle>>>,
    /// 句柄 id 发生器 (进程内唯一)
    next_handle_id: Arc<AtomicU64>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl OrderStreamRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            buckets: Arc::new(DashMap::new()),
            next_handle_id: Arc::new(AtomicU64::new(1)),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 注册一条流句柄，返回句柄 id
    ///
    /// 桶不存在时自动创建。对 `order_id` 格式不做任何约束
    /// (由外部校验)，本操作不会失败。
    pub fn register(&self, order_id: &str, tx: mpsc::UnboundedSender<String>) -> u64 {
        let id = self.next_handle_id.fetch_add(1, Ordering::Relaxed);
        self.buckets
            .entry(order_id.to_string())
            .or_default()
            .push(StreamHandle { id, tx });

        tracing::debug!(
            target: "notify",
            order_id,
            handle_id = id,
            "Stream registered"
        );
        id
    }

    /// 注销一条流句柄
    ///
    /// 幂等：句柄已不存在时是 no-op。桶清空后桶本身也被移除，
    /// 防止无人观察的订单累积空条目。
    pub fn unregister(&self, order_id: &str, handle_id: u64) {
        let Some(mut bucket) = self.buckets.get_mut(order_id) else {
            return;
        };
        bucket.retain(|h| h.id != handle_id);
        let now_empty = bucket.is_empty();
        drop(bucket);

        if now_empty {
            // remove_if 重新检查，避免和并发 register 竞争时丢注册
            self.buckets.remove_if(order_id, |_, handles| handles.is_empty());
            tracing::debug!(target: "notify", order_id, handle_id, "Stream unregistered, bucket empty");
        } else {
            tracing::debug!(target: "notify", order_id, handle_id, "Stream unregistered");
        }
    }

    /// 广播事件到订单的所有打开流，返回成功投递数
    ///
    /// 事件只序列化一次。桶为空或不存在时是 no-op，生产者无需
    /// 关心是否有人在听。单句柄投递失败 (接收端已消失) 被记录、
    /// 跳过并就地清理，永不向调用方传播。
    pub fn broadcast(&self, order_id: &str, event: &OrderEvent) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(target: "notify", order_id, error = %e, "Failed to serialize event");
                return 0;
            }
        };

        let mut delivered = 0;
        let mut stale = Vec::new();
        {
            let Some(bucket) = self.buckets.get(order_id) else {
                return 0;
            };
            for handle in bucket.iter() {
                if handle.tx.send(payload.clone()).is_ok() {
                    delivered += 1;
                } else {
                    stale.push(handle.id);
                }
            }
        }

        // 读锁已释放，清理失活句柄
        for handle_id in stale {
            tracing::debug!(target: "notify", order_id, handle_id, "Pruning stale stream handle");
            self.unregister(order_id, handle_id);
        }

        tracing::debug!(
            target: "notify",
            order_id,
            event = %event,
            delivered,
            "Broadcast complete"
        );
        delivered
    }

    /// 订阅一个订单：注册句柄并返回 RAII 守卫
    ///
    /// 守卫被 Drop 时 (流结束、客户端断开、服务器关闭) 自动注销。
    pub fn subscribe(&self, order_id: &str) -> OrderSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle_id = self.register(order_id, tx);
        OrderSubscription::new(self.clone(), order_id.to_string(), handle_id, rx)
    }

    /// 单个订单当前打开的流数量
    pub fn order_connections(&self, order_id: &str) -> usize {
        self.buckets.get(order_id).map(|b| b.len()).unwrap_or(0)
    }

    /// 全部订单当前打开的流总数
    pub fn total_connections(&self) -> usize {
        self.buckets.iter().map(|entry| entry.value().len()).sum()
    }

    /// 关闭一个订单的所有流，返回关闭数量
    ///
    /// 发送端随桶一起丢弃，对应的 SSE 流在下一次轮询时结束。
    pub fn close_order(&self, order_id: &str) -> usize {
        let closed = self
            .buckets
            .remove(order_id)
            .map(|(_, bucket)| bucket.len())
            .unwrap_or(0);
        if closed > 0 {
            tracing::debug!(target: "notify", order_id, closed, "Order streams closed");
        }
        closed
    }

    /// 关闭所有流
    pub fn close_all(&self) {
        let closed = self.total_connections();
        self.buckets.clear();
        if closed > 0 {
            tracing::info!(target: "notify", closed, "All order streams closed");
        }
    }

    /// 优雅关闭注册表：取消令牌并关闭所有流
    pub fn shutdown(&self) {
        tracing::info!("Shutting down order stream registry");
        self.shutdown_token.cancel();
        self.close_all();
    }

    /// 获取关闭令牌 (用于监控关闭信号)
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 注册表是否已关闭
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }
}

impl Default for OrderStreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> (
        mpsc::UnboundedSender<String>,
        mpsc::UnboundedReceiver<String>,
    ) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn test_register_and_count() {
        let registry = OrderStreamRegistry::new();
        let (tx_a, _rx_a) = channel();
        let (tx_b, _rx_b) = channel();
        let (tx_c, _rx_c) = channel();

        registry.register("SC-1", tx_a);
        registry.register("SC-1", tx_b);
        registry.register("SC-2", tx_c);

        assert_eq!(registry.order_connections("SC-1"), 2);
        assert_eq!(registry.order_connections("SC-2"), 1);
        assert_eq!(registry.order_connections("SC-3"), 0);
        assert_eq!(registry.total_connections(), 3);
    }

    #[test]
    fn test_unregister_is_idempotent_and_removes_empty_bucket() {
        let registry = OrderStreamRegistry::new();
        let (tx, _rx) = channel();
        let handle_id = registry.register("SC-1", tx);

        registry.unregister("SC-1", handle_id);
        assert_eq!(registry.order_connections("SC-1"), 0);
        // 桶条目本身已移除而不是留下空 Vec
        assert!(!registry.buckets.contains_key("SC-1"));

        // 第二次注销是 no-op，状态不变
        registry.unregister("SC-1", handle_id);
        assert_eq!(registry.order_connections("SC-1"), 0);
        assert!(!registry.buckets.contains_key("SC-1"));
    }

    #[test]
    fn test_broadcast_reaches_only_target_order() {
        let registry = OrderStreamRegistry::new();
        let (tx_a, mut rx_a) = channel();
        let (tx_b, mut rx_b) = channel();
        let (tx_other, mut rx_other) = channel();

        registry.register("SC-123", tx_a);
        registry.register("SC-123", tx_b);
        registry.register("SC-999", tx_other);

        let event = OrderEvent::status_update("SC-123", "paid");
        let delivered = registry.broadcast("SC-123", &event);
        assert_eq!(delivered, 2);

        // 两个句柄各收到恰好一条同样的消息
        for rx in [&mut rx_a, &mut rx_b] {
            let payload = rx.try_recv().unwrap();
            assert!(payload.contains(r#""status":"paid""#));
            assert!(rx.try_recv().is_err());
        }
        // 其他订单的句柄什么都收不到
        assert!(rx_other.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_without_listeners_is_noop() {
        let registry = OrderStreamRegistry::new();
        let event = OrderEvent::status_update("SC-1", "paid");

        // 桶从未存在
        assert_eq!(registry.broadcast("SC-1", &event), 0);

        // 注册后注销，桶已移除
        let (tx, mut rx) = channel();
        let handle_id = registry.register("SC-1", tx);
        registry.unregister("SC-1", handle_id);
        assert_eq!(registry.broadcast("SC-1", &event), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_prunes_stale_handles() {
        let registry = OrderStreamRegistry::new();
        let (tx_live, mut rx_live) = channel();
        let (tx_dead, rx_dead) = channel();

        registry.register("SC-1", tx_live);
        registry.register("SC-1", tx_dead);
        drop(rx_dead);

        let event = OrderEvent::status_update("SC-1", "paid");
        let delivered = registry.broadcast("SC-1", &event);

        // 死句柄不计入投递且被清理，活句柄不受影响
        assert_eq!(delivered, 1);
        assert!(rx_live.try_recv().is_ok());
        assert_eq!(registry.order_connections("SC-1"), 1);
    }

    #[tokio::test]
    async fn test_close_order_ends_streams() {
        let registry = OrderStreamRegistry::new();
        let (tx, mut rx) = channel();
        registry.register("SC-1", tx);

        let closed = registry.close_order("SC-1");
        assert_eq!(closed, 1);
        // 发送端已丢弃，接收端看到通道结束
        assert!(rx.recv().await.is_none());
        assert_eq!(registry.order_connections("SC-1"), 0);
    }

    #[tokio::test]
    async fn test_shutdown_closes_everything() {
        let registry = OrderStreamRegistry::new();
        let (tx_a, mut rx_a) = channel();
        let (tx_b, mut rx_b) = channel();
        registry.register("SC-1", tx_a);
        registry.register("SC-2", tx_b);

        assert!(!registry.is_shutdown());
        registry.shutdown();

        assert!(registry.is_shutdown());
        assert_eq!(registry.total_connections(), 0);
        assert!(rx_a.recv().await.is_none());
        assert!(rx_b.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_registrations_all_land() {
        let registry = OrderStreamRegistry::new();
        let mut handles = Vec::new();

        // 同一订单和不同订单的并发注册都不能丢
        for i in 0..50 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let (tx, rx) = channel();
                let order_id = if i % 2 == 0 { "SC-even" } else { "SC-odd" };
                registry.register(order_id, tx);
                // 接收端保持存活到注册完成
                drop(rx);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.order_connections("SC-even"), 25);
        assert_eq!(registry.order_connections("SC-odd"), 25);
        assert_eq!(registry.total_connections(), 50);
    }
}
