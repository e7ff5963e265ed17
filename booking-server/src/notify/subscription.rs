//! 订单流订阅守卫

use tokio::sync::mpsc;

use super::registry::OrderStreamRegistry;

/// RAII 订阅守卫 - 接收端与注销责任绑定在同一个值上
///
/// [`OrderStreamRegistry::subscribe`] 返回本类型。守卫活多久，
/// 句柄就注册多久；无论流正常结束、客户端中途断开还是服务器
/// 清理，守卫离开作用域即注销，不存在漏掉的清理路径。
#[derive(Debug)]
pub struct OrderSubscription {
    registry: OrderStreamRegistry,
    order_id: String,
    handle_id: u64,
    rx: mpsc::UnboundedReceiver<String>,
}

impl OrderSubscription {
    pub(super) fn new(
        registry: OrderStreamRegistry,
        order_id: String,
        handle_id: u64,
        rx: mpsc::UnboundedReceiver<String>,
    ) -> Self {
        Self {
            registry,
            order_id,
            handle_id,
            rx,
        }
    }

    /// 订阅的订单号
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// 接收下一条预序列化事件；通道关闭 (注册表关闭该订单) 时返回 None
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// 非阻塞接收 (测试用)
    pub fn try_recv(&mut self) -> Result<String, mpsc::error::TryRecvError> {
        self.rx.try_recv()
    }
}

impl Drop for OrderSubscription {
    fn drop(&mut self) {
        self.registry.unregister(&self.order_id, self.handle_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::notify::OrderEvent;

    #[test]
    fn test_drop_unregisters() {
        let registry = OrderStreamRegistry::new();

        {
            let _subscription = registry.subscribe("SC-1");
            assert_eq!(registry.order_connections("SC-1"), 1);
        }
        // 守卫离开作用域即注销
        assert_eq!(registry.order_connections("SC-1"), 0);
    }

    #[test]
    fn test_two_subscriptions_both_receive() {
        let registry = OrderStreamRegistry::new();
        let mut sub_a = registry.subscribe("SC-123");
        let mut sub_b = registry.subscribe("SC-123");

        let event = OrderEvent::status_update("SC-123", "paid");
        assert_eq!(registry.broadcast("SC-123", &event), 2);

        for sub in [&mut sub_a, &mut sub_b] {
            let payload = sub.try_recv().unwrap();
            assert!(payload.contains(r#""type":"status_update""#));
            assert!(sub.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_recv_sees_close() {
        let registry = OrderStreamRegistry::new();
        let mut subscription = registry.subscribe("SC-1");

        registry.close_order("SC-1");
        assert!(subscription.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let registry = OrderStreamRegistry::new();

        let event = OrderEvent::status_update("SC-1", "paid");
        registry.broadcast("SC-1", &event);

        // 事件不重放：晚到的订阅者什么也收不到
        let mut subscription = registry.subscribe("SC-1");
        assert!(subscription.try_recv().is_err());
    }
}
