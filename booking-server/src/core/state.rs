//! 服务器状态定义
//!
//! `ServerState` 是所有 HTTP 处理器共享的应用状态，内部组件
//! 均为 `Arc` 或自带共享语义，整体可廉价克隆。

use std::sync::Arc;

use dashmap::DashSet;
use shared::OrderEvent;

use crate::core::Config;
use crate::notify::OrderStreamRegistry;
use crate::pricing::{ActivityCatalog, RoomRateSource, StaticRoomRates};
use crate::services::HttpService;

/// 全局服务器状态
#[derive(Debug, Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 订单状态流注册表 (SSE 连接管理)
    pub order_streams: OrderStreamRegistry,
    /// 活动目录
    pub catalog: Arc<ActivityCatalog>,
    /// 住宿查价来源
    pub room_rates: Arc<dyn RoomRateSource>,
    /// 已处理的 webhook 事件键 (幂等去重)
    pub processed_events: Arc<DashSet<String>>,
    /// HTTP 服务
    pub http: HttpService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 组装注册表、目录、价目表与 HTTP 服务，并完成路由装配。
    pub fn initialize(config: &Config) -> Self {
        Self::with_room_rates(config, Arc::new(StaticRoomRates::standard()))
    }

    /// 使用自定义查价来源初始化 (测试注入用)
    pub fn with_room_rates(config: &Config, room_rates: Arc<dyn RoomRateSource>) -> Self {
        let state = Self {
            config: config.clone(),
            order_streams: OrderStreamRegistry::new(),
            catalog: Arc::new(ActivityCatalog::standard()),
            room_rates,
            processed_events: Arc::new(DashSet::new()),
            http: HttpService::new(config.clone()),
        };

        // 路由需要持有状态本身，所以最后装配
        state.http.initialize(state.clone());
        state
    }

    // ========== 访问器方法 ==========

    /// 获取订单流注册表
    pub fn order_streams(&self) -> &OrderStreamRegistry {
        &self.order_streams
    }

    /// 获取活动目录
    pub fn catalog(&self) -> &ActivityCatalog {
        &self.catalog
    }

    // ========== 业务方法 ==========

    /// 向订单的所有在线订阅者推送事件，返回送达数
    pub fn notify_order(&self, order_id: &str, event: &OrderEvent) -> usize {
        let delivered = self.order_streams.broadcast(order_id, event);
        tracing::info!(
            target: "notify",
            order_id,
            event = %event,
            delivered,
            "Order notification dispatched"
        );
        delivered
    }

    /// 标记 webhook 事件为已处理
    ///
    /// 返回 `false` 表示该事件键已经处理过 (重复投递)。
    pub fn mark_event_processed(&self, event_key: &str) -> bool {
        self.processed_events.insert(event_key.to_string())
    }
}
