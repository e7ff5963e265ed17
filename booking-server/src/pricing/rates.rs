//! 房价来源
//!
//! 报价计算只依赖这里的抽象；生产环境用静态价目表，
//! 测试可以注入任意实现（包括故障实现来验证降级路径）。

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::booking::RoomRate;

/// 住宿查价抽象
///
/// 返回 `Ok(None)` 表示房型不存在；`Err` 由调用方降级处理
/// （视同未选房，不中断报价）。
#[async_trait]
pub trait RoomRateSource: Send + Sync + std::fmt::Debug {
    async fn rate_for(
        &self,
        room_type_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i64,
    ) -> anyhow::Result<Option<RoomRate>>;
}

/// 静态价目表
#[derive(Debug, Clone)]
pub struct StaticRoomRates {
    rates: Vec<RoomRate>,
}

impl StaticRoomRates {
    /// 营地标准房价
    pub fn standard() -> Self {
        Self::with_rates(vec![
            RoomRate::new("casa-playa", "Casa de Playa (Cuarto Compartido)", 20.0, 8),
            RoomRate::new("casitas-privadas", "Casitas Privadas", 95.0, 2),
            RoomRate::new("casas-deluxe", "Casas Deluxe", 140.0, 2),
        ])
    }

    /// 自定义价目表 (测试用)
    pub fn with_rates(rates: Vec<RoomRate>) -> Self {
        Self { rates }
    }
}

impl Default for StaticRoomRates {
    fn default() -> Self {
        Self::standard()
    }
}

#[async_trait]
impl RoomRateSource for StaticRoomRates {
    async fn rate_for(
        &self,
        room_type_id: &str,
        _check_in: NaiveDate,
        _check_out: NaiveDate,
        _guests: i64,
    ) -> anyhow::Result<Option<RoomRate>> {
        Ok(self
            .rates
            .iter()
            .find(|r| r.room_type_id == room_type_id)
            .cloned())
    }
}
