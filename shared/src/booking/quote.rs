//! Quote Request/Response DTOs

use serde::{Deserialize, Serialize};

/// 报价请求
///
/// 活动选择有两种形式：新版 `activities` 携带数量，旧版 `activityIds`
/// 是扁平 id 列表（数量视为 1）。两者同时出现时 `activities` 优先。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// 入住日期 (YYYY-MM-DD)
    pub check_in: String,
    /// 退房日期 (YYYY-MM-DD)
    pub check_out: String,
    pub guests: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<ActivitySelection>>,
    /// Legacy flat id list, kept for older clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_ids: Option<Vec<String>>,
}

impl QuoteRequest {
    /// 归一化活动选择列表
    ///
    /// `activities` 优先于 `activityIds`；旧版列表映射为数量 1 的选择。
    pub fn selections(&self) -> Vec<ActivitySelection> {
        if let Some(activities) = &self.activities {
            return activities.clone();
        }
        self.activity_ids
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|id| ActivitySelection {
                activity_id: id.clone(),
                quantity: None,
            })
            .collect()
    }
}

/// 单个活动选择
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySelection {
    pub activity_id: String,
    /// 课时数，缺省为 1；仅对 per_session 计费的条目有意义
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl ActivitySelection {
    pub fn new(activity_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            activity_id: activity_id.into(),
            quantity: Some(quantity),
        }
    }

    /// 生效数量：缺省为 1，非法值 (< 1) 钳制为 1
    pub fn effective_quantity(&self) -> i64 {
        self.quantity.unwrap_or(1).max(1)
    }
}

/// 价格明细中的一行活动
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLine {
    pub activity_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// 价格明细
///
/// 不变量: `total == subtotal == accommodation_total + Σ line_total`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// 住宿总价 (每晚价 × 晚数，与人数无关)
    pub accommodation_total: f64,
    /// 活动明细行，保持选择顺序
    pub activity_breakdown: Vec<ActivityLine>,
    pub subtotal: f64,
    /// 目前恒为 0
    pub taxes: f64,
    pub total: f64,
}

/// 报价响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub success: bool,
    pub price_breakdown: PriceBreakdown,
    pub nights: i64,
    /// 解析到的每晚房价，未选房或查价失败时为 0
    pub accommodation_price_per_night: f64,
}
