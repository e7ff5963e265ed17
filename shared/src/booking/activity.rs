//! Activity Catalog Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// 活动分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    /// 冲浪课程套餐
    Surf,
    /// 瑜伽课
    Yoga,
    /// 冰浴疗程
    IceBath,
    /// 机场接送
    Transport,
    /// 带导师的住宿服务
    Hosting,
    /// 其他
    Other,
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surf => write!(f, "surf"),
            Self::Yoga => write!(f, "yoga"),
            Self::IceBath => write!(f, "ice_bath"),
            Self::Transport => write!(f, "transport"),
            Self::Hosting => write!(f, "hosting"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// 计费模式 - 每个目录条目的显式属性
///
/// 定价时穷举匹配该枚举，新增分类必须显式选择计费模式，
/// 不再从分类名推断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    /// 按课时计费: unitPrice × quantity × guests
    PerSession,
    /// 按人头一口价: unitPrice × guests (quantity 忽略)
    PerPerson,
}

impl fmt::Display for BillingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerSession => write!(f, "per_session"),
            Self::PerPerson => write!(f, "per_person"),
        }
    }
}

/// Activity catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price in USD
    pub price: f64,
    /// Duration in minutes
    pub duration: u32,
    pub max_participants: u32,
    pub category: ActivityCategory,
    pub billing: BillingMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_activity_wire_format() {
        let activity = Activity {
            id: "yoga-morning".to_string(),
            name: "Yoga Matutino".to_string(),
            description: "Sesión de yoga al amanecer.".to_string(),
            price: 10.0,
            duration: 60,
            max_participants: 15,
            category: ActivityCategory::Yoga,
            billing: BillingMode::PerSession,
        };
        let value = serde_json::to_value(&activity).unwrap();

        assert_eq!(value["maxParticipants"], json!(15));
        assert_eq!(value["category"], "yoga");
        assert_eq!(value["billing"], "per_session");
    }

    #[test]
    fn test_category_display_matches_wire() {
        assert_eq!(ActivityCategory::IceBath.to_string(), "ice_bath");
        assert_eq!(
            serde_json::to_value(ActivityCategory::IceBath).unwrap(),
            "ice_bath"
        );
    }
}
