//! 活动目录路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/activities | GET | 获取活动目录 (平铺 + 按类分组) |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use shared::booking::{Activity, ActivityCategory};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/activities", get(list))
}

/// 活动目录响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesResponse {
    pub success: bool,
    /// 全部活动，目录顺序
    pub activities: Vec<Activity>,
    /// 预订页直接消费的三个主分类
    pub categorized_activities: CategorizedActivities,
}

/// 按类分组的活动视图
#[derive(Serialize)]
pub struct CategorizedActivities {
    pub surf: Vec<Activity>,
    pub yoga: Vec<Activity>,
    pub ice_bath: Vec<Activity>,
}

/// GET /api/activities - 获取活动目录
pub async fn list(State(state): State<ServerState>) -> Json<ActivitiesResponse> {
    let catalog = state.catalog();

    let by_category = |category: ActivityCategory| -> Vec<Activity> {
        catalog.by_category(category).into_iter().cloned().collect()
    };

    Json(ActivitiesResponse {
        success: true,
        activities: catalog.all().to_vec(),
        categorized_activities: CategorizedActivities {
            surf: by_category(ActivityCategory::Surf),
            yoga: by_category(ActivityCategory::Yoga),
            ice_bath: by_category(ActivityCategory::IceBath),
        },
    })
}
