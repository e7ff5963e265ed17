//! Room Rate Model

use serde::{Deserialize, Serialize};

/// 房型报价
///
/// 每晚价格是房型本身的属性（整房容量），与入住人数无关。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRate {
    pub room_type_id: String,
    pub name: String,
    /// Price per night in USD for the whole room
    pub price_per_night: f64,
    pub max_guests: u32,
}

impl RoomRate {
    pub fn new(
        room_type_id: impl Into<String>,
        name: impl Into<String>,
        price_per_night: f64,
        max_guests: u32,
    ) -> Self {
        Self {
            room_type_id: room_type_id.into(),
            name: name.into(),
            price_per_night,
            max_guests,
        }
    }
}
