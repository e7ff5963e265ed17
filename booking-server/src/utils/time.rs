//! 时间工具函数
//!
//! 报价流程只比较日历日期，所有解析统一在 API handler 层完成，
//! 计算层只接收 `NaiveDate`。

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_dates(format!("Invalid date format: {}", date)))
}

/// 当前 UTC 日历日期
pub fn utc_today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
