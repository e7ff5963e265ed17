//! Quote API Handlers

use axum::{
    Json,
    extract::State,
};

use crate::core::ServerState;
use crate::pricing;
use crate::utils::{AppResult, time};
use shared::booking::{QuoteRequest, QuoteResponse};

/// POST /api/quote - 计算报价
///
/// 日期和人数校验失败返回 400；房价查询失败不算错误，
/// 降级为未选房继续报价 (住宿计 0)。
pub async fn compute(
    State(state): State<ServerState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<QuoteResponse>> {
    let check_in = time::parse_date(&payload.check_in)?;
    let check_out = time::parse_date(&payload.check_out)?;

    let rate = match &payload.room_type_id {
        Some(room_type_id) => match state
            .room_rates
            .rate_for(room_type_id, check_in, check_out, payload.guests)
            .await
        {
            Ok(rate) => rate,
            Err(e) => {
                tracing::warn!(
                    %room_type_id,
                    error = %e,
                    "Room rate lookup failed, quoting without accommodation"
                );
                None
            }
        },
        None => None,
    };

    let selections = payload.selections();
    let quote = pricing::compute_quote(
        check_in,
        check_out,
        payload.guests,
        &selections,
        rate.as_ref(),
        state.catalog(),
        time::utc_today(),
    )?;

    Ok(Json(QuoteResponse {
        success: true,
        price_breakdown: quote.breakdown,
        nights: quote.nights,
        accommodation_price_per_night: quote.price_per_night,
    }))
}
