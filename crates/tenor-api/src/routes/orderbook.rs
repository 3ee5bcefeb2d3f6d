//! Order book endpoint
//!
//! - POST /orderbook/prepare - Raw ladders to aggregated display ladders

use axum::{extract::State, routing::post, Json, Router};

use fixed_rate::{decode_levels, prepare_book, unix_now, LoanValue};

use crate::dto::{
    pricing_failure, ApiFailure, LevelDto, OrderBookRequest, OrderBookResponse, YieldQuote,
};
use crate::AppState;

/// Create order book routes
pub fn router() -> Router<AppState> {
    Router::new().route("/prepare", post(prepare))
}

/// POST /orderbook/prepare - Bucket, sort and summarize both ladders
pub async fn prepare(
    State(state): State<AppState>,
    Json(request): Json<OrderBookRequest>,
) -> Result<Json<OrderBookResponse>, ApiFailure> {
    let mut options = state.orderbook_options().await;
    if let Some(factor) = request.aggregation_factor {
        options.aggregation_factor = factor;
    }
    if let Some(depth) = request.depth_limit {
        options.depth_limit = depth;
    }

    // Both sides and the fallback share one evaluation time
    let as_of = request.as_of.unwrap_or_else(unix_now);
    let borrow = decode_levels(&request.borrow, request.maturity, Some(as_of))
        .map_err(pricing_failure)?;
    let lend =
        decode_levels(&request.lend, request.maturity, Some(as_of)).map_err(pricing_failure)?;
    let fallback = request
        .opening_price
        .map(|price| LoanValue::from_price(price, request.maturity, Some(as_of)));

    let view = prepare_book(&borrow, &lend, &options, request.display.into(), fallback)
        .map_err(pricing_failure)?;

    tracing::debug!(
        borrow = view.borrow.len(),
        lend = view.lend.len(),
        "Prepared order book"
    );

    Ok(Json(OrderBookResponse {
        borrow: view.borrow.iter().map(LevelDto::from).collect(),
        lend: view.lend.iter().map(LevelDto::from).collect(),
        max_amount: view.max_amount.to_string(),
        mid_price: view.mid_price.as_ref().map(YieldQuote::from),
    }))
}
