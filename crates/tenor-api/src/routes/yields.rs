//! Yield quote endpoint
//!
//! - POST /yield/quote - Unit price to APR/APY

use axum::{routing::post, Json, Router};

use fixed_rate::LoanValue;

use crate::dto::{YieldQuote, YieldQuoteRequest};
use crate::AppState;

/// Create yield routes
pub fn router() -> Router<AppState> {
    Router::new().route("/quote", post(quote))
}

/// POST /yield/quote - Derive APR and APY for a unit price.
///
/// Rates that cannot be computed come back null with a "--" display value.
pub async fn quote(Json(request): Json<YieldQuoteRequest>) -> Json<YieldQuote> {
    let value = LoanValue::from_price(request.price, request.maturity, request.as_of);
    Json(YieldQuote::from(&value))
}
