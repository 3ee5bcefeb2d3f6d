//! Collateral endpoints
//!
//! - POST /collateral/summary - USD totals, headroom and risk tier
//! - GET /collateral/risk?coverage_pct= - Risk tier lookup
//! - POST /collateral/threshold - Update the protocol threshold

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use fixed_rate::{classify, parse_amount, CollateralBook, RiskAssessment};
use tenor_core::{BaseAmount, Currency, CurrencyTable, PricingError};

use crate::dto::{
    pricing_failure, ApiError, ApiFailure, CollateralSummaryRequest, CollateralSummaryResponse,
    RiskQuery,
};
use crate::AppState;

/// Threshold update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdRequest {
    pub threshold_bps: u32,
}

/// Create collateral routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", post(summary))
        .route("/risk", get(risk))
        .route("/threshold", post(set_threshold))
}

fn parse_balances(
    balances: &BTreeMap<Currency, String>,
) -> Result<BTreeMap<Currency, BaseAmount>, PricingError> {
    balances
        .iter()
        .map(|(currency, amount)| parse_amount(amount).map(|amount| (currency.clone(), amount)))
        .collect()
}

fn format_balances(
    balances: &BTreeMap<Currency, BaseAmount>,
    table: &CurrencyTable,
) -> Result<BTreeMap<Currency, String>, PricingError> {
    balances
        .iter()
        .map(|(currency, amount)| {
            table
                .format_amount(currency, *amount)
                .map(|display| (currency.clone(), display))
        })
        .collect()
}

/// POST /collateral/summary - Value balances and classify coverage
pub async fn summary(
    State(state): State<AppState>,
    Json(request): Json<CollateralSummaryRequest>,
) -> Result<Json<CollateralSummaryResponse>, ApiFailure> {
    let book = CollateralBook {
        collateral: parse_balances(&request.collateral).map_err(pricing_failure)?,
        non_collateral: parse_balances(&request.non_collateral).map_err(pricing_failure)?,
        coverage_bps: request.coverage_bps,
        collateral_threshold_bps: state.collateral_threshold_bps().await,
    };

    let currencies = state.currencies().await;
    let summary = book
        .summary(&request.prices, &currencies)
        .map_err(pricing_failure)?;

    Ok(Json(CollateralSummaryResponse {
        summary,
        collateral_display: format_balances(&book.collateral, &currencies)
            .map_err(pricing_failure)?,
        non_collateral_display: format_balances(&book.non_collateral, &currencies)
            .map_err(pricing_failure)?,
    }))
}

/// GET /collateral/risk - Classify a coverage percentage
pub async fn risk(Query(query): Query<RiskQuery>) -> Json<RiskAssessment> {
    Json(classify(query.coverage_pct))
}

/// POST /collateral/threshold - Replace the protocol collateral threshold
pub async fn set_threshold(
    State(state): State<AppState>,
    Json(request): Json<ThresholdRequest>,
) -> Result<StatusCode, ApiFailure> {
    if request.threshold_bps == 0 || request.threshold_bps > tenor_core::constants::BPS {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request("Threshold must be within 1..=10000 bps")),
        ));
    }

    state.set_collateral_threshold_bps(request.threshold_bps).await;
    Ok(StatusCode::NO_CONTENT)
}
