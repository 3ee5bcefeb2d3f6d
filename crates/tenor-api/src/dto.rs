//! Data Transfer Objects for API requests and responses

use std::collections::BTreeMap;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use fixed_rate::{
    format_rate, AggregatedLevel, BookDisplay, CollateralSummary, LoanValue, RawOrderBookLevel,
};
use tenor_core::{Currency, PricingError, Rate, UnitPrice, UnixTimestamp};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Error half of every handler result
pub type ApiFailure = (StatusCode, Json<ApiError>);

/// Map a pricing failure to its HTTP status and error body
pub fn pricing_failure(err: PricingError) -> ApiFailure {
    (
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiError::new(err.error_code(), err.to_string())),
    )
}

/// Yield quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldQuoteRequest {
    /// Unit price, 10000 = par
    pub price: UnitPrice,
    pub maturity: UnixTimestamp,
    /// Evaluation time, defaults to now
    #[serde(default)]
    pub as_of: Option<UnixTimestamp>,
}

/// Price/APR/APY triad. Rates that cannot be computed are null with a placeholder display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldQuote {
    pub price: Option<UnitPrice>,
    pub maturity: Option<UnixTimestamp>,
    pub apr: Option<Rate>,
    pub apy: Option<Rate>,
    pub apr_display: String,
    pub apy_display: String,
}

impl From<&LoanValue> for YieldQuote {
    fn from(value: &LoanValue) -> Self {
        let apr = value.apr();
        let apy = value.apy();
        Self {
            price: value.price().ok(),
            maturity: value.maturity(),
            apr_display: format_rate(&apr),
            apy_display: format_rate(&apy),
            apr: apr.ok(),
            apy: apy.ok(),
        }
    }
}

/// Which ladders the client shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayDto {
    #[default]
    Both,
    BorrowOnly,
    LendOnly,
}

impl From<DisplayDto> for BookDisplay {
    fn from(display: DisplayDto) -> Self {
        match display {
            DisplayDto::Both => BookDisplay::Both,
            DisplayDto::BorrowOnly => BookDisplay::BorrowOnly,
            DisplayDto::LendOnly => BookDisplay::LendOnly,
        }
    }
}

/// Order book preparation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookRequest {
    pub maturity: UnixTimestamp,
    #[serde(default)]
    pub as_of: Option<UnixTimestamp>,
    pub borrow: Vec<RawOrderBookLevel>,
    pub lend: Vec<RawOrderBookLevel>,
    /// Overrides the configured bucket width
    #[serde(default)]
    pub aggregation_factor: Option<u32>,
    /// Overrides the configured depth
    #[serde(default)]
    pub depth_limit: Option<usize>,
    #[serde(default)]
    pub display: DisplayDto,
    /// Indicative price used as mid when a side has no depth
    #[serde(default)]
    pub opening_price: Option<UnitPrice>,
}

/// One display row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDto {
    pub amount: String,
    pub price: Option<UnitPrice>,
    pub apr: Option<Rate>,
    pub apr_display: String,
}

impl From<&AggregatedLevel> for LevelDto {
    fn from(level: &AggregatedLevel) -> Self {
        let apr = level.value.apr();
        Self {
            amount: level.amount.to_string(),
            price: level.value.price().ok(),
            apr_display: format_rate(&apr),
            apr: apr.ok(),
        }
    }
}

/// Order book preparation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookResponse {
    pub borrow: Vec<LevelDto>,
    pub lend: Vec<LevelDto>,
    pub max_amount: String,
    pub mid_price: Option<YieldQuote>,
}

/// Collateral summary request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralSummaryRequest {
    /// Margin-eligible balances in base units (decimal strings)
    pub collateral: BTreeMap<Currency, String>,
    #[serde(default)]
    pub non_collateral: BTreeMap<Currency, String>,
    /// USD price per display unit
    pub prices: BTreeMap<Currency, f64>,
    pub coverage_bps: u32,
}

/// Collateral summary with balances rendered in display units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralSummaryResponse {
    #[serde(flatten)]
    pub summary: CollateralSummary,
    /// e.g. `"1.200000 ETH"`
    pub collateral_display: BTreeMap<Currency, String>,
    pub non_collateral_display: BTreeMap<Currency, String>,
}

/// Risk tier lookup query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskQuery {
    pub coverage_pct: f64,
}
