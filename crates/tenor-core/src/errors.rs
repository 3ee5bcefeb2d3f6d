//! Error types for Tenor

use thiserror::Error;

/// Core errors that can occur in Tenor
#[derive(Debug, Error)]
pub enum Error {
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by the pricing, order book and collateral computations.
///
/// Every variant is local to the call that produced it. None of them are
/// retryable; callers render a placeholder for the affected row instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Price is undefined for a value seeded from a rate")]
    PriceUndefined,

    #[error("Maturity is undefined for a value seeded from a rate")]
    MaturityUndefined,

    #[error("Maturity falls on the evaluation day, APR is undefined")]
    DegenerateMaturity,

    #[error("APR is undefined for a zero price")]
    ZeroPrice,

    #[error("Unknown currency: {currency}")]
    UnknownCurrency { currency: String },

    #[error("Invalid aggregation factor: {factor}")]
    InvalidAggregationFactor { factor: u32 },

    #[error("Invalid depth limit: {limit}")]
    InvalidDepthLimit { limit: usize },

    #[error("Invalid amount: {value}")]
    InvalidAmount { value: String },

    #[error("Unsupported base decimals for {currency}: {decimals}")]
    UnsupportedDecimals { currency: String, decimals: u8 },
}

/// Result type alias for Tenor operations
pub type Result<T> = std::result::Result<T, Error>;

impl PricingError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PriceUndefined => "price_undefined",
            Self::MaturityUndefined => "maturity_undefined",
            Self::DegenerateMaturity => "degenerate_maturity",
            Self::ZeroPrice => "zero_price",
            Self::UnknownCurrency { .. } => "unknown_currency",
            Self::InvalidAggregationFactor { .. } => "invalid_aggregation_factor",
            Self::InvalidDepthLimit { .. } => "invalid_depth_limit",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::UnsupportedDecimals { .. } => "unsupported_decimals",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAggregationFactor { .. }
            | Self::InvalidDepthLimit { .. }
            | Self::InvalidAmount { .. } => 400,
            Self::UnknownCurrency { .. } => 404,
            Self::PriceUndefined
            | Self::MaturityUndefined
            | Self::DegenerateMaturity
            | Self::ZeroPrice => 422,
            Self::UnsupportedDecimals { .. } => 500,
        }
    }
}
