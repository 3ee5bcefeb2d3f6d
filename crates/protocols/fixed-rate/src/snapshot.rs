//! Raw order book snapshot decoding
//!
//! The data source returns one fixed-length page per side, with amounts as
//! decimal strings and unpopulated rows padded with a zero amount.

use serde::{Deserialize, Serialize};
use tenor_core::{BaseAmount, PricingError, UnitPrice, UnixTimestamp};

use crate::loan_value::{unix_now, LoanValue};
use crate::state::OrderBookLevel;

/// One row of a raw order book page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderBookLevel {
    /// Base-unit amount as a decimal string
    pub amount: String,
    pub unit_price: UnitPrice,
}

impl RawOrderBookLevel {
    pub fn new(amount: impl Into<String>, unit_price: UnitPrice) -> Self {
        Self {
            amount: amount.into(),
            unit_price,
        }
    }
}

pub fn parse_amount(raw: &str) -> Result<BaseAmount, PricingError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<BaseAmount>()
        .map_err(|_| PricingError::InvalidAmount {
            value: raw.to_string(),
        })
}

/// Decode a raw page into levels that share one maturity and evaluation time
pub fn decode_levels(
    raw: &[RawOrderBookLevel],
    maturity: UnixTimestamp,
    as_of: Option<UnixTimestamp>,
) -> Result<Vec<OrderBookLevel>, PricingError> {
    let as_of = as_of.unwrap_or_else(unix_now);
    raw.iter()
        .map(|level| {
            let amount = parse_amount(&level.amount)?;
            let value = LoanValue::from_price(level.unit_price, maturity, Some(as_of));
            Ok(OrderBookLevel::new(amount, value))
        })
        .collect()
}
