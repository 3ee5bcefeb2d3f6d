//! Order Book Aggregator
//!
//! Turns raw fixed-depth ladders into bucketed, sorted display ladders.
//!
//! - Non-zero levels are summed into buckets of width `aggregation_factor`,
//!   keyed by `floor(price / factor) * factor`.
//! - Zero-amount padding rows are never merged. They keep their own price and
//!   are collected at the leading edge of the borrow ladder and the trailing
//!   edge of the lend ladder.
//! - Borrow sorts ascending by price, lend sorts descending.

use std::collections::BTreeMap;

use tenor_core::{BaseAmount, OrderBookConfig, PricingError, Side, UnitPrice};

use crate::constants::orderbook::SINGLE_SIDE_DEPTH_MULTIPLIER;
use crate::loan_value::LoanValue;
use crate::state::{AggregatedLevel, OrderBookLevel, OrderBookView};

/// Which ladders the caller displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookDisplay {
    Both,
    BorrowOnly,
    LendOnly,
}

/// Aggregation settings for one render of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBookOptions {
    pub aggregation_factor: u32,
    /// Raw levels considered per side when both sides are shown
    pub depth_limit: usize,
}

impl OrderBookOptions {
    /// Levels to request per side; a lone ladder gets twice the rows
    pub fn depth_for(&self, display: BookDisplay) -> usize {
        match display {
            BookDisplay::Both => self.depth_limit,
            BookDisplay::BorrowOnly | BookDisplay::LendOnly => {
                self.depth_limit.saturating_mul(SINGLE_SIDE_DEPTH_MULTIPLIER)
            }
        }
    }
}

impl From<&OrderBookConfig> for OrderBookOptions {
    fn from(config: &OrderBookConfig) -> Self {
        Self {
            aggregation_factor: config.aggregation_factor,
            depth_limit: config.depth_limit,
        }
    }
}

/// Aggregate one side of the book for display
pub fn prepare(
    levels: &[OrderBookLevel],
    side: Side,
    aggregation_factor: u32,
    depth_limit: usize,
) -> Result<Vec<AggregatedLevel>, PricingError> {
    if aggregation_factor == 0 {
        return Err(PricingError::InvalidAggregationFactor {
            factor: aggregation_factor,
        });
    }
    if depth_limit == 0 {
        return Err(PricingError::InvalidDepthLimit { limit: depth_limit });
    }

    let mut buckets: BTreeMap<UnitPrice, AggregatedLevel> = BTreeMap::new();
    let mut empty: Vec<(UnitPrice, AggregatedLevel)> = Vec::new();

    for level in levels.iter().take(depth_limit) {
        let price = level.value.price()?;
        if level.amount == 0 {
            empty.push((
                price,
                AggregatedLevel {
                    amount: 0,
                    value: level.value.clone(),
                },
            ));
            continue;
        }

        let key = price / aggregation_factor * aggregation_factor;
        buckets
            .entry(key)
            .and_modify(|bucket| bucket.amount = bucket.amount.saturating_add(level.amount))
            .or_insert_with(|| AggregatedLevel {
                amount: level.amount,
                value: level.value.at_price(key),
            });
    }

    // Stable, so equal-priced padding rows keep their input order
    match side {
        Side::Borrow => empty.sort_by(|a, b| a.0.cmp(&b.0)),
        Side::Lend => empty.sort_by(|a, b| b.0.cmp(&a.0)),
    }
    let empty = empty.into_iter().map(|(_, level)| level);

    let prepared: Vec<AggregatedLevel> = match side {
        Side::Borrow => empty.chain(buckets.into_values()).collect(),
        Side::Lend => buckets.into_values().rev().chain(empty).collect(),
    };

    tracing::trace!(
        side = side.as_str(),
        input = levels.len(),
        output = prepared.len(),
        aggregation_factor,
        "Prepared order book side"
    );

    Ok(prepared)
}

/// Largest single-bucket amount, 0 for an empty ladder
pub fn max_amount(levels: &[AggregatedLevel]) -> BaseAmount {
    levels.iter().map(|level| level.amount).max().unwrap_or(0)
}

/// Midpoint bond price of the two best prices (truncating integer mean).
///
/// Callers with an empty side substitute their own fallback instead of calling this.
pub fn mid_price(
    best_borrow: &LoanValue,
    best_lend: &LoanValue,
) -> Result<LoanValue, PricingError> {
    let borrow = best_borrow.price()?;
    let lend = best_lend.price()?;
    let mid = ((borrow as u64 + lend as u64) / 2) as UnitPrice;
    Ok(best_borrow.at_price(mid))
}

/// First row with resting depth
pub fn best_level(levels: &[AggregatedLevel]) -> Option<&AggregatedLevel> {
    levels.iter().find(|level| level.amount > 0)
}

/// Prepare both ladders plus the derived scalars
pub fn prepare_book(
    borrow: &[OrderBookLevel],
    lend: &[OrderBookLevel],
    options: &OrderBookOptions,
    display: BookDisplay,
    fallback_mid: Option<LoanValue>,
) -> Result<OrderBookView, PricingError> {
    let depth = options.depth_for(display);
    let mut borrow = prepare(borrow, Side::Borrow, options.aggregation_factor, depth)?;
    let mut lend = prepare(lend, Side::Lend, options.aggregation_factor, depth)?;

    let mid = match (best_level(&borrow), best_level(&lend)) {
        (Some(best_borrow), Some(best_lend)) => {
            Some(mid_price(&best_borrow.value, &best_lend.value)?)
        }
        _ => {
            tracing::debug!("One side of the book is empty, using fallback mid price");
            fallback_mid
        }
    };

    match display {
        BookDisplay::Both => {}
        BookDisplay::BorrowOnly => lend.clear(),
        BookDisplay::LendOnly => borrow.clear(),
    }

    let largest = max_amount(&borrow).max(max_amount(&lend));

    Ok(OrderBookView {
        borrow,
        lend,
        max_amount: largest,
        mid_price: mid,
    })
}
