//! Collateral Calculator
//!
//! Pure math for USD valuation, coverage headroom and risk tiers.
//! No I/O - just calculations.
//!
//! Base-unit balances are converted to display units once, through the
//! currency table. Everything after that boundary is USD display math in f64.

use std::collections::BTreeMap;

use tenor_core::{BaseAmount, Currency, CurrencyTable, PricingError};

use crate::constants::{risk, BPS};
use crate::state::{CollateralSummary, RiskAssessment, RiskTier};

/// Map a coverage percentage to its liquidation-risk tier.
///
/// Coverage above 100% is valid and lands in `VeryHigh`.
pub fn classify(coverage_pct: f64) -> RiskAssessment {
    let tier = if coverage_pct <= risk::LOW_MAX_PCT {
        RiskTier::Low
    } else if coverage_pct <= risk::MEDIUM_MAX_PCT {
        RiskTier::Medium
    } else if coverage_pct <= risk::HIGH_MAX_PCT {
        RiskTier::High
    } else {
        RiskTier::VeryHigh
    };

    RiskAssessment {
        tier,
        color_tag: tier.color(),
    }
}

/// Classify a coverage expressed in basis points
pub fn classify_bps(coverage_bps: u32) -> RiskAssessment {
    classify(coverage_bps as f64 / 100.0)
}

/// Derive the collateral summary shown on the dashboard
pub fn compute_coverage(
    collateral_usd: f64,
    non_collateral_usd: f64,
    coverage_bps: u32,
    threshold_bps: u32,
) -> CollateralSummary {
    let shortfall_to_threshold_bps = threshold_bps.saturating_sub(coverage_bps);
    let available_to_borrow_usd =
        round_to_cents(collateral_usd * shortfall_to_threshold_bps as f64 / BPS as f64);
    let risk = classify_bps(coverage_bps);

    tracing::debug!(
        coverage_bps,
        threshold_bps,
        tier = risk.tier.label(),
        "Computed collateral coverage"
    );

    CollateralSummary {
        collateral_usd: round_to_cents(collateral_usd),
        non_collateral_usd: round_to_cents(non_collateral_usd),
        coverage_bps,
        threshold_bps,
        shortfall_to_threshold_bps,
        available_to_borrow_usd,
        risk,
    }
}

/// USD value of a set of balances, rounded to cents.
///
/// A currency missing from the table is a caller error. A currency missing
/// from `prices` contributes nothing, since prices refresh independently.
pub fn usd_value(
    balances: &BTreeMap<Currency, BaseAmount>,
    prices: &BTreeMap<Currency, f64>,
    table: &CurrencyTable,
) -> Result<f64, PricingError> {
    let mut total = 0.0;
    for (currency, amount) in balances {
        let display = table.to_display(currency, *amount)?;
        match prices.get(currency) {
            Some(price) => total += display * price,
            None => tracing::warn!("No USD price for {}, valuing at 0", currency),
        }
    }
    Ok(round_to_cents(total))
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
