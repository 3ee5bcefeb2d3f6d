//! Fixed-Rate Market State Types
//!
//! Order book levels, collateral snapshots and risk outputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tenor_core::{BaseAmount, Currency, CurrencyTable, PricingError};

use crate::calculator;
use crate::loan_value::LoanValue;

/// One price point of a raw order book page
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBookLevel {
    /// Resting amount in base units, 0 for padding rows
    pub amount: BaseAmount,
    pub value: LoanValue,
}

impl OrderBookLevel {
    pub fn new(amount: BaseAmount, value: LoanValue) -> Self {
        Self { amount, value }
    }
}

/// One display bucket produced by the aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedLevel {
    /// Sum of constituent amounts
    pub amount: BaseAmount,
    /// Bucket representative price
    pub value: LoanValue,
}

/// Both ladders prepared for display
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBookView {
    pub borrow: Vec<AggregatedLevel>,
    pub lend: Vec<AggregatedLevel>,
    /// Largest single bucket across both sides
    pub max_amount: BaseAmount,
    pub mid_price: Option<LoanValue>,
}

/// Per-currency balances of one account, rebuilt on every change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollateralBook {
    /// Balances eligible as margin (base units)
    pub collateral: BTreeMap<Currency, BaseAmount>,
    /// Balances not eligible as margin (base units)
    pub non_collateral: BTreeMap<Currency, BaseAmount>,
    /// Current coverage in basis points
    pub coverage_bps: u32,
    /// Protocol minimum in basis points
    pub collateral_threshold_bps: u32,
}

impl CollateralBook {
    /// USD value of (collateral, non_collateral), rounded to cents
    pub fn usd_totals(
        &self,
        prices: &BTreeMap<Currency, f64>,
        table: &CurrencyTable,
    ) -> Result<(f64, f64), PricingError> {
        let collateral = calculator::usd_value(&self.collateral, prices, table)?;
        let non_collateral = calculator::usd_value(&self.non_collateral, prices, table)?;
        Ok((collateral, non_collateral))
    }

    pub fn summary(
        &self,
        prices: &BTreeMap<Currency, f64>,
        table: &CurrencyTable,
    ) -> Result<CollateralSummary, PricingError> {
        let (collateral_usd, non_collateral_usd) = self.usd_totals(prices, table)?;
        Ok(calculator::compute_coverage(
            collateral_usd,
            non_collateral_usd,
            self.coverage_bps,
            self.collateral_threshold_bps,
        ))
    }
}

/// Derived collateral figures for dashboard widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateralSummary {
    pub collateral_usd: f64,
    pub non_collateral_usd: f64,
    pub coverage_bps: u32,
    pub threshold_bps: u32,
    /// `max(0, threshold - coverage)` in basis points
    pub shortfall_to_threshold_bps: u32,
    /// USD that can still be borrowed before reaching the threshold
    pub available_to_borrow_usd: f64,
    pub risk: RiskAssessment,
}

/// Liquidation-risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    pub fn color(&self) -> ColorTag {
        match self {
            Self::Low => ColorTag::Green,
            Self::Medium => ColorTag::Yellow,
            Self::High => ColorTag::Orange,
            Self::VeryHigh => ColorTag::Red,
        }
    }
}

/// UI color for a risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Green,
    Yellow,
    Orange,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub color_tag: ColorTag,
}
