//! Core type definitions for Tenor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency symbol (e.g. "ETH", "USDC")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(pub String);

impl Currency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

/// Annualized rate on the 1e5 fixed-point scale (100_000 = 100%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(pub i64);

impl Rate {
    pub const ZERO: Rate = Rate(0);

    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }

    /// Rate as a fraction (0.05 = 5%)
    pub fn to_fraction(&self) -> f64 {
        self.0 as f64 / constants::RATE_SCALE as f64
    }

    /// Rate as a percentage (5.0 = 5%)
    pub fn to_percent(&self) -> f64 {
        self.to_fraction() * 100.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}%", self.to_percent())
    }
}

/// Order book side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Borrow,
    Lend,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Borrow => "borrow",
            Self::Lend => "lend",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unix timestamp in seconds
pub type UnixTimestamp = i64;

/// Bond unit price on the 0..=10_000 scale
pub type UnitPrice = u32;

/// Token amount in base units
pub type BaseAmount = u128;

/// Constants
pub mod constants {
    use super::UnitPrice;

    /// Par value of a bond unit price
    pub const PAR: UnitPrice = 10_000;

    /// Fixed-point scale of `Rate`
    pub const RATE_SCALE: i64 = 100_000;

    /// Day count convention for annualization
    pub const DAYS_PER_YEAR: i64 = 365;

    pub const SECONDS_PER_DAY: i64 = 86_400;

    /// Basis points in 100%
    pub const BPS: u32 = 10_000;
}
