//! Fixed-Rate Market Constants
//!
//! Risk tier bands and order book defaults.

pub use tenor_core::constants::{BPS, DAYS_PER_YEAR, PAR, RATE_SCALE, SECONDS_PER_DAY};

/// Liquidation-risk bands on coverage percent (inclusive upper bounds)
pub mod risk {
    pub const LOW_MAX_PCT: f64 = 40.0;
    pub const MEDIUM_MAX_PCT: f64 = 60.0;
    pub const HIGH_MAX_PCT: f64 = 80.0;
}

/// Order book display
pub mod orderbook {
    /// Depth multiplier when only one side of the book is shown
    pub const SINGLE_SIDE_DEPTH_MULTIPLIER: usize = 2;

    /// Display placeholder for a rate that cannot be computed
    pub const RATE_PLACEHOLDER: &str = "--";
}
