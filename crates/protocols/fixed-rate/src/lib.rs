//! Fixed-Rate Lending Market Pricing
//!
//! Pure computation core for a fixed-rate lending marketplace.
//!
//! # Components
//!
//! - Yield engine: bond unit price to APR/APY ([`LoanValue`])
//! - Order book aggregator: raw fixed-depth ladders to bucketed, sorted views
//! - Collateral coverage classifier: coverage ratio to liquidation-risk tier
//!
//! # Units
//!
//! - Unit price: 0..=10_000, where 10_000 is par
//! - Rates: `Rate` on the 1e5 fixed-point scale
//! - Amounts: base units (u128); USD figures are display-unit f64
//!
//! Every function here is synchronous and side-effect free.

pub mod calculator;
pub mod constants;
pub mod loan_value;
pub mod orderbook;
pub mod snapshot;
pub mod state;

// Re-exports
pub use calculator::*;
pub use loan_value::*;
pub use orderbook::*;
pub use snapshot::*;
pub use state::*;
