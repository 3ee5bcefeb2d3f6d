//! Yield Engine
//!
//! Converts a zero-coupon bond unit price into annualized rates.
//!
//! ```text
//! days      = floor((maturity - as_of) / 86400)
//! apr       = -ln(price / PAR) / (days / 365)
//! apy       = (1 + apr / 365) ^ days - 1
//! ```
//!
//! Rates are returned on the 1e5 fixed-point scale, rounded to the nearest unit.
//! Floating point is only used inside the logarithm and power terms.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use tenor_core::{PricingError, Rate, UnitPrice, UnixTimestamp};

use crate::constants::{
    orderbook::RATE_PLACEHOLDER, DAYS_PER_YEAR, PAR, RATE_SCALE, SECONDS_PER_DAY,
};

/// Field a `LoanValue` was constructed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seed {
    Price(UnitPrice),
    Apr(Rate),
    Apy(Rate),
}

/// One discount point on the yield curve.
///
/// Exactly one of price, APR or APY is the seed. The other rates are derived
/// on first read and memoized for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct LoanValue {
    seed: Seed,
    maturity: Option<UnixTimestamp>,
    as_of: UnixTimestamp,
    apr: OnceLock<Result<Rate, PricingError>>,
    apy: OnceLock<Result<Rate, PricingError>>,
}

impl LoanValue {
    fn with_seed(seed: Seed, maturity: Option<UnixTimestamp>, as_of: UnixTimestamp) -> Self {
        Self {
            seed,
            maturity,
            as_of,
            apr: OnceLock::new(),
            apy: OnceLock::new(),
        }
    }

    /// Build from a unit price. `as_of` defaults to the current time, read once here.
    pub fn from_price(
        price: UnitPrice,
        maturity: UnixTimestamp,
        as_of: Option<UnixTimestamp>,
    ) -> Self {
        Self::with_seed(
            Seed::Price(price),
            Some(maturity),
            as_of.unwrap_or_else(unix_now),
        )
    }

    /// Build from a known APR. Price is never derivable from this value.
    pub fn from_apr(apr: Rate) -> Self {
        Self::with_seed(Seed::Apr(apr), None, unix_now())
    }

    /// Build from a known APY. Price is never derivable from this value.
    pub fn from_apy(apy: Rate) -> Self {
        Self::with_seed(Seed::Apy(apy), None, unix_now())
    }

    /// Attach a maturity so APR and APY become derivable from each other
    pub fn with_maturity(self, maturity: UnixTimestamp, as_of: Option<UnixTimestamp>) -> Self {
        Self::with_seed(self.seed, Some(maturity), as_of.unwrap_or(self.as_of))
    }

    /// Same maturity and evaluation time at another price
    pub fn at_price(&self, price: UnitPrice) -> Self {
        Self::with_seed(Seed::Price(price), self.maturity, self.as_of)
    }

    pub fn price(&self) -> Result<UnitPrice, PricingError> {
        match self.seed {
            Seed::Price(price) => Ok(price),
            Seed::Apr(_) | Seed::Apy(_) => Err(PricingError::PriceUndefined),
        }
    }

    pub fn maturity(&self) -> Option<UnixTimestamp> {
        self.maturity
    }

    pub fn as_of(&self) -> UnixTimestamp {
        self.as_of
    }

    /// Whole days until maturity, negative once matured
    pub fn days_to_maturity(&self) -> Result<i64, PricingError> {
        let maturity = self.maturity.ok_or(PricingError::MaturityUndefined)?;
        // Widened so any pair of timestamps is representable; the quotient always fits i64
        let seconds = maturity as i128 - self.as_of as i128;
        Ok(seconds.div_euclid(SECONDS_PER_DAY as i128) as i64)
    }

    pub fn apr(&self) -> Result<Rate, PricingError> {
        self.apr.get_or_init(|| self.compute_apr()).clone()
    }

    pub fn apy(&self) -> Result<Rate, PricingError> {
        self.apy.get_or_init(|| self.compute_apy()).clone()
    }

    fn compute_apr(&self) -> Result<Rate, PricingError> {
        match self.seed {
            Seed::Apr(apr) => Ok(apr),
            Seed::Price(_) | Seed::Apy(_) => self.apr_fraction().map(to_rate),
        }
    }

    /// Unrounded APR as a fraction, so APY compounds from it with a single rounding
    fn apr_fraction(&self) -> Result<f64, PricingError> {
        match self.seed {
            Seed::Apr(apr) => Ok(apr.to_fraction()),
            Seed::Price(price) => {
                if price == 0 {
                    return Err(PricingError::ZeroPrice);
                }
                let days = self.days_to_maturity()?;
                if days == 0 {
                    return Err(PricingError::DegenerateMaturity);
                }
                let year_fraction = days as f64 / DAYS_PER_YEAR as f64;
                let ratio = price as f64 / PAR as f64;
                Ok(-ratio.ln() / year_fraction)
            }
            Seed::Apy(apy) => {
                let days = self.days_to_maturity()?;
                if days == 0 {
                    return Err(PricingError::DegenerateMaturity);
                }
                let daily = (1.0 + apy.to_fraction()).powf(1.0 / days as f64) - 1.0;
                Ok(daily * DAYS_PER_YEAR as f64)
            }
        }
    }

    fn compute_apy(&self) -> Result<Rate, PricingError> {
        if self.maturity == Some(0) {
            return Ok(Rate::ZERO);
        }
        match self.seed {
            Seed::Apy(apy) => Ok(apy),
            Seed::Price(0) => Ok(Rate::ZERO),
            Seed::Price(_) | Seed::Apr(_) => {
                let days = self.days_to_maturity()?;
                let daily = self.apr_fraction()? / DAYS_PER_YEAR as f64;
                Ok(to_rate((1.0 + daily).powf(days as f64) - 1.0))
            }
        }
    }
}

impl PartialEq for LoanValue {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.maturity == other.maturity && self.as_of == other.as_of
    }
}

/// Render a rate for display, or the placeholder when it cannot be computed
pub fn format_rate(rate: &Result<Rate, PricingError>) -> String {
    match rate {
        Ok(rate) => rate.to_string(),
        Err(_) => RATE_PLACEHOLDER.to_string(),
    }
}

fn to_rate(fraction: f64) -> Rate {
    Rate::new((fraction * RATE_SCALE as f64).round() as i64)
}

/// Current Unix time in seconds
pub fn unix_now() -> UnixTimestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as UnixTimestamp)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AS_OF: UnixTimestamp = 1_700_000_000;
    const DAY: UnixTimestamp = SECONDS_PER_DAY;

    fn in_days(days: i64) -> UnixTimestamp {
        AS_OF + days * DAY
    }

    #[test]
    fn test_apr_one_year() {
        // -ln(0.95) = 0.0512933
        let value = LoanValue::from_price(9500, in_days(365), Some(AS_OF));
        assert_eq!(value.apr().unwrap(), Rate::new(5_129));
        // Compounded from the unrounded APR: 5262.78 rounds up
        assert_eq!(value.apy().unwrap(), Rate::new(5_263));
    }

    #[test]
    fn test_apr_half_year() {
        let value = LoanValue::from_price(9800, in_days(182), Some(AS_OF));
        assert_eq!(value.apr().unwrap(), Rate::new(4_052));
        // 2040.70 rounds up, same rule as the one year case
        assert_eq!(value.apy().unwrap(), Rate::new(2_041));
    }

    #[test]
    fn test_apy_rounded_once_from_raw_apr() {
        // Compounding the rounded 5_129 would give 5262.43 and round down
        let value = LoanValue::from_price(9500, in_days(365), Some(AS_OF));
        let raw_apr = -(9500f64 / PAR as f64).ln();
        let expected = ((1.0 + raw_apr / 365.0).powf(365.0) - 1.0) * RATE_SCALE as f64;
        assert_eq!(value.apy().unwrap(), Rate::new(expected.round() as i64));
        assert_ne!(value.apy().unwrap(), Rate::new(5_262));
    }

    #[test]
    fn test_extreme_maturity_does_not_overflow() {
        let value = LoanValue::from_price(9500, UnixTimestamp::MIN, Some(AS_OF));
        let days = value.days_to_maturity().unwrap();
        assert!(days < 0);
        let expected = (UnixTimestamp::MIN as i128 - AS_OF as i128).div_euclid(DAY as i128);
        assert_eq!(days as i128, expected);
        assert!(value.apr().is_ok());
        assert!(value.apy().is_ok());

        let value = LoanValue::from_price(9500, UnixTimestamp::MAX, Some(-AS_OF));
        assert!(value.days_to_maturity().unwrap() > 0);
        assert!(value.apr().is_ok());
    }

    #[test]
    fn test_partial_day_is_floored() {
        let value = LoanValue::from_price(9500, in_days(365) + DAY - 1, Some(AS_OF));
        assert_eq!(value.days_to_maturity().unwrap(), 365);
        assert_eq!(value.apr().unwrap(), Rate::new(5_129));
    }

    /// One step in unit price moves APR by at least one 1e-5 unit only while
    /// the maturity is about a year or shorter. Longer horizons divide the log
    /// term further and neighbouring prices near par can share a rounded APR.
    #[test]
    fn test_apr_strictly_decreasing_in_price() {
        let maturity = in_days(365);
        let mut previous = LoanValue::from_price(1, maturity, Some(AS_OF)).apr().unwrap();
        for price in 2..=PAR {
            let apr = LoanValue::from_price(price, maturity, Some(AS_OF))
                .apr()
                .unwrap();
            assert!(apr < previous, "apr not decreasing at price {}", price);
            previous = apr;
        }
        assert_eq!(previous, Rate::ZERO);
    }

    #[test]
    fn test_apr_non_increasing_at_long_maturity() {
        let maturity = in_days(7_300);
        let near_par = |price| LoanValue::from_price(price, maturity, Some(AS_OF)).apr().unwrap();
        assert_eq!(near_par(9_998), Rate::new(1));
        assert_eq!(near_par(9_999), Rate::new(1));

        let mut previous = near_par(1);
        for price in 2..=PAR {
            let apr = near_par(price);
            assert!(apr <= previous, "apr increased at price {}", price);
            previous = apr;
        }
    }

    #[test]
    fn test_above_par_gives_negative_apr() {
        let value = LoanValue::from_price(10_500, in_days(365), Some(AS_OF));
        assert_eq!(value.apr().unwrap(), Rate::new(-4_879));
    }

    #[test]
    fn test_zero_price_apy_short_circuit() {
        let value = LoanValue::from_price(0, in_days(90), Some(AS_OF));
        assert_eq!(value.apy().unwrap(), Rate::ZERO);
        assert_eq!(value.apr().unwrap_err(), PricingError::ZeroPrice);
    }

    #[test]
    fn test_zero_maturity_apy_short_circuit() {
        let value = LoanValue::from_price(9500, 0, Some(AS_OF));
        assert_eq!(value.apy().unwrap(), Rate::ZERO);
    }

    #[test]
    fn test_degenerate_maturity() {
        let value = LoanValue::from_price(9900, AS_OF, Some(AS_OF));
        assert_eq!(value.apr().unwrap_err(), PricingError::DegenerateMaturity);
        assert_eq!(value.apy().unwrap_err(), PricingError::DegenerateMaturity);

        // Same calendar day still counts as zero days
        let value = LoanValue::from_price(9900, AS_OF + 3_600, Some(AS_OF));
        assert_eq!(value.apr().unwrap_err(), PricingError::DegenerateMaturity);
    }

    #[test]
    fn test_matured_instrument_still_computes() {
        let value = LoanValue::from_price(9500, in_days(-30), Some(AS_OF));
        assert_eq!(value.days_to_maturity().unwrap(), -30);
        assert_eq!(value.apr().unwrap(), Rate::new(-62_407));
        assert!(value.apy().is_ok());
    }

    #[test]
    fn test_rate_seeded_price_is_undefined() {
        let from_apr = LoanValue::from_apr(Rate::new(5_000));
        assert_eq!(from_apr.price().unwrap_err(), PricingError::PriceUndefined);
        assert_eq!(from_apr.apr().unwrap(), Rate::new(5_000));
        assert_eq!(from_apr.apy().unwrap_err(), PricingError::MaturityUndefined);

        let from_apy = LoanValue::from_apy(Rate::new(5_000));
        assert_eq!(from_apy.price().unwrap_err(), PricingError::PriceUndefined);
        assert_eq!(from_apy.apy().unwrap(), Rate::new(5_000));
        assert_eq!(from_apy.apr().unwrap_err(), PricingError::MaturityUndefined);
    }

    #[test]
    fn test_rate_seeds_with_maturity() {
        let from_apy =
            LoanValue::from_apy(Rate::new(5_000)).with_maturity(in_days(365), Some(AS_OF));
        assert_eq!(from_apy.apr().unwrap(), Rate::new(4_879));
        assert_eq!(from_apy.price().unwrap_err(), PricingError::PriceUndefined);

        let from_apr =
            LoanValue::from_apr(Rate::new(5_129)).with_maturity(in_days(365), Some(AS_OF));
        // Exact seed, so 5262.43 rounds down
        assert_eq!(from_apr.apy().unwrap(), Rate::new(5_262));
    }

    #[test]
    fn test_memoized_and_clone_keeps_cache() {
        let value = LoanValue::from_price(9500, in_days(365), Some(AS_OF));
        assert!(value.apr.get().is_none());
        assert!(value.apy.get().is_none());

        let first = value.apr().unwrap();
        assert_eq!(value.apr.get(), Some(&Ok(first)));
        // APY does not populate the APR cell or recompute it
        assert!(value.apy.get().is_none());
        assert_eq!(value.apr(), Ok(first));

        let copy = value.clone();
        assert_eq!(copy.apr.get(), Some(&Ok(first)));
        assert!(copy.apy.get().is_none());
        assert_eq!(copy.apr().unwrap(), first);
        assert_eq!(copy, value);

        // Errors are memoized too
        let degenerate = LoanValue::from_price(9500, AS_OF, Some(AS_OF));
        let err = degenerate.apr().unwrap_err();
        assert_eq!(degenerate.apr.get(), Some(&Err(err)));
    }

    #[test]
    fn test_default_as_of_is_captured() {
        let value = LoanValue::from_price(9500, unix_now() + 365 * DAY + DAY / 2, None);
        let as_of = value.as_of();
        assert!(as_of > 0);
        assert_eq!(value.as_of(), as_of);
        assert_eq!(value.days_to_maturity().unwrap(), 365);
    }

    #[test]
    fn test_format_rate_placeholder() {
        let value = LoanValue::from_price(9500, in_days(365), Some(AS_OF));
        assert_eq!(format_rate(&value.apr()), "5.1290%");

        let degenerate = LoanValue::from_price(9500, AS_OF, Some(AS_OF));
        assert_eq!(format_rate(&degenerate.apr()), "--");
    }
}
