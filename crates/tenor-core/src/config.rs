//! Configuration types for Tenor

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BaseAmount, Currency, Error, PricingError};

/// Environment variable holding the path of a JSON config file
pub const CONFIG_PATH_ENV: &str = "TENOR_CONFIG";

/// Largest `base_decimals` whose unit (10^n) fits in a `u128`
pub const MAX_BASE_DECIMALS: u8 = 38;

/// Decimal places of one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency symbol (e.g., "ETH")
    pub symbol: Currency,

    /// Decimals of the on-chain base unit (18 for wei)
    pub base_decimals: u8,

    /// Decimals shown to the user
    pub display_decimals: u8,
}

impl CurrencyConfig {
    pub fn new(symbol: &str, base_decimals: u8, display_decimals: u8) -> Self {
        Self {
            symbol: Currency::new(symbol),
            base_decimals,
            display_decimals,
        }
    }

    /// Base units per display unit
    pub fn unit(&self) -> Result<BaseAmount, PricingError> {
        10u128
            .checked_pow(self.base_decimals as u32)
            .ok_or_else(|| PricingError::UnsupportedDecimals {
                currency: self.symbol.to_string(),
                decimals: self.base_decimals,
            })
    }
}

/// Static base/display conversion table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable(pub Vec<CurrencyConfig>);

impl CurrencyTable {
    /// Reject entries whose base unit cannot be represented
    pub fn validate(&self) -> Result<(), PricingError> {
        self.0.iter().try_for_each(|config| config.unit().map(|_| ()))
    }

    pub fn get(&self, currency: &Currency) -> Result<&CurrencyConfig, PricingError> {
        self.0
            .iter()
            .find(|c| &c.symbol == currency)
            .ok_or_else(|| PricingError::UnknownCurrency {
                currency: currency.to_string(),
            })
    }

    /// Convert a base-unit amount into display units
    pub fn to_display(
        &self,
        currency: &Currency,
        amount: BaseAmount,
    ) -> Result<f64, PricingError> {
        let config = self.get(currency)?;
        let unit = config.unit()?;
        // Split before converting so large balances keep their fractional digits
        let whole = (amount / unit) as f64;
        let fraction = (amount % unit) as f64 / unit as f64;
        Ok(whole + fraction)
    }

    /// Format a base-unit amount with the currency's display decimals
    pub fn format_amount(
        &self,
        currency: &Currency,
        amount: BaseAmount,
    ) -> Result<String, PricingError> {
        let config = self.get(currency)?;
        let value = self.to_display(currency, amount)?;
        Ok(format!(
            "{:.*} {}",
            config.display_decimals as usize, value, config.symbol
        ))
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self(vec![
            CurrencyConfig::new("ETH", 18, 6),
            CurrencyConfig::new("WBTC", 8, 4),
            CurrencyConfig::new("USDC", 6, 2),
            CurrencyConfig::new("FIL", 18, 4),
        ])
    }
}

/// Order book display defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookConfig {
    /// Price bucket width
    #[serde(default = "default_aggregation_factor")]
    pub aggregation_factor: u32,

    /// Raw levels requested per side when both sides are shown
    #[serde(default = "default_depth_limit")]
    pub depth_limit: usize,
}

fn default_aggregation_factor() -> u32 {
    1
}

fn default_depth_limit() -> usize {
    10
}

impl Default for OrderBookConfig {
    fn default() -> Self {
        Self {
            aggregation_factor: default_aggregation_factor(),
            depth_limit: default_depth_limit(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Protocol collateral threshold in basis points (8000 = 80%)
    #[serde(default = "default_collateral_threshold_bps")]
    pub collateral_threshold_bps: u32,

    /// Currency decimal table
    #[serde(default)]
    pub currencies: CurrencyTable,

    /// Order book display settings
    #[serde(default)]
    pub orderbook: OrderBookConfig,
}

fn default_api_port() -> u16 {
    19080
}

fn default_collateral_threshold_bps() -> u32 {
    8000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            collateral_threshold_bps: default_collateral_threshold_bps(),
            currencies: CurrencyTable::default(),
            orderbook: OrderBookConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| Error::Serialization(e.to_string()))?;
        config
            .currencies
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load from the file named by `TENOR_CONFIG`, or defaults when unset
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!("Loading config from {}", path);
                Self::from_json_file(path)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}
