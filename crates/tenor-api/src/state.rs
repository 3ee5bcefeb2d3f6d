//! Application state shared across API handlers

use std::sync::Arc;

use fixed_rate::OrderBookOptions;
use tenor_core::{AppConfig, CurrencyTable};
use tokio::sync::RwLock;

/// Shared application state.
///
/// Holds configuration only. Books, balances and prices arrive with each
/// request and are never stored.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    pub async fn currencies(&self) -> CurrencyTable {
        self.inner.config.read().await.currencies.clone()
    }

    pub async fn collateral_threshold_bps(&self) -> u32 {
        self.inner.config.read().await.collateral_threshold_bps
    }

    pub async fn orderbook_options(&self) -> OrderBookOptions {
        OrderBookOptions::from(&self.inner.config.read().await.orderbook)
    }

    /// Update the protocol collateral threshold
    pub async fn set_collateral_threshold_bps(&self, threshold_bps: u32) {
        let mut config = self.inner.config.write().await;
        tracing::info!(
            "Collateral threshold changed from {} to {} bps",
            config.collateral_threshold_bps,
            threshold_bps
        );
        config.collateral_threshold_bps = threshold_bps;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
