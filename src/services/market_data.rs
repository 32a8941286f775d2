//! Market data provider interface

use crate::models::{PriceSeries, Quote, StockDetail};
use crate::services::error::ProviderError;

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get a time-ordered daily OHLCV series covering the trailing
    /// `lookback_days` calendar days
    async fn fetch_series(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<PriceSeries, ProviderError>;

    /// Get the latest price and day-over-day change for a symbol
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError>;

    /// Get six months of daily history plus snapshot info for a ticker
    async fn fetch_detail(&self, ticker: &str) -> Result<StockDetail, ProviderError>;
}
