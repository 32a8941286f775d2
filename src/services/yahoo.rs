//! Yahoo Finance chart API provider

use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{PriceBar, PriceSeries, Quote, StockDetail, StockInfo};
use crate::services::error::ProviderError;
use crate::services::market_data::MarketDataProvider;

pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    #[allow(dead_code)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct QuoteColumns {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

impl YahooProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<PriceSeries, ProviderError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, symbol, range
        );

        let fetch = || async {
            let response = self.client.get(&url).send().await?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(ProviderError::NotFound);
            }
            let response = response.error_for_status()?;
            let body: ChartResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::Malformed(e.to_string()))?;
            Ok(body)
        };

        // Only transport failures are worth retrying
        let body = fetch
            .retry(ExponentialBuilder::default().with_max_times(2))
            .when(|e: &ProviderError| matches!(e, ProviderError::Transport(_)))
            .notify(|e, dur| {
                warn!(symbol = %symbol, error = %e, "retrying chart fetch in {:?}", dur);
            })
            .await?;

        let result = body
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or(ProviderError::NotFound)?;

        let timestamps = result.timestamp.unwrap_or_default();
        let columns = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("missing quote columns".to_string()))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            // Sessions with null columns (holidays, partial data) are skipped
            let (open, high, low, close) = match (
                columns.open.get(i).copied().flatten(),
                columns.high.get(i).copied().flatten(),
                columns.low.get(i).copied().flatten(),
                columns.close.get(i).copied().flatten(),
            ) {
                (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
                _ => continue,
            };
            let volume = columns.volume.get(i).copied().flatten().unwrap_or(0);
            let timestamp = DateTime::<Utc>::from_timestamp(*ts, 0)
                .ok_or_else(|| ProviderError::Malformed(format!("bad timestamp {ts}")))?;
            bars.push(PriceBar::new(timestamp, open, high, low, close, volume));
        }

        if bars.is_empty() {
            return Err(ProviderError::NotFound);
        }

        debug!(symbol = %symbol, bars = bars.len(), "fetched chart");
        Ok(PriceSeries::new(bars))
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<PriceSeries, ProviderError> {
        let range = format!("{}d", lookback_days);
        self.fetch_chart(symbol, &range).await
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let series = self.fetch_chart(symbol, "5d").await?;
        let bars = series.bars();
        if bars.len() < 2 {
            return Err(ProviderError::NotFound);
        }

        let price = bars[bars.len() - 1].close;
        let prev = bars[bars.len() - 2].close;
        Ok(Quote {
            symbol: symbol.to_string(),
            price: (price * 100.0).round() / 100.0,
            change_pct: ((price - prev) / prev * 10000.0).round() / 100.0,
        })
    }

    async fn fetch_detail(&self, ticker: &str) -> Result<StockDetail, ProviderError> {
        let history = self.fetch_chart(ticker, "6mo").await?;
        let bars = history.bars();
        if bars.len() < 2 {
            return Err(ProviderError::NotFound);
        }

        let last = &bars[bars.len() - 1];
        let prev = &bars[bars.len() - 2];
        let info = StockInfo {
            price: last.close,
            change: last.close - prev.close,
            change_pct: ((last.close - prev.close) / prev.close * 10000.0).round() / 100.0,
            volume: last.volume,
            market_cap: 0.0, // chart API carries no cap; enriched by callers when known
        };

        Ok(StockDetail {
            ticker: ticker.to_string(),
            info,
            history,
        })
    }
}
