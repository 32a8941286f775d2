//! Test utilities for API server integration tests

use axum_test::TestServer;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use quantalk::config::Config;
use quantalk::core::http::{create_router, AppState};
use quantalk::metrics::Metrics;
use quantalk::models::{
    EconomicEvent, Impact, NewsItem, PriceBar, PriceSeries, Quote, StockDetail, StockInfo,
};
use quantalk::services::{
    AssistantGateway, MarketDataProvider, NewsProvider, ProviderError,
};
use std::sync::Arc;
use std::time::Duration;

pub fn test_config() -> Config {
    Config {
        port: 0,
        market_data_base_url: "http://unused".to_string(),
        news_base_url: "http://unused".to_string(),
        news_api_key: String::new(),
        assistant_base_url: "http://unused".to_string(),
        assistant_api_key: String::new(),
        assistant_model: "test".to_string(),
        watchlist: vec!["AAPL".to_string(), "MSFT".to_string()],
        quote_ttl: Duration::from_secs(60),
        detail_ttl: Duration::from_secs(60),
        news_ttl: Duration::from_secs(60),
        calendar_ttl: Duration::from_secs(60),
    }
}

pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceBar::new(
                start + ChronoDuration::days(i as i64),
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000,
            )
        })
        .collect();
    PriceSeries::new(bars)
}

/// Market data stub: serves a fixed close series, or NotFound when unset
pub struct StubMarketData {
    pub closes: Option<Vec<f64>>,
}

#[async_trait::async_trait]
impl MarketDataProvider for StubMarketData {
    async fn fetch_series(
        &self,
        _symbol: &str,
        _lookback_days: u32,
    ) -> Result<PriceSeries, ProviderError> {
        match &self.closes {
            Some(closes) => Ok(series_from_closes(closes)),
            None => Err(ProviderError::NotFound),
        }
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let closes = self.closes.as_ref().ok_or(ProviderError::NotFound)?;
        if closes.len() < 2 {
            return Err(ProviderError::NotFound);
        }
        let price = closes[closes.len() - 1];
        let prev = closes[closes.len() - 2];
        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            change_pct: (price - prev) / prev * 100.0,
        })
    }

    async fn fetch_detail(&self, ticker: &str) -> Result<StockDetail, ProviderError> {
        let closes = self.closes.as_ref().ok_or(ProviderError::NotFound)?;
        if closes.len() < 2 {
            return Err(ProviderError::NotFound);
        }
        let history = series_from_closes(closes);
        let price = closes[closes.len() - 1];
        let prev = closes[closes.len() - 2];
        Ok(StockDetail {
            ticker: ticker.to_string(),
            info: StockInfo {
                price,
                change: price - prev,
                change_pct: (price - prev) / prev * 100.0,
                volume: 1_000,
                market_cap: 0.0,
            },
            history,
        })
    }
}

/// News stub with one positive and one neutral headline
pub struct StubNews;

#[async_trait::async_trait]
impl NewsProvider for StubNews {
    async fn market_news(&self, _limit: usize) -> Result<Vec<NewsItem>, ProviderError> {
        Ok(vec![
            NewsItem {
                headline: "Positive outlook for chipmakers".to_string(),
                source: "wire".to_string(),
                published: Utc::now() - ChronoDuration::hours(2),
                sentiment: 0.1,
            },
            NewsItem {
                headline: "Markets close mixed".to_string(),
                source: "wire".to_string(),
                published: Utc::now() - ChronoDuration::minutes(30),
                sentiment: 0.0,
            },
        ])
    }

    async fn company_news(
        &self,
        _ticker: &str,
        _days: u32,
        limit: usize,
    ) -> Result<Vec<NewsItem>, ProviderError> {
        self.market_news(limit).await
    }

    async fn economic_calendar(
        &self,
        from: chrono::NaiveDate,
        _to: chrono::NaiveDate,
    ) -> Result<Vec<EconomicEvent>, ProviderError> {
        Ok(vec![EconomicEvent {
            date: from,
            country: "US".to_string(),
            event: "CPI".to_string(),
            impact: Impact::High,
        }])
    }
}

/// Assistant stub: echoes the prompt, or fails when `fail` is set
pub struct StubAssistant {
    pub fail: bool,
}

#[async_trait::async_trait]
impl AssistantGateway for StubAssistant {
    async fn reply(&self, prompt: &str) -> Result<String, ProviderError> {
        if self.fail {
            Err(ProviderError::Malformed("stub failure".to_string()))
        } else {
            Ok(format!("echo: {prompt}"))
        }
    }
}

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        Self::with_market_data(StubMarketData {
            closes: Some((0..250).map(|i| 100.0 * 1.01f64.powi(i)).collect()),
        })
        .await
    }

    pub async fn with_market_data(market_data: StubMarketData) -> Self {
        Self::build(market_data, StubAssistant { fail: false }).await
    }

    pub async fn with_failing_assistant() -> Self {
        Self::build(
            StubMarketData {
                closes: Some(vec![100.0, 101.0]),
            },
            StubAssistant { fail: true },
        )
        .await
    }

    async fn build(market_data: StubMarketData, assistant: StubAssistant) -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let state = AppState::with_providers(
            &test_config(),
            metrics.clone(),
            Arc::new(market_data),
            Arc::new(StubNews),
            Arc::new(assistant),
        );

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}
