//! Finnhub news, sentiment and economic calendar provider

use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::models::{EconomicEvent, Impact, NewsItem};
use crate::services::error::ProviderError;

pub const CALENDAR_MAX_EVENTS: usize = 15;

#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    /// General market headlines
    async fn market_news(&self, limit: usize) -> Result<Vec<NewsItem>, ProviderError>;

    /// Company headlines covering the trailing `days` calendar days
    async fn company_news(
        &self,
        ticker: &str,
        days: u32,
        limit: usize,
    ) -> Result<Vec<NewsItem>, ProviderError>;

    /// Scheduled economic releases between two dates, ascending
    async fn economic_calendar(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EconomicEvent>, ProviderError>;
}

/// Crude keyword sentiment over a headline. A headline mentioning
/// "positive" leans +0.1, "negative" leans -0.1, anything else is flat.
pub fn headline_sentiment(headline: &str) -> f64 {
    let lower = headline.to_lowercase();
    if lower.contains("positive") {
        0.1
    } else if lower.contains("negative") {
        -0.1
    } else {
        0.0
    }
}

pub struct FinnhubClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    headline: String,
    #[serde(default)]
    source: String,
    datetime: i64,
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    #[serde(rename = "economicCalendar", default)]
    economic_calendar: Vec<RawCalendarEntry>,
}

#[derive(Debug, Deserialize)]
struct RawCalendarEntry {
    #[serde(default)]
    date: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    event: String,
    #[serde(default)]
    impact: String,
}

impl FinnhubClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds an API URL with the auth token and properly encoded params
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ProviderError::Malformed(format!("bad endpoint url: {e}")))?;
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }
        url.query_pairs_mut().append_pair("token", &self.api_key);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
    ) -> Result<T, ProviderError> {
        let fetch = || async {
            let response = self.client.get(url.as_str()).send().await?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(ProviderError::NotFound);
            }
            let response = response.error_for_status()?;
            response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::Malformed(e.to_string()))
        };

        fetch
            .retry(ExponentialBuilder::default().with_max_times(2))
            .when(|e: &ProviderError| matches!(e, ProviderError::Transport(_)))
            .notify(|e, dur| warn!(error = %e, "retrying news fetch in {:?}", dur))
            .await
    }

    fn into_items(&self, articles: Vec<RawArticle>, limit: usize) -> Vec<NewsItem> {
        articles
            .into_iter()
            .filter_map(|a| {
                let published = DateTime::<Utc>::from_timestamp(a.datetime, 0)?;
                let sentiment = headline_sentiment(&a.headline);
                Some(NewsItem {
                    headline: a.headline,
                    source: a.source,
                    published,
                    sentiment,
                })
            })
            .take(limit)
            .collect()
    }
}

#[async_trait::async_trait]
impl NewsProvider for FinnhubClient {
    async fn market_news(&self, limit: usize) -> Result<Vec<NewsItem>, ProviderError> {
        let url = self.endpoint("/news", &[("category", "general")])?;
        let articles: Vec<RawArticle> = self.get_json(&url).await?;
        Ok(self.into_items(articles, limit))
    }

    async fn company_news(
        &self,
        ticker: &str,
        days: u32,
        limit: usize,
    ) -> Result<Vec<NewsItem>, ProviderError> {
        let to = Utc::now().date_naive();
        let from = to - Duration::days(days as i64);
        let url = self.endpoint(
            "/company-news",
            &[
                ("symbol", ticker),
                ("from", &from.to_string()),
                ("to", &to.to_string()),
            ],
        )?;
        let articles: Vec<RawArticle> = self.get_json(&url).await?;
        Ok(self.into_items(articles, limit))
    }

    async fn economic_calendar(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EconomicEvent>, ProviderError> {
        let url = self.endpoint(
            "/calendar/economic",
            &[("from", &from.to_string()), ("to", &to.to_string())],
        )?;
        let body: CalendarResponse = self.get_json(&url).await?;

        let mut events: Vec<EconomicEvent> = body
            .economic_calendar
            .into_iter()
            .filter_map(|raw| {
                let date = raw.date.get(..10).and_then(|d| d.parse().ok())?;
                Some(EconomicEvent {
                    date,
                    country: raw.country,
                    event: raw.event,
                    impact: Impact::parse(&raw.impact),
                })
            })
            .collect();

        events.sort_by_key(|e| e.date);
        events.truncate(CALENDAR_MAX_EVENTS);
        Ok(events)
    }
}
