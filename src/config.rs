//! Environment-based configuration

use std::env;
use std::time::Duration;

/// Get the current environment (production, sandbox, development)
pub fn get_environment() -> String {
    env::var("QUANTALK_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub market_data_base_url: String,
    pub news_base_url: String,
    pub news_api_key: String,
    pub assistant_base_url: String,
    pub assistant_api_key: String,
    pub assistant_model: String,
    pub watchlist: Vec<String>,
    pub quote_ttl: Duration,
    pub detail_ttl: Duration,
    pub news_ttl: Duration,
    pub calendar_ttl: Duration,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for everything except the provider API keys.
    pub fn from_env() -> Self {
        let watchlist = env::var("WATCHLIST")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_uppercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| Self::default_watchlist());

        Self {
            port: env_parse("PORT", 8080),
            market_data_base_url: env::var("MARKET_DATA_BASE_URL")
                .unwrap_or_else(|_| "https://query1.finance.yahoo.com".to_string()),
            news_base_url: env::var("NEWS_BASE_URL")
                .unwrap_or_else(|_| "https://finnhub.io/api/v1".to_string()),
            news_api_key: env::var("FINNHUB_API_KEY").unwrap_or_default(),
            assistant_base_url: env::var("ASSISTANT_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            assistant_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            assistant_model: env::var("ASSISTANT_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            watchlist,
            quote_ttl: Duration::from_secs(env_parse("QUOTE_TTL_SECONDS", 60)),
            detail_ttl: Duration::from_secs(env_parse("DETAIL_TTL_SECONDS", 180)),
            news_ttl: Duration::from_secs(env_parse("NEWS_TTL_SECONDS", 300)),
            calendar_ttl: Duration::from_secs(env_parse("CALENDAR_TTL_SECONDS", 3600)),
        }
    }

    fn default_watchlist() -> Vec<String> {
        [
            "AAPL", "MSFT", "NVDA", "GOOGL", "AMZN", "META", "TSLA", "BRK-B", "LLY", "JPM",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
