//! News, sentiment and economic calendar models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Discrete sentiment classification used for the headline icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentTag {
    Positive,
    Negative,
    Neutral,
}

impl SentimentTag {
    /// Classify a raw sentiment value at the ±0.05 thresholds.
    pub fn from_value(value: f64) -> Self {
        if value > 0.05 {
            SentimentTag::Positive
        } else if value < -0.05 {
            SentimentTag::Negative
        } else {
            SentimentTag::Neutral
        }
    }
}

/// A single headline with its crude sentiment value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub source: String,
    pub published: DateTime<Utc>,
    pub sentiment: f64,
}

impl NewsItem {
    pub fn tag(&self) -> SentimentTag {
        SentimentTag::from_value(self.sentiment)
    }

    /// Humanized age of the headline relative to `now` ("3h ago" style)
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(self.published);
        if elapsed.num_days() > 0 {
            format!("{}d ago", elapsed.num_days())
        } else if elapsed.num_hours() > 0 {
            format!("{}h ago", elapsed.num_hours())
        } else {
            format!("{}m ago", elapsed.num_minutes().max(0))
        }
    }
}

/// Importance of an economic calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    /// Parse the feed's free-form impact field, defaulting to Low.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "high" => Impact::High,
            "medium" | "moderate" => Impact::Medium,
            _ => Impact::Low,
        }
    }
}

/// One scheduled economic release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub date: NaiveDate,
    pub country: String,
    pub event: String,
    pub impact: Impact,
}
