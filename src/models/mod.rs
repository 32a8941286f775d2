//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod news;
pub mod price;
pub mod score;

pub use indicators::IndicatorSet;
pub use news::{EconomicEvent, Impact, NewsItem, SentimentTag};
pub use price::{PriceBar, PriceSeries, Quote, StockDetail, StockInfo};
pub use score::{Recommendation, Score, ScoreSource};
