//! External collaborators: market data, news, assistant, and the
//! response cache in front of them.

pub mod assistant;
pub mod cache;
pub mod error;
pub mod market_data;
pub mod news;
pub mod yahoo;

pub use assistant::{AssistantGateway, ChatCompletionGateway};
pub use cache::TtlCache;
pub use error::ProviderError;
pub use market_data::MarketDataProvider;
pub use news::{headline_sentiment, FinnhubClient, NewsProvider};
pub use yahoo::YahooProvider;
