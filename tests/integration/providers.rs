//! Integration tests for the concrete provider clients
//!
//! Each client runs against a wiremock upstream so the error taxonomy can
//! be pinned down: NotFound vs Transport vs Malformed.

use quantalk::services::{
    AssistantGateway, ChatCompletionGateway, FinnhubClient, MarketDataProvider, NewsProvider,
    ProviderError, YahooProvider,
};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chart_body(timestamps: &[i64], closes: &[Option<f64>]) -> serde_json::Value {
    let opens: Vec<_> = closes.iter().map(|c| c.map(|v| v - 0.5)).collect();
    let highs: Vec<_> = closes.iter().map(|c| c.map(|v| v + 1.0)).collect();
    let lows: Vec<_> = closes.iter().map(|c| c.map(|v| v - 1.0)).collect();
    let volumes: Vec<_> = closes.iter().map(|c| c.map(|_| 1000u64)).collect();
    json!({
        "chart": {
            "result": [{
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": opens,
                        "high": highs,
                        "low": lows,
                        "close": closes,
                        "volume": volumes,
                    }]
                }
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn yahoo_parses_a_chart_into_a_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
            &[1700000000, 1700086400, 1700172800],
            &[Some(100.0), Some(101.5), Some(99.0)],
        )))
        .mount(&server)
        .await;

    let provider = YahooProvider::new(server.uri());
    let series = provider.fetch_series("AAPL", 60).await.unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.last_close(), Some(99.0));
}

#[tokio::test]
async fn yahoo_skips_sessions_with_null_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
            &[1700000000, 1700086400, 1700172800],
            &[Some(100.0), None, Some(99.0)],
        )))
        .mount(&server)
        .await;

    let provider = YahooProvider::new(server.uri());
    let series = provider.fetch_series("AAPL", 60).await.unwrap();
    assert_eq!(series.len(), 2);
}

#[tokio::test]
async fn yahoo_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v8/finance/chart/.*"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = YahooProvider::new(server.uri());
    let err = provider.fetch_series("NOPE", 60).await.unwrap_err();
    assert!(matches!(err, ProviderError::NotFound));
}

#[tokio::test]
async fn yahoo_maps_empty_result_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v8/finance/chart/.*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "chart": { "result": null, "error": null } })),
        )
        .mount(&server)
        .await;

    let provider = YahooProvider::new(server.uri());
    let err = provider.fetch_series("NOPE", 60).await.unwrap_err();
    assert!(matches!(err, ProviderError::NotFound));
}

#[tokio::test]
async fn yahoo_maps_garbage_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v8/finance/chart/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = YahooProvider::new(server.uri());
    let err = provider.fetch_series("AAPL", 60).await.unwrap_err();
    assert!(matches!(err, ProviderError::Malformed(_)));
}

#[tokio::test]
async fn yahoo_quote_rounds_price_and_change() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/SPX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
            &[1700000000, 1700086400],
            &[Some(100.0), Some(102.3456)],
        )))
        .mount(&server)
        .await;

    let provider = YahooProvider::new(server.uri());
    let quote = provider.fetch_quote("SPX").await.unwrap();
    assert_eq!(quote.price, 102.35);
    assert_eq!(quote.change_pct, 2.35);
}

#[tokio::test]
async fn finnhub_tags_headlines_with_crude_sentiment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "headline": "Positive earnings surprise", "source": "wire", "datetime": 1700000000 },
            { "headline": "Negative guidance from retailer", "source": "wire", "datetime": 1700003600 },
            { "headline": "Fed holds rates", "source": "wire", "datetime": 1700007200 },
        ])))
        .mount(&server)
        .await;

    let client = FinnhubClient::new(server.uri(), "test-key");
    let items = client.market_news(10).await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].sentiment, 0.1);
    assert_eq!(items[1].sentiment, -0.1);
    assert_eq!(items[2].sentiment, 0.0);
}

#[tokio::test]
async fn finnhub_news_respects_the_limit() {
    let server = MockServer::start().await;
    let articles: Vec<_> = (0..20)
        .map(|i| json!({ "headline": format!("item {i}"), "source": "wire", "datetime": 1700000000 + i }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(articles))
        .mount(&server)
        .await;

    let client = FinnhubClient::new(server.uri(), "test-key");
    let items = client.company_news("AAPL", 7, 8).await.unwrap();
    assert_eq!(items.len(), 8);
}

#[tokio::test]
async fn finnhub_calendar_sorts_and_parses_impacts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendar/economic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "economicCalendar": [
                { "date": "2024-06-05 08:30:00", "country": "US", "event": "NFP", "impact": "high" },
                { "date": "2024-06-03 10:00:00", "country": "EU", "event": "PMI", "impact": "moderate" },
                { "date": "2024-06-04 09:00:00", "country": "JP", "event": "GDP", "impact": "" },
            ]
        })))
        .mount(&server)
        .await;

    let client = FinnhubClient::new(server.uri(), "test-key");
    let from = "2024-06-03".parse().unwrap();
    let to = "2024-06-16".parse().unwrap();
    let events = client.economic_calendar(from, to).await.unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].event, "PMI");
    assert_eq!(events[1].event, "GDP");
    assert_eq!(events[2].event, "NFP");
    assert_eq!(events[0].impact, quantalk::models::Impact::Medium);
    assert_eq!(events[1].impact, quantalk::models::Impact::Low);
    assert_eq!(events[2].impact, quantalk::models::Impact::High);
}

#[tokio::test]
async fn assistant_returns_the_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "content": "The index closed higher." } } ]
        })))
        .mount(&server)
        .await;

    let gateway = ChatCompletionGateway::new(server.uri(), "key", "test-model");
    let reply = gateway.reply("how did the market do?").await.unwrap();
    assert_eq!(reply, "The index closed higher.");
}

#[tokio::test]
async fn assistant_maps_empty_choices_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let gateway = ChatCompletionGateway::new(server.uri(), "key", "test-model");
    let err = gateway.reply("hello").await.unwrap_err();
    assert!(matches!(err, ProviderError::Malformed(_)));
}
