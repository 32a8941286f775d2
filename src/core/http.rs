//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::Config;
use crate::indicators::{compute_indicators, interpret_kind, IndicatorKind};
use crate::metrics::Metrics;
use crate::models::{
    EconomicEvent, IndicatorSet, NewsItem, Quote, Score, StockDetail,
};
use crate::scoring::{compute_score, fired_rules};
use crate::services::{
    AssistantGateway, ChatCompletionGateway, FinnhubClient, MarketDataProvider, NewsProvider,
    ProviderError, TtlCache, YahooProvider,
};

/// Daily bars fetched for a ticker analysis; enough history for the
/// 200-bar moving average when the listing is old enough.
pub const ANALYSIS_LOOKBACK_DAYS: u32 = 365;

const NEWS_DEFAULT_LIMIT: usize = 8;
const SPARKLINE_BARS: usize = 60;
const COMPANY_NEWS_DAYS: u32 = 7;
const ASSISTANT_UNAVAILABLE: &str =
    "The assistant is temporarily unavailable. Please try again shortly.";

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub market_data: Arc<dyn MarketDataProvider>,
    pub news: Arc<dyn NewsProvider>,
    pub assistant: Arc<dyn AssistantGateway>,
    pub watchlist: Arc<Vec<String>>,
    pub quote_cache: Arc<TtlCache<String, Quote>>,
    pub detail_cache: Arc<TtlCache<String, StockDetail>>,
    pub news_cache: Arc<TtlCache<String, Vec<NewsItem>>>,
    pub calendar_cache: Arc<TtlCache<String, Vec<EconomicEvent>>>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

impl AppState {
    /// Wire up state from configuration with the concrete providers
    pub fn from_config(config: &Config, metrics: Arc<Metrics>) -> Self {
        Self::with_providers(
            config,
            metrics,
            Arc::new(YahooProvider::new(config.market_data_base_url.clone())),
            Arc::new(FinnhubClient::new(
                config.news_base_url.clone(),
                config.news_api_key.clone(),
            )),
            Arc::new(ChatCompletionGateway::new(
                config.assistant_base_url.clone(),
                config.assistant_api_key.clone(),
                config.assistant_model.clone(),
            )),
        )
    }

    /// Wire up state with caller-supplied providers (used by tests)
    pub fn with_providers(
        config: &Config,
        metrics: Arc<Metrics>,
        market_data: Arc<dyn MarketDataProvider>,
        news: Arc<dyn NewsProvider>,
        assistant: Arc<dyn AssistantGateway>,
    ) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            market_data,
            news,
            assistant,
            watchlist: Arc::new(config.watchlist.clone()),
            quote_cache: Arc::new(TtlCache::new(config.quote_ttl)),
            detail_cache: Arc::new(TtlCache::new(config.detail_ttl)),
            news_cache: Arc::new(TtlCache::new(config.news_ttl)),
            calendar_cache: Arc::new(TtlCache::new(config.calendar_ttl)),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "quantalk-api"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

fn provider_status(e: &ProviderError) -> StatusCode {
    match e {
        ProviderError::NotFound => StatusCode::NOT_FOUND,
        ProviderError::Transport(_) | ProviderError::Malformed(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Latest quote for an index or ticker, cached for the quote TTL
async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Quote>, StatusCode> {
    let symbol = symbol.to_uppercase();
    if let Some(quote) = state.quote_cache.get(&symbol).await {
        return Ok(Json(quote));
    }

    state.metrics.provider_requests_total.inc();
    let quote = state.market_data.fetch_quote(&symbol).await.map_err(|e| {
        state.metrics.provider_failures_total.inc();
        error!(symbol = %symbol, error = %e, "quote fetch failed");
        provider_status(&e)
    })?;

    state.quote_cache.insert(symbol, quote.clone()).await;
    Ok(Json(quote))
}

async fn cached_detail(state: &AppState, ticker: &str) -> Result<StockDetail, ProviderError> {
    let key = ticker.to_string();
    if let Some(detail) = state.detail_cache.get(&key).await {
        return Ok(detail);
    }

    state.metrics.provider_requests_total.inc();
    let detail = state
        .market_data
        .fetch_detail(ticker)
        .await
        .inspect_err(|_| state.metrics.provider_failures_total.inc())?;
    state.detail_cache.insert(key, detail.clone()).await;
    Ok(detail)
}

/// Six-month history plus snapshot info for the detail page
async fn get_stock(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<StockDetail>, StatusCode> {
    let ticker = ticker.to_uppercase();
    cached_detail(&state, &ticker)
        .await
        .map(Json)
        .map_err(|e| {
            error!(ticker = %ticker, error = %e, "detail fetch failed");
            provider_status(&e)
        })
}

/// Trailing closes for the overview sparkline, cheap enough to serve from
/// the cached detail history
async fn get_sparkline(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let symbol = symbol.to_uppercase();
    let detail = cached_detail(&state, &symbol).await.map_err(|e| {
        error!(symbol = %symbol, error = %e, "sparkline fetch failed");
        provider_status(&e)
    })?;

    let closes = detail.history.tail(SPARKLINE_BARS).closes();
    Ok(Json(json!({ "symbol": symbol, "closes": closes })))
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    indicators: Option<IndicatorSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interpretations: Option<Value>,
    score: Score,
    reasons: Vec<&'static str>,
}

impl AnalysisResponse {
    /// Placeholder analysis when the series or engine is unavailable.
    /// The fallback score keeps its source tag so the UI can tell it apart
    /// from a computed neutral result.
    fn unavailable(ticker: String) -> Self {
        Self {
            ticker,
            indicators: None,
            interpretations: None,
            score: Score::fallback(),
            reasons: Vec::new(),
        }
    }
}

fn interpretations_json(ind: &IndicatorSet) -> Value {
    let mut map = serde_json::Map::new();
    if let Some(rsi) = ind.rsi {
        map.insert(
            "RSI".to_string(),
            json!(interpret_kind(IndicatorKind::Rsi, rsi)),
        );
    }
    map.insert(
        "MACD_hist".to_string(),
        json!(interpret_kind(IndicatorKind::MacdHist, ind.macd_hist)),
    );
    if let Some(pos) = ind.bb_position {
        map.insert(
            "BB_Position".to_string(),
            json!(interpret_kind(IndicatorKind::BbPosition, pos)),
        );
    }
    map.insert(
        "GoldenCross".to_string(),
        json!(interpret_kind(
            IndicatorKind::GoldenCross,
            if ind.golden_cross { 1.0 } else { 0.0 }
        )),
    );
    Value::Object(map)
}

/// Full ticker analysis: series -> indicators -> interpretations -> score.
///
/// A missing series or an engine failure degrades to a placeholder response
/// with the fallback score; only transport-level failures surface as 502.
async fn get_analysis(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<AnalysisResponse>, StatusCode> {
    let ticker = ticker.to_uppercase();

    state.metrics.provider_requests_total.inc();
    let series = match state
        .market_data
        .fetch_series(&ticker, ANALYSIS_LOOKBACK_DAYS)
        .await
    {
        Ok(series) => series,
        Err(ProviderError::NotFound) => {
            info!(ticker = %ticker, "no price data, serving placeholder analysis");
            return Ok(Json(AnalysisResponse::unavailable(ticker)));
        }
        Err(e) => {
            state.metrics.provider_failures_total.inc();
            error!(ticker = %ticker, error = %e, "series fetch failed");
            return Err(provider_status(&e));
        }
    };

    let response = match compute_indicators(&series) {
        Ok(indicators) => {
            let score = compute_score(&indicators);
            let reasons = fired_rules(&indicators);
            state.metrics.analyses_total.inc();
            AnalysisResponse {
                ticker,
                interpretations: Some(interpretations_json(&indicators)),
                indicators: Some(indicators),
                score,
                reasons,
            }
        }
        Err(e) => {
            warn!(ticker = %ticker, error = %e, "indicator engine unavailable");
            AnalysisResponse::unavailable(ticker)
        }
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct NewsQuery {
    ticker: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct NewsEntry {
    headline: String,
    source: String,
    time_ago: String,
    sentiment: f64,
    tag: crate::models::SentimentTag,
}

/// Headlines with sentiment tags, market-wide or per ticker
async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<NewsQuery>,
) -> Result<Json<Vec<NewsEntry>>, StatusCode> {
    let limit = params.limit.unwrap_or(NEWS_DEFAULT_LIMIT);
    let ticker = params.ticker.map(|t| t.to_uppercase());
    let cache_key = ticker.clone().unwrap_or_else(|| "__market__".to_string());

    let items = match state.news_cache.get(&cache_key).await {
        Some(items) => items,
        None => {
            state.metrics.provider_requests_total.inc();
            let fetched = match &ticker {
                Some(t) => state.news.company_news(t, COMPANY_NEWS_DAYS, limit).await,
                None => state.news.market_news(limit).await,
            };
            match fetched {
                Ok(items) => {
                    state.news_cache.insert(cache_key, items.clone()).await;
                    items
                }
                Err(ProviderError::NotFound) => Vec::new(),
                Err(e) => {
                    state.metrics.provider_failures_total.inc();
                    error!(error = %e, "news fetch failed");
                    return Err(provider_status(&e));
                }
            }
        }
    };

    let now = Utc::now();
    let entries = items
        .iter()
        .map(|item| NewsEntry {
            headline: item.headline.clone(),
            source: item.source.clone(),
            time_ago: item.time_ago(now),
            sentiment: item.sentiment,
            tag: item.tag(),
        })
        .collect();

    Ok(Json(entries))
}

/// Economic releases from the Monday of the current week through two weeks
async fn get_calendar(
    State(state): State<AppState>,
) -> Result<Json<Vec<EconomicEvent>>, StatusCode> {
    let key = "calendar".to_string();
    if let Some(events) = state.calendar_cache.get(&key).await {
        return Ok(Json(events));
    }

    let today = Utc::now().date_naive();
    let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let end = start + Duration::days(13);

    state.metrics.provider_requests_total.inc();
    let events = state
        .news
        .economic_calendar(start, end)
        .await
        .map_err(|e| {
            state.metrics.provider_failures_total.inc();
            error!(error = %e, "calendar fetch failed");
            provider_status(&e)
        })?;

    state.calendar_cache.insert(key, events.clone()).await;
    Ok(Json(events))
}

#[derive(Debug, Serialize)]
struct OverviewEntry {
    ticker: String,
    change_pct: f64,
    market_cap: f64,
}

/// Watchlist movers plus advancing/declining counts for the overview card
async fn market_overview(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let mut entries = Vec::new();
    for ticker in state.watchlist.iter() {
        match cached_detail(&state, ticker).await {
            Ok(detail) => {
                // No cap in the chart payload; approximate from price so the
                // treemap still has a size to work with
                let market_cap = if detail.info.market_cap > 0.0 {
                    detail.info.market_cap
                } else {
                    detail.info.price * 1e6
                };
                entries.push(OverviewEntry {
                    ticker: ticker.clone(),
                    change_pct: detail.info.change_pct,
                    market_cap,
                });
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "skipping watchlist entry");
            }
        }
    }

    let advancing = entries.iter().filter(|e| e.change_pct > 0.0).count();
    let declining = entries.iter().filter(|e| e.change_pct < 0.0).count();

    Ok(Json(json!({
        "items": entries,
        "advancing": advancing,
        "declining": declining,
    })))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    ticker: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    reply: String,
    degraded: bool,
}

/// Assistant chat. A gateway failure degrades to a canned reply instead of
/// failing the page; `degraded` tells the UI which one it got.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let prompt = match &request.ticker {
        Some(ticker) => format!("Ticker: {}\n{}", ticker.to_uppercase(), request.message),
        None => request.message.clone(),
    };

    match state.assistant.reply(&prompt).await {
        Ok(reply) => Ok(Json(ChatResponse {
            reply,
            degraded: false,
        })),
        Err(e) => {
            error!(error = %e, "assistant gateway failed");
            Ok(Json(ChatResponse {
                reply: ASSISTANT_UNAVAILABLE.to_string(),
                degraded: true,
            }))
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/quotes/{symbol}", get(get_quote))
        .route("/api/stocks/{ticker}", get(get_stock))
        .route("/api/stocks/{ticker}/sparkline", get(get_sparkline))
        .route("/api/stocks/{ticker}/analysis", get(get_analysis))
        .route("/api/news", get(get_news))
        .route("/api/calendar", get(get_calendar))
        .route("/api/market/overview", get(market_overview))
        .route("/api/chat", post(chat))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let state = AppState::from_config(&config, metrics);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
