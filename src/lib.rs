//! Quantalk - market dashboard backend
//!
//! Fetches quotes, historical price series and news sentiment for
//! equities/indices, computes technical indicators and an attractiveness
//! score, and serves the result over a JSON API alongside a conversational
//! assistant gateway.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod scoring;
pub mod services;
