//! Quantalk API Server
//!
//! Serves market quotes, ticker analyses, news sentiment, the economic
//! calendar and the assistant chat over HTTP. Stateless apart from its
//! in-memory response caches, so it can be horizontally scaled.

use dotenvy::dotenv;
use quantalk::config::{get_environment, Config};
use quantalk::core::http::start_server;
use quantalk::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    // Initialize logging based on environment
    logging::init_logging();

    let config = Config::from_env();
    let env = get_environment();
    info!("Starting Quantalk API Server");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    // Graceful shutdown
    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
