//! Serve command - run the HTTP server

use anyhow::{Context, Result};
use news_relay::{AppConfig, AppState, Credentials, router};
use news_relay_adapters::llm::OpenAiSummarizer;
use news_relay_adapters::news::NewsApiClient;
use news_relay_adapters::x::XPublisher;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::args::ServeArgs;

pub async fn execute(args: ServeArgs, config_path: Option<PathBuf>) -> Result<()> {
    // A .env file wins over inherited variables
    match dotenvy::dotenv_override() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => return Err(e).context("Failed to read .env file"),
    }

    let config = AppConfig::load(config_path.as_deref())?;
    let credentials = Credentials::from_env().context("Missing credentials")?;
    credentials.log_masked();

    let news = Arc::new(NewsApiClient::with_base_url(
        credentials.news_api_key,
        config.news.base_url.clone(),
        Duration::from_secs(config.news.timeout_secs),
    ));

    if config.news.verify_key_on_startup {
        match news.verify_key().await {
            Ok(()) => tracing::info!("NewsAPI key verified"),
            Err(e) => tracing::warn!(error = %e, "NewsAPI key check failed"),
        }
    }

    let summarizer = Arc::new(OpenAiSummarizer::with_base_url(
        credentials.openai_api_key,
        config.llm.base_url.clone(),
        config.llm.adapter_config(),
    ));

    let publisher = Arc::new(
        XPublisher::with_base_url(credentials.twitter, config.x.base_url.clone())
            .with_rate_limit_wait(
                config.x.wait_on_rate_limit,
                Duration::from_secs(config.x.rate_limit_max_wait_secs),
            ),
    );

    let state = AppState::new(news, summarizer, publisher);
    let app = router(state);

    let bind = args.bind.unwrap_or(config.server.bind);
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        model = %config.llm.model,
        "news-relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Keep serving; the process can still be stopped externally
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
