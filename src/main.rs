use anyhow::{Context, Result};
use language_switcher::config::Config;
use language_switcher::i18n::{SwitcherMetrics, TranslationValidator};
use language_switcher::server::{self, AppState};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_switcher=info".parse()?),
        )
        .init();

    info!("Starting admin language switcher");

    let config = Config::from_env()?;
    info!(
        "Languages: {} (default {})",
        config.supported_languages.join(", "),
        config.default_language
    );

    let state = AppState::from_config(config)?;

    let report = TranslationValidator::validate(&state.i18n);
    for problem in &report.errors {
        error!("Language configuration: {}", problem);
    }
    for problem in &report.warnings {
        warn!("Language configuration: {}", problem);
    }

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("{}", SwitcherMetrics::global().report().format_summary());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, run until killed
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
