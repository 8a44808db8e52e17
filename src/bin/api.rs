use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use verifica::{
    app_state::AppState,
    classifier,
    config::{Config, LogFormat},
    factcheck::{FactCheckClient, FactCheckSearch},
    routes,
    verification::Verifier,
};

const DEFAULT_LOG_FILTER: &str = "verifica=info,tower_http=info";

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format());

    let classifier = classifier::from_config(&config)?;
    if !classifier.is_configured() {
        warn!("TOXICITY_CLASSIFIER_URL not set; analyses will use neutral scores");
    }

    let fact_checks = FactCheckClient::from_config(&config)?;
    if !fact_checks.is_configured() {
        warn!("GOOGLE_API_KEY or FACT_CHECK_BASE_URL not set; verifications will fail");
    }

    let verifier = Verifier::new(
        classifier,
        Arc::new(fact_checks),
        config.fact_check_language(),
    );
    let app = routes::router(AppState::new(verifier), Some(config.static_dir()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "verifica listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
