use playaudio::application::{CallInitiator, CallbackDispatcher};
use playaudio::config::Config;
use playaudio::domain::call::CallAutomationProvider;
use playaudio::infrastructure::acs::AcsCallAutomationClient;
use playaudio::interface::api::{build_router, init_metrics, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting PlayAudio call service");

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded: {:?}", config);

    // Provider client
    let client = AcsCallAutomationClient::from_config(&config.provider)?;
    info!("Call automation endpoint: {}", client.endpoint());
    let provider: Arc<dyn CallAutomationProvider> = Arc::new(client);

    let initiator = Arc::new(CallInitiator::new(provider.clone(), &config.provider));
    let dispatcher = Arc::new(CallbackDispatcher::new(provider, &config.provider));
    info!("Provider callbacks will be posted to {}", initiator.callback_url());

    // Initialize metrics exporter
    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = init_metrics()?;

    let state = AppState {
        initiator,
        dispatcher,
    };
    let app = build_router(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("REST API server listening on {}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
