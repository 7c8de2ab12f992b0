use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use clinrep_server::build_router;
use clinrep_server::config::ServerConfig;
use clinrep_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config);

    // Surface a broken template at startup rather than on the first request.
    match state.templates.load().await {
        Ok(template) => tracing::info!(
            path = %state.templates.report_path().display(),
            placeholders = template.placeholders().len(),
            "report template ready"
        ),
        Err(e) => tracing::warn!(error = %e, "report template not loadable at startup"),
    }

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        public_url = %config.public_url,
        "clinrep-server listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("clinrep-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
