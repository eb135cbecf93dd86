use anyhow::Context;
use clap::Parser;
use countrysrv::{
    api::{router, AppState},
    cli::Args,
    config::Config,
    logging::init_logging,
    services::source::RestCountriesClient,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    let config = Config::from_env()
        .and_then(|config| config.apply_args(&args))
        .context("Failed to load configuration")?;
    let config = Arc::new(config);

    let source = RestCountriesClient::new(&config.api_base_url, config.request_timeout())
        .context("Failed to create REST Countries client")?;
    info!(
        "Using REST Countries API at {} (timeout {:?})",
        source.base_url(),
        config.request_timeout()
    );

    let app_state = AppState::new(config.clone(), Arc::new(source));
    app_state.mount().await;

    let app = router(app_state.clone());

    let listener = TcpListener::bind(&format!("0.0.0.0:{}", config.server_port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.server_port))?;

    info!("Server listening on http://0.0.0.0:{}", config.server_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    app_state.list_session.unmount().await;
    app_state.map_session.unmount().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}
