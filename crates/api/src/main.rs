use anyhow::Context;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use coffeeshop_api::app::{build_app, build_services};
use coffeeshop_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    coffeeshop_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let services = build_services(&config).await?;
    info!(backend = services.backend.as_str(), "menu services ready");

    let app = build_app(services);

    let address = config.listen_addr();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!("failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!("failed to install terminate handler: {e}");
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
}
