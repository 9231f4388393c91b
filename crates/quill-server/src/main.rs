//! # Quill Server
//!
//! Main entry point: loads configuration, opens the database, wires the
//! Shaku module and serves the REST API until Ctrl+C or SIGTERM.

use quill_config::{AppConfig, ConfigLoader, LoggingConfig};
use quill_core::{QuillError, QuillResult};
use quill_rest::create_router;
use quill_server::di::build_app_module;
use quill_server::startup::{print_banner, print_startup_info};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            init_logging(&LoggingConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    print_banner();
    info!("Starting Quill Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> QuillResult<()> {
    info!("Environment: {}", config.app.environment);

    let module = build_app_module(&config).await?;
    let storage = module.storage();

    let router = create_router(module.as_ref(), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| QuillError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config);
    info!("Starting REST server on http://{}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| QuillError::Internal(format!("REST server error: {}", e)));

    storage.close().await;
    served?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
