//! Server startup utilities.

use quill_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
   ____        _ _ _
  / __ \__  __(_) | |
 / / / / / / / / | |
/ /_/ / /_/ / / / /_
\___\_\__,_/_/_/\__/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}/users", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("Database:  {}", config.database.url);
    if config.audit.enabled {
        info!("Audit log: {}", config.audit.path.display());
    }
    info!("{}", separator);
}
