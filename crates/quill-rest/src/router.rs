//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use quill_config::ServerConfig;
use quill_repository::StorageHandle;
use quill_service::UserService;
use shaku::{HasComponent, Module};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router from a Shaku module.
pub fn create_router<M>(module: &M, server_config: &ServerConfig) -> Router
where
    M: Module + HasComponent<dyn UserService> + HasComponent<dyn StorageHandle>,
{
    create_router_with_state(AppState::from_module(module), server_config)
}

/// Creates the main application router around an existing state.
pub fn create_router_with_state(state: AppState, server_config: &ServerConfig) -> Router {
    let router = Router::new()
        .merge(health_controller::router())
        .nest("/users", user_controller::router())
        .route("/", get(root))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    concat!("Quill API v", env!("CARGO_PKG_VERSION"))
}
