//! OpenAPI documentation configuration.

use crate::controllers::{DependencyStatus, HealthResponse, ReadinessResponse};
use quill_core::{Article, ErrorResponse, User, UserWithArticles};
use quill_service::{
    CreateUserRequest, UpdateUserRequest, UserArticlesResponse, UserMessageResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Quill API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill API",
        description = "User management over SQLite",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::get_user_with_articles,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            User,
            Article,
            UserWithArticles,
            ErrorResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserMessageResponse,
            UserArticlesResponse,
            HealthResponse,
            ReadinessResponse,
            DependencyStatus,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
