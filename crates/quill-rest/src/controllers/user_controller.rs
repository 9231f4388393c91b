//! User management controller.

use crate::{
    extractors::AppJson,
    responses::{created, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use quill_core::{ErrorResponse, QuillError, User, UserId};
use quill_service::{
    CreateUserRequest, UpdateUserRequest, UserArticlesResponse, UserMessageResponse,
};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .route("/:id/articles", get(get_user_with_articles))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    debug!("List users request");

    let users = state.user_service.list_users().await?;
    ok(users)
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserMessageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserMessageResponse>), AppError> {
    debug!("Create user request: {}", request.email);

    let user = state.user_service.create_user(request).await?;
    Ok(created(UserMessageResponse::new("User created", user)))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserMessageResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserMessageResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state.user_service.get_user_by_id(user_id).await?;
    ok(UserMessageResponse::new("User found", user))
}

/// Get a user together with their articles.
#[utoipa::path(
    get,
    path = "/users/{id}/articles",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User and articles found", body = UserArticlesResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user_with_articles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserArticlesResponse> {
    debug!("Get user with articles request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state.user_service.get_user_with_articles(user_id).await?;
    ok(UserArticlesResponse::new("User and articles found", user))
}

/// Update the supplied fields of a user. Served for both PUT and PATCH.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserMessageResponse),
        (status = 400, description = "No fields to update or invalid field", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> ApiResult<UserMessageResponse> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state.user_service.update_user(user_id, request).await?;
    ok(UserMessageResponse::new("User updated", user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = UserMessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserMessageResponse> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state.user_service.delete_user(user_id).await?;
    ok(UserMessageResponse::new("User deleted", user))
}

/// Helper to parse user ID from a path segment.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    id.parse::<UserId>()
        .map_err(|_| AppError(QuillError::validation(format!("Invalid user ID: {}", id))))
}
