//! User service implementation.

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::user_service::UserService;
use async_trait::async_trait;
use quill_core::{NewUser, QuillError, QuillResult, User, UserId, UserWithArticles, ValidateExt};
use quill_repository::UserRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// User service backed by a [`UserRepository`].
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    async fn require_user(&self, id: UserId) -> QuillResult<User> {
        self.user_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::not_found("User", id))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self) -> QuillResult<Vec<User>> {
        debug!("Listing users");
        self.user_repository.list().await
    }

    async fn create_user(&self, request: CreateUserRequest) -> QuillResult<User> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;

        let user = self
            .user_repository
            .create(&NewUser::new(request.name, request.email))
            .await?;

        info!("User created: {}", user.id);
        Ok(user)
    }

    async fn get_user_by_id(&self, id: UserId) -> QuillResult<User> {
        debug!("Getting user: {}", id);
        self.require_user(id).await
    }

    async fn get_user_with_articles(&self, id: UserId) -> QuillResult<UserWithArticles> {
        debug!("Getting user with articles: {}", id);

        self.user_repository
            .get_user_with_articles(id)
            .await?
            .ok_or_else(|| QuillError::not_found("User", id))
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> QuillResult<User> {
        debug!("Updating user: {}", id);

        let request = request.normalized();
        if request.name.is_none() && request.email.is_none() {
            return Err(QuillError::validation("No fields to update"));
        }
        request.validate_request()?;

        self.require_user(id).await?;

        let user = self
            .user_repository
            .update(id, &request.into_patch())
            .await?;

        info!("User updated: {}", id);
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> QuillResult<User> {
        debug!("Deleting user: {}", id);

        let user = self
            .user_repository
            .delete(id)
            .await?
            .ok_or_else(|| QuillError::not_found("User", id))?;

        info!("User deleted: {}", id);
        Ok(user)
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
