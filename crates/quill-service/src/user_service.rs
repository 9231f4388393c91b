//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use async_trait::async_trait;
use quill_core::{Interface, QuillResult, User, UserId, UserWithArticles};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Lists all users.
    async fn list_users(&self) -> QuillResult<Vec<User>>;

    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> QuillResult<User>;

    /// Gets a user by ID.
    async fn get_user_by_id(&self, id: UserId) -> QuillResult<User>;

    /// Gets a user together with their articles.
    async fn get_user_with_articles(&self, id: UserId) -> QuillResult<UserWithArticles>;

    /// Updates the supplied fields of a user.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> QuillResult<User>;

    /// Deletes a user, returning the row as it was before deletion.
    async fn delete_user(&self, id: UserId) -> QuillResult<User>;
}
