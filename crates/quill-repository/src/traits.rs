//! Repository trait definitions.

use async_trait::async_trait;
use quill_core::{Interface, NewUser, QuillResult, User, UserId, UserPatch, UserWithArticles};

/// User repository trait.
///
/// The only writer of the `users` table. Absent rows are reported as `None`;
/// deciding whether that is an error is left to the caller.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Inserts a user and returns the stored row, including its new id.
    async fn create(&self, user: &NewUser) -> QuillResult<User>;

    /// Returns every user in storage order.
    async fn list(&self) -> QuillResult<Vec<User>>;

    /// Finds a user by ID.
    async fn get_by_id(&self, id: UserId) -> QuillResult<Option<User>>;

    /// Finds a user and attaches its articles.
    async fn get_user_with_articles(&self, id: UserId) -> QuillResult<Option<UserWithArticles>>;

    /// Writes the supplied fields and returns the updated row.
    ///
    /// Fails with `QuillError::NoRowsAffected` when `id` matches nothing.
    async fn update(&self, id: UserId, patch: &UserPatch) -> QuillResult<User>;

    /// Deletes a user and returns the row as it was before deletion.
    async fn delete(&self, id: UserId) -> QuillResult<Option<User>>;
}
