//! Article entity.

use super::UserId;
use serde::{Deserialize, Serialize};

/// An article owned by a user. Read-only from this service's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Article {
    pub id: i64,
    /// Owning user (`articles.user_id`).
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}
