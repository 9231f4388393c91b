//! User entity.

use super::Article;
use serde::{Deserialize, Serialize};

/// Storage-generated user identifier.
pub type UserId = i64;

/// A user row as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Identifier assigned by storage on insert; never changes afterwards.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

/// Fields required to insert a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Partial update of a user.
///
/// Only fields that are `Some` are written. Blank strings never make it into a
/// patch; see [`UserPatch::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    /// Builds a patch, dropping fields that are missing or blank.
    #[must_use]
    pub fn new(name: Option<String>, email: Option<String>) -> Self {
        Self {
            name: name.filter(|v| !v.trim().is_empty()),
            email: email.filter(|v| !v.trim().is_empty()),
        }
    }

    /// Returns `true` when the patch would not modify any column.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Applies the patch to a user value in memory.
    #[must_use]
    pub fn apply_to(&self, mut user: User) -> User {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            user.email.clone_from(email);
        }
        user
    }
}

/// A user together with every article referencing it.
///
/// Built on demand for the joined read; never persisted. Serializes flat, so
/// the JSON is the user object with an extra `articles` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserWithArticles {
    #[serde(flatten)]
    pub user: User,
    /// Articles ordered by id; empty when the user has none.
    pub articles: Vec<Article>,
}

impl UserWithArticles {
    #[must_use]
    pub fn new(user: User, articles: Vec<Article>) -> Self {
        Self { user, articles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn test_patch_drops_blank_fields() {
        let patch = UserPatch::new(Some("  ".to_string()), Some(String::new()));
        assert!(patch.is_empty());

        let patch = UserPatch::new(None, Some("alice@x.com".to_string()));
        assert!(!patch.is_empty());
        assert_eq!(patch.name, None);
    }

    #[test]
    fn test_patch_only_touches_supplied_fields() {
        let patch = UserPatch::new(None, Some("alice@x.com".to_string()));
        let updated = patch.apply_to(alice());
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.email, "alice@x.com");
    }

    #[test]
    fn test_user_with_articles_serializes_flat() {
        let article = Article {
            id: 3,
            user_id: 1,
            title: "Hello".to_string(),
            content: "World".to_string(),
        };
        let value = serde_json::to_value(UserWithArticles::new(alice(), vec![article])).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["articles"][0]["title"], "Hello");
        assert_eq!(value["articles"][0]["user_id"], 1);
    }

    #[test]
    fn test_user_without_articles_has_empty_array() {
        let value = serde_json::to_value(UserWithArticles::new(alice(), Vec::new())).unwrap();
        assert_eq!(value["articles"], serde_json::json!([]));
    }
}
