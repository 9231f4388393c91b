//! User-related DTOs.

use quill_core::rules::not_blank;
use quill_core::{User, UserPatch, UserWithArticles};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 100, message = "Name cannot exceed 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

impl CreateUserRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request to update a user. Absent and blank fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(max = 100, message = "Name cannot exceed 100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Drops blank fields, mirroring how [`UserPatch::new`] treats them.
    #[must_use]
    pub fn normalized(self) -> Self {
        let patch = UserPatch::new(self.name, self.email);
        Self {
            name: patch.name,
            email: patch.email,
        }
    }

    /// Converts the request into a storage patch.
    #[must_use]
    pub fn into_patch(self) -> UserPatch {
        UserPatch::new(self.name, self.email)
    }
}

/// `{message, user}` envelope for single-user responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserMessageResponse {
    pub message: String,
    pub user: User,
}

impl UserMessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>, user: User) -> Self {
        Self {
            message: message.into(),
            user,
        }
    }
}

/// `{message, user}` envelope for the joined user/articles read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserArticlesResponse {
    pub message: String,
    pub user: UserWithArticles,
}

impl UserArticlesResponse {
    #[must_use]
    pub fn new(message: impl Into<String>, user: UserWithArticles) -> Self {
        Self {
            message: message.into(),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::ValidateExt;

    #[test]
    fn test_create_request_validation() {
        assert!(CreateUserRequest::new("Alice", "a@x.com").validate_request().is_ok());
        assert!(CreateUserRequest::new("   ", "a@x.com").validate_request().is_err());
        assert!(CreateUserRequest::new("Alice", "not-an-email").validate_request().is_err());
        assert!(CreateUserRequest::new("a".repeat(101), "a@x.com").validate_request().is_err());
    }

    #[test]
    fn test_create_request_missing_fields_fail_validation() {
        let request: CreateUserRequest = serde_json::from_str("{}").unwrap();
        let err = request.validate_request().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("name: Name is required"));
        assert!(message.contains("email: Invalid email address"));
    }

    #[test]
    fn test_update_request_normalizes_blank_fields() {
        let request = UpdateUserRequest {
            name: Some(String::new()),
            email: Some("alice@x.com".to_string()),
        }
        .normalized();

        assert_eq!(request.name, None);
        assert!(request.validate_request().is_ok());
        assert!(!request.into_patch().is_empty());
    }

    #[test]
    fn test_envelope_shape() {
        let user = User {
            id: 1,
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
        };
        let value = serde_json::to_value(UserMessageResponse::new("User found", user)).unwrap();
        assert_eq!(value["message"], "User found");
        assert_eq!(value["user"]["id"], 1);
    }
}
