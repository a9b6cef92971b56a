//! User records as the console sees them
//!
//! These are the frontend-facing shapes only. The backend's own record
//! (different id field, revision counter) is decoded and translated inside
//! the client's user API adapter and never leaves it.
//!
//! # Example
//!
//! ```
//! use adminboard_shared::models::{CreateUser, Role, UpdateUser};
//!
//! let input = CreateUser {
//!     username: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     role: Role::Admin,
//!     password: "s3cret-pass".to_string(),
//! };
//!
//! let patch = UpdateUser {
//!     role: Some(Role::User),
//!     ..Default::default()
//! };
//! assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"role":"user"}"#);
//! # let _ = input;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Frontend-facing user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque user id
    pub id: String,

    pub username: String,

    pub email: String,

    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// Write-only: set on forms, never filled from a backend response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Input for creating a user
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &"***")
            .finish()
    }
}

/// Partial update of a user
///
/// Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UpdateUser {
    /// Whether the update carries no field at all
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.role.is_none()
    }
}

/// Query parameters for listing users
///
/// Serializes to a query string containing only the present parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersParams {
    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Free-text search over username/email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl ListUsersParams {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Drops a blank keyword so it is not sent as `keyword=`
    pub fn normalized(mut self) -> Self {
        if let Some(keyword) = self.keyword.take() {
            let trimmed = keyword.trim();
            if !trimmed.is_empty() {
                self.keyword = Some(trimmed.to_string());
            }
        }
        self
    }
}

/// Pagination block of a user listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Pagination describing a single page holding `count` items
    pub fn single_page(count: usize) -> Self {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        Self {
            current: 1,
            page_size: count,
            total: u64::from(count),
            total_pages: if count == 0 { 0 } else { 1 },
        }
    }

    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }
}

/// One page of users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<User>,

    pub pagination: Pagination,

    /// Keyword echoed back by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_keyword: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_serializes_camel_case_without_password() {
        let user = User {
            id: "65a1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Admin,
            created_at: "2024-01-12T08:30:00Z".parse().unwrap(),
            password: None,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["createdAt"], "2024-01-12T08:30:00Z");
        assert_eq!(value["role"], "admin");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_list_params_only_present_fields() {
        let params = ListUsersParams::default().page(2);
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"page": 2}));

        let params = ListUsersParams::default().limit(20).keyword("ali");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"limit": 20, "keyword": "ali"})
        );
    }

    #[test]
    fn test_blank_keyword_is_dropped() {
        let params = ListUsersParams::default().keyword("   ").normalized();
        assert_eq!(params.keyword, None);

        let params = ListUsersParams::default().keyword(" bob ").normalized();
        assert_eq!(params.keyword.as_deref(), Some("bob"));
    }

    #[test]
    fn test_create_user_debug_masks_password() {
        let input = CreateUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::User,
            password: "hunter22".to_string(),
        };
        assert!(!format!("{:?}", input).contains("hunter22"));
    }

    #[test]
    fn test_single_page_pagination() {
        let pagination = Pagination::single_page(3);
        assert_eq!(pagination.total, 3);
        assert_eq!(pagination.total_pages, 1);
        assert!(!pagination.has_next());

        assert_eq!(Pagination::single_page(0).total_pages, 0);
    }

    #[test]
    fn test_update_user_is_empty() {
        assert!(UpdateUser::default().is_empty());
        assert!(!UpdateUser {
            email: Some("a@b.c".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
