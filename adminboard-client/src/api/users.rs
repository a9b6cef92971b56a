//! User API adapter
//!
//! Translates between the backend's user record and the frontend
//! [`User`], and composes the CRUD calls against `/users`. This is the only
//! place that knows the backend shape.
//!
//! # Endpoints
//!
//! - `GET /users?page&limit&keyword`
//! - `GET /users/:id`
//! - `POST /users`
//! - `PUT /users/:id`
//! - `DELETE /users/:id`
//!
//! Failures from [`HttpClient`] are returned unchanged.
//!
//! # Example
//!
//! ```no_run
//! use adminboard_client::api::UserApi;
//! use adminboard_client::http::HttpClient;
//! use adminboard_shared::models::ListUsersParams;
//!
//! # async fn example(http: HttpClient) -> adminboard_client::error::ClientResult<()> {
//! let users = UserApi::new(http);
//! let page = users
//!     .list(ListUsersParams::default().page(1).limit(10).keyword("ali"))
//!     .await?;
//! println!("{} of {} users", page.users.len(), page.pagination.total);
//! # Ok(())
//! # }
//! ```

use adminboard_shared::models::{
    CreateUser, ListUsersParams, Pagination, Payload, Role, UpdateUser, User, UserPage,
};
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::error::ClientResult;
use crate::http::{HttpClient, RequestOptions};

const USERS_PATH: &str = "/users";

/// User record as the backend stores it
#[derive(Debug, Clone, Deserialize)]
struct BackendUser {
    #[serde(rename = "_id")]
    id: String,
    username: String,
    email: String,
    role: Role,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<DateTime<Utc>>,
    /// Document revision counter
    #[serde(rename = "__v", default)]
    revision: u32,
}

impl From<BackendUser> for User {
    fn from(backend: BackendUser) -> Self {
        tracing::trace!(
            id = %backend.id,
            revision = backend.revision,
            updated_at = ?backend.updated_at,
            "Translating backend user"
        );

        User {
            id: backend.id,
            username: backend.username,
            email: backend.email,
            role: backend.role,
            created_at: backend.created_at,
            password: None,
        }
    }
}

/// Listing body: `{data: [...], pagination, searchKeyword?}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserListBody {
    data: Vec<BackendUser>,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    search_keyword: Option<String>,
}

impl From<UserListBody> for UserPage {
    fn from(body: UserListBody) -> Self {
        let pagination = body
            .pagination
            .unwrap_or_else(|| Pagination::single_page(body.data.len()));

        UserPage {
            users: body.data.into_iter().map(User::from).collect(),
            pagination,
            search_keyword: body.search_keyword,
        }
    }
}

/// CRUD operations on users
#[derive(Debug, Clone)]
pub struct UserApi {
    http: HttpClient,
}

impl UserApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Lists one page of users
    ///
    /// Only the present parameters are sent; a blank keyword is dropped.
    /// The listing may arrive bare or wrapped in an envelope.
    pub async fn list(&self, params: ListUsersParams) -> ClientResult<UserPage> {
        let params = params.normalized();
        let body: Payload<UserListBody> = self
            .http
            .get_with_query(USERS_PATH, &params, RequestOptions::default())
            .await?;

        let page = UserPage::from(body.into_inner());
        tracing::debug!(
            count = page.users.len(),
            total = page.pagination.total,
            "Users listed"
        );
        Ok(page)
    }

    /// Fetches a single user
    pub async fn get(&self, id: &str) -> ClientResult<User> {
        let body: Payload<BackendUser> = self
            .http
            .get(&user_path(id), RequestOptions::default())
            .await?;
        Ok(body.into_inner().into())
    }

    /// Creates a user
    ///
    /// The response may be the bare record or `{data: record}`.
    pub async fn create(&self, input: &CreateUser) -> ClientResult<User> {
        let body: Payload<BackendUser> = self
            .http
            .post(USERS_PATH, input, RequestOptions::default())
            .await?;

        let user = User::from(body.into_inner());
        tracing::info!(id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Applies a partial update
    pub async fn update(&self, id: &str, patch: &UpdateUser) -> ClientResult<User> {
        let body: Payload<BackendUser> = self
            .http
            .put(&user_path(id), patch, RequestOptions::default())
            .await?;

        let user = User::from(body.into_inner());
        tracing::info!(id = %user.id, "User updated");
        Ok(user)
    }

    /// Deletes a user; any response body is ignored
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let _: IgnoredAny = self
            .http
            .delete(&user_path(id), RequestOptions::default())
            .await?;

        tracing::info!(id = %id, "User deleted");
        Ok(())
    }
}

fn user_path(id: &str) -> String {
    format!("{}/{}", USERS_PATH, urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend_json() -> serde_json::Value {
        json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "username": "alice",
            "email": "alice@example.com",
            "role": "admin",
            "createdAt": "2024-01-12T08:30:00.000Z",
            "updatedAt": "2024-02-01T10:00:00.000Z",
            "__v": 3
        })
    }

    #[test]
    fn test_backend_user_translation() {
        let backend: BackendUser = serde_json::from_value(backend_json()).unwrap();
        assert_eq!(backend.revision, 3);

        let user = User::from(backend);
        assert_eq!(user.id, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.created_at.to_rfc3339(), "2024-01-12T08:30:00+00:00");
        assert_eq!(user.password, None);
    }

    #[test]
    fn test_bare_and_enveloped_records_normalize_equally() {
        let bare: Payload<BackendUser> = serde_json::from_value(backend_json()).unwrap();
        let wrapped: Payload<BackendUser> =
            serde_json::from_value(json!({ "data": backend_json() })).unwrap();

        assert_eq!(User::from(bare.into_inner()), User::from(wrapped.into_inner()));
    }

    #[test]
    fn test_list_body_bare_and_enveloped() {
        let listing = json!({
            "data": [backend_json()],
            "pagination": {"current": 1, "pageSize": 10, "total": 1, "totalPages": 1},
            "searchKeyword": "ali"
        });

        let bare: Payload<UserListBody> = serde_json::from_value(listing.clone()).unwrap();
        assert!(!bare.is_enveloped());
        let bare = UserPage::from(bare.into_inner());

        let wrapped: Payload<UserListBody> =
            serde_json::from_value(json!({ "code": 200, "message": "ok", "data": listing })).unwrap();
        assert!(wrapped.is_enveloped());
        let wrapped = UserPage::from(wrapped.into_inner());

        assert_eq!(bare, wrapped);
        assert_eq!(bare.search_keyword.as_deref(), Some("ali"));
        assert_eq!(bare.pagination.page_size, 10);
    }

    #[test]
    fn test_missing_pagination_is_synthesized() {
        let body: UserListBody =
            serde_json::from_value(json!({ "data": [backend_json(), backend_json()] })).unwrap();
        let page = UserPage::from(body);

        assert_eq!(page.pagination, Pagination::single_page(2));
        assert_eq!(page.search_keyword, None);
    }

    #[test]
    fn test_user_path_encodes_id() {
        assert_eq!(user_path("abc123"), "/users/abc123");
        assert_eq!(user_path("a/b c"), "/users/a%2Fb%20c");
    }
}
