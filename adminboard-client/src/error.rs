//! Error handling for the HTTP client
//!
//! Every failed call ends up as one [`ClientError`] carrying the message
//! shown to the user:
//!
//! | Failure                          | Variant           | Message                      |
//! |----------------------------------|-------------------|------------------------------|
//! | Server answered 400              | `Server`          | 请求参数错误                 |
//! | Server answered 401              | `Server`          | 未授权，请重新登录           |
//! | Server answered 403              | `Server`          | 权限不足                     |
//! | Server answered 404              | `Server`          | 请求的资源不存在             |
//! | Server answered 500              | `Server`          | 服务器内部错误               |
//! | Any other non-2xx status         | `Server`          | body `message` or 请求失败 (status) |
//! | No response (connect, timeout)   | `Network`         | 网络连接失败，请检查网络     |
//! | Request could not be built       | `Request`         | raw error or 未知错误        |
//! | 2xx body not in expected shape   | `InvalidResponse` | raw decode error             |

use thiserror::Error;

/// User-facing messages
pub mod messages {
    pub const BAD_REQUEST: &str = "请求参数错误";
    pub const UNAUTHORIZED: &str = "未授权，请重新登录";
    pub const FORBIDDEN: &str = "权限不足";
    pub const NOT_FOUND: &str = "请求的资源不存在";
    pub const INTERNAL_ERROR: &str = "服务器内部错误";
    pub const NETWORK: &str = "网络连接失败，请检查网络";
    pub const UNKNOWN: &str = "未知错误";
}

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Classified failure of a backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server responded with a non-2xx status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// No response was received
    #[error("{message}")]
    Network { message: String },

    /// The request could not be constructed
    #[error("{message}")]
    Request { message: String },

    /// A 2xx body did not match the expected shape
    #[error("{message}")]
    InvalidResponse { message: String },
}

impl ClientError {
    /// Classifies a non-2xx response
    ///
    /// `body` is the raw response body; its JSON `message` field is used
    /// for statuses without a fixed message.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = match status {
            400 => messages::BAD_REQUEST.to_string(),
            401 => messages::UNAUTHORIZED.to_string(),
            403 => messages::FORBIDDEN.to_string(),
            404 => messages::NOT_FOUND.to_string(),
            500 => messages::INTERNAL_ERROR.to_string(),
            _ => body_message(body).unwrap_or_else(|| format!("请求失败 ({})", status)),
        };

        ClientError::Server { status, message }
    }

    /// A no-response failure
    pub fn network() -> Self {
        ClientError::Network {
            message: messages::NETWORK.to_string(),
        }
    }

    /// A construction failure with the raw error text
    pub fn request(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        ClientError::Request {
            message: if raw.trim().is_empty() {
                messages::UNKNOWN.to_string()
            } else {
                raw
            },
        }
    }

    /// Classifies a transport error
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            ClientError::request(err.to_string())
        } else {
            // Timeouts, refused connections and broken bodies all mean no
            // usable response arrived
            ClientError::network()
        }
    }

    /// The message shown to the user
    pub fn message(&self) -> &str {
        match self {
            ClientError::Server { message, .. }
            | ClientError::Network { message }
            | ClientError::Request { message }
            | ClientError::InvalidResponse { message } => message,
        }
    }

    /// HTTP status for server-responded errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::request(err.to_string())
    }
}

fn body_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
