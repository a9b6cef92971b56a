//! Backend HTTP client
//!
//! All backend calls go through [`HttpClient`], which applies the same
//! policy to each of them: loading indicator, bearer token, status check,
//! error classification and user notification.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use adminboard_client::config::ApiConfig;
//! use adminboard_client::http::{HttpClient, RequestOptions, TracingIndicator};
//! use adminboard_shared::auth::TokenStore;
//! use adminboard_shared::notify::TracingNotifier;
//! use adminboard_shared::storage::MemoryStore;
//!
//! # async fn example() -> adminboard_client::error::ClientResult<()> {
//! let client = HttpClient::new(
//!     ApiConfig::new("http://localhost:3000/api"),
//!     TokenStore::new(Arc::new(MemoryStore::new())),
//!     Arc::new(TracingNotifier),
//!     Arc::new(TracingIndicator),
//! )?;
//!
//! // Background refresh: no overlay, no toast
//! let health: serde_json::Value = client.get("/health", RequestOptions::silent()).await?;
//! # let _ = health;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use adminboard_shared::auth::TokenStore;
use adminboard_shared::notify::Notifier;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use super::loading::{LoadingIndicator, LoadingTracker};
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Content type sent with every request
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Per-call switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Count the call towards the loading indicator
    pub show_loading: bool,

    /// Surface a failure as a user notification
    pub show_error_message: bool,
}

impl RequestOptions {
    /// No loading indicator and no error notification
    pub fn silent() -> Self {
        Self {
            show_loading: false,
            show_error_message: false,
        }
    }

    pub fn without_loading(mut self) -> Self {
        self.show_loading = false;
        self
    }

    pub fn without_error_message(mut self) -> Self {
        self.show_error_message = false;
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            show_loading: true,
            show_error_message: true,
        }
    }
}

/// Query and body, serialized before anything is sent
#[derive(Debug, Default)]
struct PreparedRequest {
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

struct Inner {
    client: Client,
    config: ApiConfig,
    tokens: TokenStore,
    notifier: Arc<dyn Notifier>,
    loading: Arc<LoadingTracker>,
}

/// Shared handle to the backend
///
/// Cheap to clone; clones share the loading counter.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<Inner>,
}

impl HttpClient {
    /// Creates a client
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] if the underlying HTTP client cannot
    /// be built (e.g. TLS backend initialization failure).
    pub fn new(
        config: ApiConfig,
        tokens: TokenStore,
        notifier: Arc<dyn Notifier>,
        indicator: Arc<dyn LoadingIndicator>,
    ) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::request(e.to_string()))?;

        tracing::info!("HTTP client ready for {}", config.base_url);

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                config,
                tokens,
                notifier,
                loading: Arc::new(LoadingTracker::new(indicator)),
            }),
        })
    }

    /// The loading counter shared by all clones
    pub fn loading(&self) -> &LoadingTracker {
        &self.inner.loading
    }

    /// The token store consulted on every request
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// `GET path`
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        self.execute(Method::GET, path, Ok(PreparedRequest::default()), options)
            .await
    }

    /// `GET path?query`, with only the present query fields
    pub async fn get_with_query<T, Q>(
        &self,
        path: &str,
        query: &Q,
        options: RequestOptions,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let prepared = query_pairs(query).map(|query| PreparedRequest { query, body: None });
        self.execute(Method::GET, path, prepared, options).await
    }

    /// `POST path` with a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B, options: RequestOptions) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, json_body(body), options).await
    }

    /// `PUT path` with a JSON body
    pub async fn put<T, B>(&self, path: &str, body: &B, options: RequestOptions) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, json_body(body), options).await
    }

    /// `PATCH path` with a JSON body
    pub async fn patch<T, B>(&self, path: &str, body: &B, options: RequestOptions) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PATCH, path, json_body(body), options).await
    }

    /// `DELETE path`
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        self.execute(Method::DELETE, path, Ok(PreparedRequest::default()), options)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        prepared: ClientResult<PreparedRequest>,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("http_request", %request_id, %method, path);

        async move {
            let loading = options.show_loading.then(|| self.inner.loading.acquire());
            let result = self.dispatch(method, path, prepared).await;
            drop(loading);

            result.map_err(|err| self.on_failure(err, options))
        }
        .instrument(span)
        .await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        prepared: ClientResult<PreparedRequest>,
    ) -> ClientResult<T> {
        let prepared = prepared?;
        let url = self.inner.config.url(path);

        if self.inner.config.dev_logging {
            tracing::debug!(
                url = %url,
                method = %method,
                query = ?prepared.query,
                has_body = prepared.body.is_some(),
                "Request dispatched"
            );
        }

        let mut builder = self.inner.client.request(method, &url);
        if !prepared.query.is_empty() {
            builder = builder.query(&prepared.query);
        }
        if let Some(authorization) = self.inner.tokens.authorization_header() {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        if let Some(body) = prepared.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::from_transport(&e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_transport(&e))?;

        if self.inner.config.dev_logging {
            tracing::debug!(
                url = %url,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&bytes),
                "Response received"
            );
        }

        if !status.is_success() {
            return Err(ClientError::from_status(status.as_u16(), &bytes));
        }

        decode_body(&bytes)
    }

    fn on_failure(&self, err: ClientError, options: RequestOptions) -> ClientError {
        tracing::error!(status = ?err.status(), "Request failed: {}", err);

        if err.is_unauthorized() {
            if let Err(e) = self.inner.tokens.clear() {
                tracing::warn!("Failed to clear token after 401: {}", e);
            }
        }

        if options.show_error_message {
            self.inner.notifier.error(err.message());
        }

        err
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.inner.config.base_url)
            .field("pending", &self.inner.loading.pending())
            .finish()
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> ClientResult<PreparedRequest> {
    Ok(PreparedRequest {
        query: Vec::new(),
        body: Some(serde_json::to_vec(body)?),
    })
}

/// Flattens a serializable struct into query pairs, skipping nulls
fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> ClientResult<Vec<(String, String)>> {
    match serde_json::to_value(query)? {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect()),
        other => Err(ClientError::request(format!(
            "query parameters must be an object, got {}",
            other
        ))),
    }
}

/// Decodes a 2xx body; an empty body reads as JSON `null`
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };

    serde_json::from_slice(raw).map_err(|e| ClientError::InvalidResponse {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Params {
        page: Option<u32>,
        keyword: Option<String>,
        active: bool,
    }

    #[test]
    fn test_query_pairs_skip_absent() {
        let mut pairs = query_pairs(&Params {
            page: Some(2),
            keyword: None,
            active: true,
        })
        .unwrap();
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("active".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_reject_non_object() {
        let err = query_pairs(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ClientError::Request { .. }));
    }

    #[test]
    fn test_decode_empty_body_as_null() {
        let value: Option<u32> = decode_body(b"").unwrap();
        assert_eq!(value, None);

        let _: serde::de::IgnoredAny = decode_body(b"  \n").unwrap();
    }

    #[test]
    fn test_decode_mismatch_is_invalid_response() {
        let err = decode_body::<Vec<u32>>(br#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse { .. }));
    }

    #[test]
    fn test_json_body() {
        let prepared = json_body(&json!({"username": "alice"})).unwrap();
        assert_eq!(prepared.body.unwrap(), br#"{"username":"alice"}"#.to_vec());
    }

    #[test]
    fn test_default_options() {
        let options = RequestOptions::default();
        assert!(options.show_loading && options.show_error_message);

        let options = RequestOptions::default().without_loading();
        assert!(!options.show_loading && options.show_error_message);

        assert_eq!(
            RequestOptions::default().without_loading().without_error_message(),
            RequestOptions::silent()
        );
    }
}
