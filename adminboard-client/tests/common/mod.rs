//! Common test utilities for client integration tests
//!
//! This module provides shared infrastructure:
//! - A wiremock server standing in for the REST backend
//! - In-memory storage, notifier and a recording loading indicator
//! - Backend-shaped user fixtures

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use adminboard_client::api::UserApi;
use adminboard_client::config::ApiConfig;
use adminboard_client::http::{HttpClient, LoadingIndicator};
use adminboard_shared::auth::TokenStore;
use adminboard_shared::notify::{MemoryNotifier, NoticeLevel};
use adminboard_shared::storage::MemoryStore;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Loading indicator that counts transitions
#[derive(Default)]
pub struct RecordingIndicator {
    pub shows: AtomicUsize,
    pub hides: AtomicUsize,
}

impl RecordingIndicator {
    pub fn shows(&self) -> usize {
        self.shows.load(Ordering::SeqCst)
    }

    pub fn hides(&self) -> usize {
        self.hides.load(Ordering::SeqCst)
    }
}

impl LoadingIndicator for RecordingIndicator {
    fn show(&self) {
        self.shows.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.hides.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test context with a mock backend and a client pointed at it
pub struct TestContext {
    pub server: MockServer,
    pub tokens: TokenStore,
    pub notifier: Arc<MemoryNotifier>,
    pub indicator: Arc<RecordingIndicator>,
    pub http: HttpClient,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_timeout(2_000).await
    }

    pub async fn with_timeout(timeout_ms: u64) -> Self {
        let server = MockServer::start().await;

        let mut api = ApiConfig::new(format!("{}/api", server.uri()));
        api.timeout_ms = timeout_ms;
        api.dev_logging = true;

        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        let notifier = Arc::new(MemoryNotifier::new());
        let indicator = Arc::new(RecordingIndicator::default());

        let http = HttpClient::new(api, tokens.clone(), notifier.clone(), indicator.clone()).unwrap();

        Self {
            server,
            tokens,
            notifier,
            indicator,
            http,
        }
    }

    pub fn users(&self) -> UserApi {
        UserApi::new(self.http.clone())
    }

    /// Error notifications shown so far
    pub fn errors(&self) -> Vec<String> {
        self.notifier.messages(NoticeLevel::Error)
    }

    /// Asserts the loading indicator is fully released
    pub fn assert_loading_released(&self) {
        assert_eq!(self.http.loading().pending(), 0);
        assert!(!self.http.loading().is_visible());
        assert_eq!(self.indicator.shows(), self.indicator.hides());
    }
}

/// A user record in backend shape
pub fn backend_user(id: &str, username: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "role": role,
        "createdAt": "2024-01-12T08:30:00.000Z",
        "updatedAt": "2024-01-12T08:30:00.000Z",
        "__v": 0
    })
}
