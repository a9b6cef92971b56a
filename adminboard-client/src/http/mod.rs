//! HTTP layer
//!
//! - `client`: the single choke point for backend calls
//! - `loading`: reference-counted loading indicator
//!
//! # Request Flow
//!
//! ```text
//! HttpClient::get/post/put/patch/delete
//!   ├─> LoadingTracker::acquire (unless show_loading = false)
//!   ├─> attach "Authorization: Bearer <token>" if a token is stored
//!   ├─> send, check status in [200, 300), decode body
//!   ├─> LoadingGuard dropped (every exit path)
//!   └─> on failure: classify, clear token on 401, notify, return Err
//! ```

pub mod client;
pub mod loading;

pub use client::{HttpClient, RequestOptions};
pub use loading::{LoadingGuard, LoadingIndicator, LoadingTracker, TracingIndicator};
