//! # Adminboard Shared Library
//!
//! State and contracts of the admin console that do not touch the network:
//! persisted storage, the auth token, data models, the tab store and
//! client-side navigation.
//!
//! ## Module Organization
//!
//! - `storage`: key/value persistence (file or memory)
//! - `auth`: bearer token store
//! - `models`: users, response envelopes, tabs
//! - `tabs`: tab store state machine
//! - `navigation`: route table, navigation guard, router
//! - `notify`: transient user-facing notifications

pub mod auth;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod storage;
pub mod tabs;

/// Current version of the Adminboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
