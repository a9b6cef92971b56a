//! # Adminboard Client Library
//!
//! Network-facing half of the admin console.
//!
//! ## Modules
//!
//! - `config`: Configuration management
//! - `error`: Error taxonomy and user-facing messages
//! - `http`: HTTP client with loading, auth and error policies
//! - `api`: Backend resource adapters
//! - `console`: Composition root

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
