//! Authentication state
//!
//! The console has no session object of its own: a user is "signed in"
//! exactly when a bearer token is present in persisted storage.
//!
//! - `token`: [`TokenStore`], read by the HTTP client and the navigation guard

pub mod token;

pub use token::TokenStore;
