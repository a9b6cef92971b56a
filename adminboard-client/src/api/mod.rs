//! Backend resource adapters
//!
//! - `users`: CRUD over `/users`

pub mod users;

pub use users::UserApi;
