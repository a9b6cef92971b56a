//! Data models shared by the console
//!
//! # Models
//!
//! - `user`: frontend-facing user record and its request/response shapes
//! - `envelope`: bare-or-enveloped response payloads
//! - `tab`: navigation tabs and their persisted state

pub mod envelope;
pub mod tab;
pub mod user;

pub use envelope::{Envelope, Payload};
pub use tab::{Tab, TabState, HOME_PATH};
pub use user::{CreateUser, ListUsersParams, Pagination, Role, UpdateUser, User, UserPage};
