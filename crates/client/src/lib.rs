//! Typed REST client for the project-ID backend.
//!
//! Every endpoint is a method on [`ApiClient`]; failures are normalized into
//! [`ApiError`] before they reach callers.

pub mod api;
pub mod auth;
pub mod config;
pub mod customers;
pub mod error;
pub mod projects;
pub mod reference;
pub mod roles;
pub mod routes;
pub mod session;
pub mod users;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
