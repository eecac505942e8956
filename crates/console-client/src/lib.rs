//! Typed HTTP client for the MCP gateway admin and bridge APIs.
//!
//! This crate provides:
//! - [`GatewayApi`] — one method per backend operation, behind a trait so
//!   engines can run against in-memory fakes
//! - [`HttpGatewayClient`] — the reqwest-backed production implementation;
//!   admin calls ride the session cookie jar, bridge log fetches carry a
//!   per-app `X-API-Key` header
//! - [`KeyStore`] — local storage for bridge API key secrets
//! - [`ApiError`] — the error taxonomy every call resolves to
//!
//! The client never retries and never attaches both credential kinds to one
//! call path.

pub mod api;
pub mod error;
pub mod http;
pub mod keystore;
pub mod types;

pub use api::GatewayApi;
pub use error::{ApiError, Result};
pub use http::HttpGatewayClient;
pub use keystore::KeyStore;
pub use types::{
    ApiKey, App, AppType, HealthStatus, IssuedApiKey, LOG_PAGE_SIZE, LogEntry, LogLevel, LogQuery,
    LoginOutcome, LogsPage, NewApiKey, NewApp, Session,
};
