//! Wire types for the gateway admin and bridge APIs.
//!
//! This module provides:
//! - [`Session`] — admin session status as reported by the gateway
//! - [`App`] / [`ApiKey`] — registered app identities and their keys
//! - [`LogEntry`] / [`LogsPage`] — bridge log records and query results
//! - [`LogQuery`] — parameters for a bridge log fetch
//! - [`HealthStatus`] — gateway liveness report
//!
//! All timestamps are ISO-8601 UTC on the wire; display conversion is the
//! consumer's job and never mutates the stored value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Fixed page size for log queries.
pub const LOG_PAGE_SIZE: u32 = 50;

/// Admin session status.
///
/// `authenticated = false` implies no protected view is reachable; the
/// route guard enforces this on every navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Whether the session cookie maps to a live server-side session.
    pub authenticated: bool,
    /// When the session expires, if authenticated.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Result of a successful admin login.
///
/// The session cookie itself is set as a response side effect and carried
/// by the client's cookie jar, not by this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// When the newly created session expires.
    pub expires_at: DateTime<Utc>,
}

/// The class of a registered app identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppType {
    /// An app that exposes tools through the gateway.
    ToolProvider,
    /// An agent that consumes tools through the gateway.
    Agent,
}

impl AppType {
    /// Returns the wire representation of this app type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ToolProvider => "tool_provider",
            Self::Agent => "agent",
        }
    }
}

/// A registered app identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Numeric database ID.
    pub id: i64,
    /// Opaque public app identifier.
    pub app_id: String,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether this is a tool provider or an agent.
    #[serde(rename = "type")]
    pub app_type: AppType,
    /// When the app was registered.
    pub created_at: DateTime<Utc>,
    /// Whether the app is active.
    pub is_active: bool,
    /// When a bridge for this app last connected, if ever.
    #[serde(default)]
    pub last_connected: Option<DateTime<Utc>>,
}

/// Payload for registering a new app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApp {
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether this is a tool provider or an agent.
    #[serde(rename = "type")]
    pub app_type: AppType,
}

/// Metadata for an issued API key. The secret is never included here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Numeric database ID.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Numeric ID of the app this key is scoped to.
    pub app_id: i64,
    /// When the key was created.
    pub created_at: DateTime<Utc>,
    /// When the key was last used, if ever.
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
    /// Whether the key is active.
    pub is_active: bool,
}

/// Payload for creating a new API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApiKey {
    /// Human-readable name.
    pub name: String,
    /// Numeric ID of the app to scope the key to.
    pub app_id: i64,
}

/// A freshly created API key together with its plaintext secret.
///
/// The secret is shown exactly once at creation time and cannot be
/// recovered afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedApiKey {
    /// The key's metadata.
    #[serde(flatten)]
    pub meta: ApiKey,
    /// The plaintext secret.
    pub key: String,
}

/// Log severity levels used by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Detailed debugging information.
    Debug,
    /// General information.
    Info,
    /// Warning conditions.
    Warning,
    /// Error conditions.
    Error,
}

impl LogLevel {
    /// Returns the wire representation of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// A single bridge log record.
///
/// Immutable once fetched; a re-fetch supersedes the whole page rather than
/// merging entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Numeric database ID.
    pub id: i64,
    /// Public identifier of the app that produced the log.
    pub app_id: String,
    /// When the log was recorded.
    pub timestamp: DateTime<Utc>,
    /// Severity level.
    pub level: LogLevel,
    /// The log message.
    pub message: String,
    /// The bridge connection that produced the log, if any.
    #[serde(default)]
    pub connection_id: Option<String>,
    /// Additional structured fields.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// One page of log results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsPage {
    /// The entries on this page, newest first.
    pub logs: Vec<LogEntry>,
    /// Total number of entries matching the query across all pages.
    pub total: u64,
}

/// Parameters for a bridge log fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Start of the time window (inclusive).
    pub start_time: DateTime<Utc>,
    /// End of the time window (inclusive).
    pub end_time: DateTime<Utc>,
    /// Exact-match level filter, if any.
    pub level: Option<LogLevel>,
    /// Connection filter, if any.
    pub connection_id: Option<String>,
    /// Page size.
    pub limit: u32,
    /// Offset into the result set.
    pub offset: u64,
}

impl LogQuery {
    /// Validates the query invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `start_time` is after `end_time`.
    pub fn validate(&self) -> Result<()> {
        if self.start_time > self.end_time {
            return Err(ApiError::Validation {
                message: "start_time must not be after end_time".to_string(),
            });
        }
        Ok(())
    }

    /// Renders the query as URL parameter pairs.
    ///
    /// Unset optional filters are omitted entirely rather than sent empty.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("start_time", self.start_time.to_rfc3339()),
            ("end_time", self.end_time.to_rfc3339()),
        ];
        if let Some(level) = self.level {
            pairs.push(("level", level.as_str().to_string()));
        }
        if let Some(ref connection_id) = self.connection_id {
            pairs.push(("connection_id", connection_id.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }
}

/// Gateway liveness report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall status string ("healthy" when all is well).
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// When the gateway started.
    pub started_at: DateTime<Utc>,
    /// Seconds since the gateway started.
    pub uptime_seconds: f64,
}
