//! The gateway API surface consumed by the console.
//!
//! [`GatewayApi`] has one method per backend operation. Engines hold the
//! trait object rather than the concrete HTTP client so they can be tested
//! against in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    ApiKey, App, AppType, HealthStatus, IssuedApiKey, LogQuery, LoginOutcome, LogsPage, NewApiKey,
    NewApp, Session,
};

/// Typed operations against the gateway's admin and bridge APIs.
///
/// Implementations attach the correct credential for each call class:
/// admin calls carry the session cookie, log fetches carry the per-app
/// `X-API-Key` header. The two are never mixed on one call path.
///
/// No method retries; a failed call surfaces its [`ApiError`](crate::ApiError)
/// to the caller, who owns the retry policy.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Logs in the admin user.
    ///
    /// On success the gateway sets the session cookie as a side effect.
    async fn login(&self, password: &str) -> Result<LoginOutcome>;

    /// Logs out the admin user and clears the server-side session.
    async fn logout(&self) -> Result<()>;

    /// Reports whether the current session cookie is still valid.
    async fn session(&self) -> Result<Session>;

    /// Lists registered apps, optionally filtered by type.
    async fn list_apps(&self, app_type: Option<AppType>) -> Result<Vec<App>>;

    /// Registers a new app.
    async fn create_app(&self, new: &NewApp) -> Result<App>;

    /// Fetches a single app by its public identifier.
    async fn get_app(&self, app_id: &str) -> Result<App>;

    /// Lists API keys, optionally scoped to one app.
    async fn list_keys(&self, app_id: Option<i64>) -> Result<Vec<ApiKey>>;

    /// Creates a new API key. The plaintext secret is returned exactly once.
    async fn create_key(&self, new: &NewApiKey) -> Result<IssuedApiKey>;

    /// Fetches one page of bridge logs for an app.
    ///
    /// Authenticates with the locally stored API key for `app_id`.
    async fn fetch_logs(&self, app_id: &str, query: &LogQuery) -> Result<LogsPage>;

    /// Fetches the gateway liveness report. Unauthenticated.
    async fn health(&self) -> Result<HealthStatus>;
}
