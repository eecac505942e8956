//! Reqwest-backed implementation of [`GatewayApi`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::GatewayApi;
use crate::error::{ApiError, Result};
use crate::keystore::KeyStore;
use crate::types::{
    ApiKey, App, AppType, HealthStatus, IssuedApiKey, LogQuery, LoginOutcome, LogsPage, NewApiKey,
    NewApp, Session,
};

/// Header carrying the bridge API key.
const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

/// HTTP client for the gateway.
///
/// Admin calls authenticate through the cookie jar (the gateway sets the
/// session cookie on login); bridge log fetches authenticate with the
/// per-app key from the [`KeyStore`]. The client performs no retries.
pub struct HttpGatewayClient {
    base_url: String,
    http: reqwest::Client,
    keys: Arc<KeyStore>,
}

impl HttpGatewayClient {
    /// Creates a client for the gateway at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>, keys: Arc<KeyStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Network {
                message: e.to_string(),
            })?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            http,
            keys,
        })
    }

    /// Returns the key store used for bridge log authentication.
    #[must_use]
    pub fn keys(&self) -> &Arc<KeyStore> {
        &self.keys
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(ApiError::from)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), message))
    }
}

#[async_trait]
impl GatewayApi for HttpGatewayClient {
    async fn login(&self, password: &str) -> Result<LoginOutcome> {
        let response = self
            .http
            .post(self.url("/api/auth/admin/login"))
            .json(&LoginRequest { password })
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn logout(&self) -> Result<()> {
        let response = self
            .http
            .post(self.url("/api/auth/admin/logout"))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn session(&self) -> Result<Session> {
        let response = self
            .http
            .get(self.url("/api/auth/admin/session"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_apps(&self, app_type: Option<AppType>) -> Result<Vec<App>> {
        let mut request = self.http.get(self.url("/api/auth/apps"));
        if let Some(app_type) = app_type {
            request = request.query(&[("type", app_type.as_str())]);
        }
        Self::read_json(request.send().await?).await
    }

    async fn create_app(&self, new: &NewApp) -> Result<App> {
        let response = self
            .http
            .post(self.url("/api/auth/apps"))
            .json(new)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn get_app(&self, app_id: &str) -> Result<App> {
        let response = self
            .http
            .get(self.url(&format!("/api/auth/apps/{app_id}")))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_keys(&self, app_id: Option<i64>) -> Result<Vec<ApiKey>> {
        let mut request = self.http.get(self.url("/api/auth/keys"));
        if let Some(app_id) = app_id {
            request = request.query(&[("app_id", app_id.to_string())]);
        }
        Self::read_json(request.send().await?).await
    }

    async fn create_key(&self, new: &NewApiKey) -> Result<IssuedApiKey> {
        let response = self
            .http
            .post(self.url("/api/auth/keys"))
            .json(new)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn fetch_logs(&self, app_id: &str, query: &LogQuery) -> Result<LogsPage> {
        query.validate()?;
        let key = self.keys.key_for(app_id)?;
        debug!(app_id, offset = query.offset, "fetching bridge logs");
        let response = self
            .http
            .get(self.url(&format!("/api/bridge/logs/{app_id}")))
            .header(API_KEY_HEADER, key)
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(|e| {
                warn!(app_id, error = %e, "bridge log request failed");
                ApiError::from(e)
            })?;
        Self::read_json(response).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let response = self.http.get(self.url("/api/health")).send().await?;
        Self::read_json(response).await
    }
}
