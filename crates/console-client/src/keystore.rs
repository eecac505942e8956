//! Local storage for bridge API keys.
//!
//! The admin UI talks to the gateway with a session cookie, but log fetches
//! go through the legacy bridge path and authenticate with a per-app
//! `X-API-Key` header. Secrets are shown once at creation time, so whatever
//! the operator saved locally is all we have. Lookup failure is a
//! distinguishable [`ApiError::NoCredential`] — never a silently
//! unauthenticated request.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;

use crate::error::{ApiError, Result};

/// In-memory store mapping app identifiers to API key secrets.
#[derive(Default)]
pub struct KeyStore {
    keys: Mutex<HashMap<String, String>>,
}

impl KeyStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a key secret for an app, replacing any previous one.
    pub fn insert(&self, app_id: impl Into<String>, secret: impl Into<String>) {
        self.keys.lock().insert(app_id.into(), secret.into());
    }

    /// Returns the stored secret for an app.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoCredential`] if no secret is stored for the app.
    pub fn key_for(&self, app_id: &str) -> Result<String> {
        self.keys
            .lock()
            .get(app_id)
            .cloned()
            .ok_or_else(|| ApiError::NoCredential {
                app_id: app_id.to_string(),
            })
    }

}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose secrets in debug output
        f.debug_struct("KeyStore")
            .field("keys", &format!("[{} redacted]", self.keys.lock().len()))
            .finish()
    }
}
