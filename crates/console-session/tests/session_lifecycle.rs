//! End-to-end lifecycle: startup check, login, guarded navigation, logout.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use console_client::types::{
    ApiKey, App, AppType, HealthStatus, IssuedApiKey, LogQuery, LoginOutcome, LogsPage, NewApiKey,
    NewApp, Session,
};
use console_client::{ApiError, GatewayApi, Result as ApiResult};
use console_session::{AuthPhase, Navigation, RouteDecision, SessionManager, evaluate_route};

/// Gateway fake that behaves like the real session endpoints: login with the
/// right password creates a session, logout destroys it, the session check
/// reports whatever currently exists.
struct ScriptedGateway {
    password: &'static str,
    session_live: Mutex<bool>,
    logout_failures: Mutex<VecDeque<ApiError>>,
}

impl ScriptedGateway {
    fn new(password: &'static str) -> Self {
        Self {
            password,
            session_live: Mutex::new(false),
            logout_failures: Mutex::new(VecDeque::new()),
        }
    }

    fn fail_next_logout(&self, error: ApiError) {
        self.logout_failures.lock().push_back(error);
    }
}

fn unsupported<T>() -> ApiResult<T> {
    Err(ApiError::Network {
        message: "not used in this test".to_string(),
    })
}

#[async_trait]
impl GatewayApi for ScriptedGateway {
    async fn login(&self, password: &str) -> ApiResult<LoginOutcome> {
        if password == self.password {
            *self.session_live.lock() = true;
            Ok(LoginOutcome {
                expires_at: Utc::now() + chrono::Duration::minutes(30),
            })
        } else {
            Err(ApiError::Unauthorized)
        }
    }

    async fn logout(&self) -> ApiResult<()> {
        // Server-side session is destroyed even when the response is lost.
        *self.session_live.lock() = false;
        match self.logout_failures.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn session(&self) -> ApiResult<Session> {
        let live = *self.session_live.lock();
        Ok(Session {
            authenticated: live,
            expires_at: live.then(|| Utc::now() + chrono::Duration::minutes(30)),
        })
    }

    async fn list_apps(&self, _app_type: Option<AppType>) -> ApiResult<Vec<App>> {
        unsupported()
    }

    async fn create_app(&self, _new: &NewApp) -> ApiResult<App> {
        unsupported()
    }

    async fn get_app(&self, _app_id: &str) -> ApiResult<App> {
        unsupported()
    }

    async fn list_keys(&self, _app_id: Option<i64>) -> ApiResult<Vec<ApiKey>> {
        unsupported()
    }

    async fn create_key(&self, _new: &NewApiKey) -> ApiResult<IssuedApiKey> {
        unsupported()
    }

    async fn fetch_logs(&self, _app_id: &str, _query: &LogQuery) -> ApiResult<LogsPage> {
        unsupported()
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        unsupported()
    }
}

#[tokio::test]
async fn full_lifecycle_gates_every_navigation() {
    let manager = SessionManager::new(Arc::new(ScriptedGateway::new("hunter2")));

    // Before the startup check the guard shows a placeholder.
    assert_eq!(evaluate_route(&manager.phase()), RouteDecision::Loading);

    // Startup check: no session yet, so protected views redirect.
    manager.check_session().await;
    assert_eq!(
        evaluate_route(&manager.phase()),
        RouteDecision::RedirectToLogin {
            replace_history: true
        }
    );

    // A bad password stays on the login view with a visible error.
    assert_eq!(manager.login("wrong").await, None);
    assert_eq!(manager.error(), Some("invalid password".to_string()));
    assert_eq!(
        evaluate_route(&manager.phase()),
        RouteDecision::RedirectToLogin {
            replace_history: true
        }
    );

    // The right password opens the dashboard.
    assert_eq!(manager.login("hunter2").await, Some(Navigation::Dashboard));
    assert_eq!(evaluate_route(&manager.phase()), RouteDecision::Render);

    // A later session check against the live session keeps access.
    manager.check_session().await;
    assert_eq!(evaluate_route(&manager.phase()), RouteDecision::Render);

    // Logout sends the shell to login and revokes access deterministically.
    assert_eq!(manager.logout().await, Navigation::Login);
    assert_eq!(
        evaluate_route(&manager.phase()),
        RouteDecision::RedirectToLogin {
            replace_history: true
        }
    );
}

#[tokio::test]
async fn failed_logout_still_revokes_access() {
    let gateway = ScriptedGateway::new("hunter2");
    gateway.fail_next_logout(ApiError::Network {
        message: "connection reset by peer".to_string(),
    });
    let manager = SessionManager::new(Arc::new(gateway));

    assert_eq!(manager.login("hunter2").await, Some(Navigation::Dashboard));
    assert_eq!(manager.logout().await, Navigation::Login);

    assert_eq!(manager.phase(), AuthPhase::Unauthenticated);
    assert_eq!(
        evaluate_route(&manager.phase()),
        RouteDecision::RedirectToLogin {
            replace_history: true
        }
    );
    assert!(manager.error().is_some_and(|e| e.contains("logout failed")));
}

#[tokio::test(start_paused = true)]
async fn session_expiry_between_navigations_redirects() {
    let gateway = Arc::new(ScriptedGateway::new("hunter2"));
    let manager = SessionManager::new(Arc::<ScriptedGateway>::clone(&gateway));

    assert_eq!(manager.login("hunter2").await, Some(Navigation::Dashboard));

    // The gateway expires the session behind our back.
    tokio::time::sleep(Duration::from_secs(1)).await;
    *gateway.session_live.lock() = false;

    // The next navigation re-checks and gets redirected.
    manager.check_session().await;
    assert_eq!(
        evaluate_route(&manager.phase()),
        RouteDecision::RedirectToLogin {
            replace_history: true
        }
    );
}
