//! Login, logout and the current user.
//!
//! Login and refresh requests never enter the 401 refresh flow, so a bad
//! password surfaces as `ClientError::Unauthorized` straight away.

pub mod claims;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{endpoints, ApiClient, ApiRequest, SessionEvent};
use crate::error::ClientError;
use crate::models::User;
use crate::store::AuthState;

pub use claims::TokenClaims;

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl ApiClient {
    /// Exchange credentials for tokens and persist the session
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthState, ClientError> {
        let request = ApiRequest::post(endpoints::AUTH_LOGIN).json(&LoginRequest { username, password })?;
        let response: LoginResponse = self.fetch_json(request).await?;

        let session = AuthState {
            access_token: Some(response.access_token),
            refresh_token: response.refresh_token,
            token_type: response.token_type.or_else(|| Some("bearer".to_string())),
            user: response.user,
        };
        self.session().set_session(session.clone()).await?;
        // Cached data belongs to whoever was logged in before
        self.cache().clear().await;

        info!("Logged in as {}", username);
        self.emit(SessionEvent::LoggedIn {
            username: username.to_string(),
        });
        Ok(session)
    }

    /// Tell the backend (best effort), then forget tokens and cached data.
    /// Preferences are left alone.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if self.session().is_authenticated().await {
            if let Err(e) = self.execute(ApiRequest::post(endpoints::AUTH_LOGOUT)).await {
                warn!("Logout request failed, clearing local session anyway: {}", e);
            }
        }

        self.session().clear().await?;
        self.cache().clear().await;

        info!("Logged out");
        self.emit(SessionEvent::LoggedOut);
        Ok(())
    }

    /// Fetch the current user and keep the stored copy in sync
    pub async fn me(&self) -> Result<User, ClientError> {
        let user: User = self.fetch_json(ApiRequest::get(endpoints::AUTH_ME)).await?;
        self.session().set_user(user.clone()).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryCache;
    use crate::store::AuthStore;
    use crate::testing::{json_response, MockTransport};
    use serde_json::json;
    use uuid::Uuid;

    fn login_body() -> serde_json::Value {
        json!({
            "access_token": "acc-1",
            "refresh_token": "ref-1",
            "token_type": "bearer",
            "user": {
                "id": Uuid::new_v4(),
                "username": "admin",
                "email": "admin@dragofactu.local",
                "full_name": "Administrador",
                "role": "admin"
            }
        })
    }

    #[tokio::test]
    async fn test_login_stores_session_and_announces_it() {
        let transport = MockTransport::new(|_req| json_response(200, login_body()));
        let client = ApiClient::new(transport.clone(), AuthStore::in_memory(), QueryCache::disabled());
        let mut events = client.subscribe();

        let session = client.login("admin", "admin123").await.unwrap();

        assert_eq!(session.access_token.as_deref(), Some("acc-1"));
        assert_eq!(client.session().refresh_token().await.as_deref(), Some("ref-1"));
        assert!(client.session().current_user().await.is_some_and(|u| u.is_admin()));
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::LoggedIn {
                username: "admin".into()
            }
        );

        let sent = &transport.requests()[0];
        assert_eq!(sent.path, endpoints::AUTH_LOGIN);
        assert!(sent.bearer.is_none());
    }

    #[tokio::test]
    async fn test_bad_credentials_leave_store_empty() {
        let transport = MockTransport::new(|_req| json_response(401, json!({"detail": "Incorrect username or password"})));
        let client = ApiClient::new(transport, AuthStore::in_memory(), QueryCache::disabled());

        let err = client.login("admin", "nope").await.unwrap_err();

        assert!(matches!(err, ClientError::Unauthorized(_)));
        assert!(!client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let transport = MockTransport::new(|req| match req.path.as_str() {
            endpoints::AUTH_LOGIN => json_response(200, login_body()),
            _ => json_response(500, json!({"detail": "boom"})),
        });
        let client = ApiClient::new(transport, AuthStore::in_memory(), QueryCache::disabled());
        client.login("admin", "admin123").await.unwrap();

        client.logout().await.unwrap();

        assert_eq!(client.session().snapshot().await, AuthState::default());
    }
}
