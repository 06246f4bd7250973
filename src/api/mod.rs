//! Authenticated HTTP pipeline.
//!
//! Every request carries the stored access token. A 401 from anything but
//! login/refresh sends the request through the [`RefreshCoordinator`] and
//! replays it exactly once with the new token. When the refresh cannot
//! happen the stored session and query cache are cleared and
//! [`SessionEvent::LoginRequired`] is broadcast.

pub mod endpoints;
pub mod format;
pub mod refresh;
pub mod transport;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::ClientError;
use crate::query::QueryCache;
use crate::store::{self, AuthStore, SESSION_FILE};

pub use format::{DeleteResponse, ListFilters, ListParams, ListResponse, QueryPairs, RawFilters};
pub use refresh::RefreshCoordinator;
pub use transport::{ApiRequest, ApiResponse, RequestBody, ReqwestTransport, Transport, TransportError};

/// Session lifecycle notifications for whoever renders the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { username: String },
    TokenRefreshed,
    LoggedOut,
    /// The session could not be renewed; the user has to log in again
    LoginRequired { reason: String },
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[allow(dead_code)]
    #[serde(default)]
    token_type: Option<String>,
}

pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: AuthStore,
    cache: QueryCache,
    refresh: RefreshCoordinator,
    events: broadcast::Sender<SessionEvent>,
    request_logging: bool,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: AuthStore, cache: QueryCache) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            transport,
            session,
            cache,
            refresh: RefreshCoordinator::new(),
            events,
            request_logging: false,
        }
    }

    /// Real transport against `config.api.base_url`, session hydrated from
    /// the config directory
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(&config.api.base_url)?;
        let session = AuthStore::hydrate(store::config_dir(&config.storage)?.join(SESSION_FILE))?;

        Ok(Self::new(Arc::new(transport), session, QueryCache::new(&config.query))
            .with_request_logging(config.api.enable_request_logging))
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }

    pub fn session(&self) -> &AuthStore {
        &self.session
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Send a request through the auth pipeline. Non-2xx responses other than
    /// the handled 401 are returned as-is.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let sent_with = self.session.access_token().await;
        let response = self.dispatch(&request, sent_with.as_deref()).await?;

        if !response.is_unauthorized() || request.is_auth_endpoint() {
            return Ok(response);
        }

        // Another request may already have refreshed, or given up and cleared
        // the session, while this one was out
        let replay_token = match (self.session.access_token().await, &sent_with) {
            (Some(current), _) if sent_with.as_ref() != Some(&current) => current,
            (None, Some(_)) => {
                return Err(ClientError::SessionExpired("session ended while the request was in flight".to_string()));
            }
            _ => self.refreshed_token().await?,
        };

        debug!("Replaying {} {} with refreshed token", request.method, request.path);
        let replay = self.dispatch(&request, Some(&replay_token)).await?;
        Ok(replay)
    }

    /// Like [`send`](Self::send) but maps non-2xx responses to errors
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let response = self.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::from_response(response.status, &response.body))
        }
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.execute(request).await?;
        Ok(response.json()?)
    }

    pub async fn fetch_bytes(&self, request: ApiRequest) -> Result<Vec<u8>, ClientError> {
        let response = self.execute(request).await?;
        Ok(response.body)
    }

    /// Force a refresh through the coordinator, e.g. from `auth refresh`
    pub async fn refresh_session(&self) -> Result<(), ClientError> {
        self.refreshed_token().await.map(|_| ())
    }

    async fn dispatch(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<ApiResponse, ClientError> {
        let request = request.clone().with_bearer(bearer);
        if self.request_logging {
            debug!("{} {}", request.method, request.path);
        }

        let response = self.transport.execute(&request).await?;

        if self.request_logging {
            debug!("{} {} -> {}", request.method, request.path, response.status);
        }
        Ok(response)
    }

    async fn refreshed_token(&self) -> Result<String, ClientError> {
        self.refresh
            .run(|| async {
                match self.request_new_access_token().await {
                    Ok(token) => {
                        info!("Access token refreshed");
                        self.emit(SessionEvent::TokenRefreshed);
                        Ok(token)
                    }
                    Err(err) => {
                        let reason = match &err {
                            ClientError::SessionExpired(reason) => reason.clone(),
                            other => other.to_string(),
                        };
                        warn!("Token refresh failed: {}", reason);
                        self.expire_session(&reason).await;
                        Err(ClientError::SessionExpired(reason))
                    }
                }
            })
            .await
    }

    async fn request_new_access_token(&self) -> Result<String, ClientError> {
        let Some(refresh_token) = self.session.refresh_token().await else {
            return Err(ClientError::SessionExpired("no refresh token stored".to_string()));
        };

        let request = ApiRequest::post(endpoints::AUTH_REFRESH).json(&RefreshRequest {
            refresh_token: &refresh_token,
        })?;
        let response = self.dispatch(&request, None).await?;
        if !response.is_success() {
            return Err(ClientError::from_response(response.status, &response.body));
        }

        let body: RefreshResponse = response.json()?;
        self.session.set_access_token(body.access_token.clone()).await?;
        Ok(body.access_token)
    }

    /// Drop every trace of the session and ask the UI to show the login entry
    pub(crate) async fn expire_session(&self, reason: &str) {
        if let Err(e) = self.session.clear().await {
            warn!("Failed to clear stored session: {}", e);
        }
        self.cache.clear().await;
        self.emit(SessionEvent::LoginRequired {
            reason: reason.to_string(),
        });
    }
}
