use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;

use super::{Persisted, StoreError};
use crate::models::User;

/// Tokens and the logged-in user, as persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Shared handle over the persisted auth state
#[derive(Debug)]
pub struct AuthStore {
    inner: RwLock<Persisted<AuthState>>,
}

impl AuthStore {
    pub fn in_memory() -> Self {
        Self::in_memory_with(AuthState::default())
    }

    pub fn in_memory_with(state: AuthState) -> Self {
        Self {
            inner: RwLock::new(Persisted::in_memory_with(state)),
        }
    }

    pub fn hydrate(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: RwLock::new(Persisted::hydrate(path)?),
        })
    }

    pub async fn snapshot(&self) -> AuthState {
        self.inner.read().await.get().clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.inner.read().await.get().access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.inner.read().await.get().refresh_token.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.inner.read().await.get().user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.get().is_authenticated()
    }

    /// Replace the whole session after a login
    pub async fn set_session(&self, session: AuthState) -> Result<(), StoreError> {
        self.inner.write().await.update(|state| *state = session)
    }

    /// Store a refreshed access token, keeping refresh token and user
    pub async fn set_access_token(&self, access_token: String) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .update(|state| state.access_token = Some(access_token))
    }

    pub async fn set_user(&self, user: User) -> Result<(), StoreError> {
        self.inner.write().await.update(|state| state.user = Some(user))
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.inner.write().await.reset()
    }
}
