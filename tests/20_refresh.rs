mod common;

use anyhow::Result;
use futures::future::join_all;
use serde_json::Value;

use dragofactu::api::{ApiRequest, ListParams};
use dragofactu::models::Client;
use dragofactu::query::Resource;
use dragofactu::store::AuthState;
use dragofactu::{ClientError, SessionEvent};

use common::MockBackend;

const PATHS: [&str; 5] = ["/clients", "/diary", "/documents", "/dashboard/stats", "/auth/me"];

#[tokio::test]
async fn concurrent_401s_share_a_single_refresh() -> Result<()> {
    let backend = MockBackend::start().await?;
    let api = backend.logged_in_client().await?;
    backend.state.expire_access_token();

    let results = join_all(PATHS.iter().map(|path| api.fetch_json::<Value>(ApiRequest::get(*path)))).await;

    for result in &results {
        assert!(result.is_ok(), "request failed: {:?}", result);
    }
    assert_eq!(backend.state.refresh_calls(), 1);

    let new_token = backend.state.valid_token();
    assert_eq!(api.session().access_token().await, Some(new_token.clone()));

    let bearer = format!("Bearer {}", new_token);
    let replays = backend
        .state
        .authorizations()
        .into_iter()
        .filter(|auth| auth.as_deref() == Some(bearer.as_str()))
        .count();
    assert_eq!(replays, PATHS.len());
    Ok(())
}

#[tokio::test]
async fn missing_refresh_token_asks_for_login_without_refreshing() -> Result<()> {
    let backend = MockBackend::start().await?;
    let api = backend.client_with_session(AuthState {
        access_token: Some("long-gone".into()),
        ..AuthState::default()
    })?;
    let mut events = api.subscribe();

    let err = api.fetch_json::<Value>(ApiRequest::get("/clients")).await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired(_)));
    assert_eq!(backend.state.hits("POST /auth/refresh"), 0);
    assert!(!api.session().is_authenticated().await);
    assert!(matches!(events.try_recv()?, SessionEvent::LoginRequired { .. }));
    Ok(())
}

#[tokio::test]
async fn revoked_refresh_token_fails_every_waiting_request() -> Result<()> {
    let backend = MockBackend::start().await?;
    let api = backend.client_with_session(AuthState {
        access_token: Some("long-gone".into()),
        refresh_token: Some("revoked".into()),
        token_type: Some("bearer".into()),
        user: None,
    })?;

    let results = join_all(PATHS.iter().map(|path| api.fetch_json::<Value>(ApiRequest::get(*path)))).await;

    for result in results {
        assert!(matches!(result, Err(ClientError::SessionExpired(_))));
    }
    assert_eq!(backend.state.hits("POST /auth/refresh"), 1);
    assert_eq!(api.session().snapshot().await, AuthState::default());
    Ok(())
}

#[tokio::test]
async fn failed_refresh_drops_cached_queries() -> Result<()> {
    let backend = MockBackend::start().await?;
    let api = backend.client_with_session(AuthState {
        access_token: Some(backend.state.valid_token()),
        refresh_token: Some("revoked".into()),
        token_type: Some("bearer".into()),
        user: None,
    })?;
    let clients = Resource::<Client>::new(api.clone());

    clients.list(ListParams::default(), &()).await?;
    assert_eq!(api.cache().len().await, 1);

    backend.state.expire_access_token();
    let err = api.fetch_json::<Value>(ApiRequest::get("/diary")).await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired(_)));
    assert!(api.cache().is_empty().await);
    Ok(())
}

#[tokio::test]
async fn request_answered_after_refresh_reuses_new_token() -> Result<()> {
    let backend = MockBackend::start().await?;
    let api = backend.logged_in_client().await?;

    backend.state.expire_access_token();
    api.fetch_json::<Value>(ApiRequest::get("/clients")).await?;
    // The stored token is current again: no second refresh for the next call
    api.fetch_json::<Value>(ApiRequest::get("/diary")).await?;

    assert_eq!(backend.state.refresh_calls(), 1);
    Ok(())
}
