//! Query cache keyed by (domain, scope, params).
//!
//! Successful mutations invalidate whole domains rather than single keys,
//! so a list never shows a record the server already deleted.

pub mod resource;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::QueryConfig;
use crate::error::ClientError;
use crate::types::{Domain, Mutation};

pub use resource::{Resource, ResourceModel};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub domain: Domain,
    pub scope: String,
    pub params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(domain: Domain, scope: impl Into<String>) -> Self {
        Self {
            domain,
            scope: scope.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn params(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(pairs);
        self
    }
}

struct CacheEntry {
    value: Value,
    fetched_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<QueryKey, CacheEntry>,
    // Bumped on every invalidation; a fetch that started under an older
    // generation must not write its result back
    generations: HashMap<Domain, u64>,
}

impl CacheState {
    fn generation(&self, domain: Domain) -> u64 {
        self.generations.get(&domain).copied().unwrap_or(0)
    }

    fn bump(&mut self, domain: Domain) {
        *self.generations.entry(domain).or_insert(0) += 1;
    }
}

pub struct QueryCache {
    state: RwLock<CacheState>,
    enabled: bool,
    stale_after: Duration,
    retry_attempts: u32,
}

impl QueryCache {
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            enabled: config.enable_cache,
            stale_after: Duration::from_secs(config.stale_time_secs),
            retry_attempts: config.retry_attempts,
        }
    }

    /// Always fetches, never retries
    pub fn disabled() -> Self {
        Self::new(&QueryConfig {
            enable_cache: false,
            stale_time_secs: 0,
            retry_attempts: 0,
        })
    }

    /// Serve `key` from cache while fresh, otherwise run `fetcher`
    /// (retrying retryable failures) and cache the result
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ClientError>>,
    {
        if let Some(value) = self.fresh(&key).await {
            debug!("Query cache hit: {}/{}", key.domain, key.scope);
            return Ok(serde_json::from_value(value)?);
        }

        let started_at = self.state.read().await.generation(key.domain);
        let value = self.fetch_with_retry(&key, fetcher).await?;
        let decoded = serde_json::from_value(value.clone())?;

        if self.enabled {
            let mut state = self.state.write().await;
            if state.generation(key.domain) == started_at {
                state.entries.insert(
                    key,
                    CacheEntry {
                        value,
                        fetched_at: Instant::now(),
                    },
                );
            } else {
                debug!("Not caching {}/{}: invalidated while in flight", key.domain, key.scope);
            }
        }

        Ok(decoded)
    }

    async fn fresh(&self, key: &QueryKey) -> Option<Value> {
        if !self.enabled {
            return None;
        }
        let state = self.state.read().await;
        state
            .entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.stale_after)
            .map(|entry| entry.value.clone())
    }

    async fn fetch_with_retry<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<Value, ClientError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ClientError>>,
    {
        let mut attempt = 0;
        loop {
            match fetcher().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    warn!("Query {}/{} failed ({}), retrying", key.domain, key.scope, err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Drop every entry belonging to `domain`; returns how many went
    pub async fn invalidate(&self, domain: Domain) -> usize {
        let mut state = self.state.write().await;
        state.bump(domain);
        let before = state.entries.len();
        state.entries.retain(|key, _| key.domain != domain);
        before - state.entries.len()
    }

    /// Apply the invalidation rules for a confirmed mutation
    pub async fn invalidate_after(&self, domain: Domain, mutation: Mutation) -> Vec<Domain> {
        let domains = invalidated_domains(domain, mutation);
        for target in &domains {
            let dropped = self.invalidate(*target).await;
            debug!("Invalidated {} cached {} queries after {:?}", dropped, target, mutation);
        }
        domains
    }

    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        for domain in Domain::ALL {
            state.bump(domain);
        }
        state.entries.clear();
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.state.read().await.entries.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}

/// Domains whose cached queries a mutation makes stale: always its own, plus
/// the dashboard summary when aggregate counts change
pub fn invalidated_domains(domain: Domain, mutation: Mutation) -> Vec<Domain> {
    let mut domains = vec![domain];
    if changes_dashboard_counts(domain, mutation) {
        domains.push(Domain::Dashboard);
    }
    domains
}

fn changes_dashboard_counts(domain: Domain, mutation: Mutation) -> bool {
    use Domain::*;
    use Mutation::*;

    matches!(
        (domain, mutation),
        (Clients | Products | Suppliers | Documents, Create | Delete | Import)
            | (Documents, Convert)
            | (Reminders, Complete)
    )
}
