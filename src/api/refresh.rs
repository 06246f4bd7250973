//! Single-flight access-token refresh.
//!
//! The first caller to hit a 401 becomes the leader and runs the refresh.
//! Callers arriving while the leader is in flight park a oneshot sender in
//! the queue and wait. When the leader settles, the queue is drained in
//! arrival order with the same outcome for everyone.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

use crate::error::ClientError;

type Outcome = Result<String, String>;

#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<Outcome>>,
}

enum Role {
    Leader,
    Follower(oneshot::Receiver<Outcome>),
}

#[derive(Default)]
pub struct RefreshCoordinator {
    // Never held across an await
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().refreshing
    }

    /// Requests currently parked behind the in-flight refresh
    pub fn pending(&self) -> usize {
        self.lock().waiters.len()
    }

    /// Run `refresh` unless one is already in flight, in which case wait for
    /// that one. Every caller gets the same token or the same failure.
    pub async fn run<F, Fut>(&self, refresh: F) -> Result<String, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ClientError>>,
    {
        match self.join() {
            Role::Follower(receiver) => match receiver.await {
                Ok(Ok(token)) => Ok(token),
                Ok(Err(reason)) => Err(ClientError::SessionExpired(reason)),
                Err(_) => Err(ClientError::SessionExpired(ABANDONED.to_string())),
            },
            Role::Leader => {
                let mut guard = LeaderGuard {
                    coordinator: self,
                    settled: false,
                };
                let outcome = refresh().await;
                guard.settle(match &outcome {
                    Ok(token) => Ok(token.clone()),
                    Err(ClientError::SessionExpired(reason)) => Err(reason.clone()),
                    Err(other) => Err(other.to_string()),
                });
                outcome
            }
        }
    }

    fn join(&self) -> Role {
        let mut state = self.lock();
        if state.refreshing {
            let (sender, receiver) = oneshot::channel();
            state.waiters.push(sender);
            Role::Follower(receiver)
        } else {
            state.refreshing = true;
            Role::Leader
        }
    }

    fn settle(&self, outcome: Outcome) {
        let waiters = {
            let mut state = self.lock();
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };

        for waiter in waiters {
            // A waiter whose request was dropped is simply skipped
            let _ = waiter.send(outcome.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

const ABANDONED: &str = "token refresh was abandoned";

/// Returns the coordinator to idle if the leader's future is dropped mid-refresh
struct LeaderGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl LeaderGuard<'_> {
    fn settle(&mut self, outcome: Outcome) {
        self.settled = true;
        self.coordinator.settle(outcome);
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.settle(Err(ABANDONED.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    async fn wait_for_pending(coordinator: &RefreshCoordinator, count: usize) {
        while coordinator.pending() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_followers_share_the_leaders_token() {
        let coordinator = Arc::new(RefreshCoordinator::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());

        let leader = {
            let coordinator = coordinator.clone();
            let calls = calls.clone();
            let release = release.clone();
            tokio::spawn(async move {
                coordinator
                    .run(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        release.notified().await;
                        Ok("fresh-token".to_string())
                    })
                    .await
            })
        };

        while !coordinator.is_refreshing() {
            tokio::task::yield_now().await;
        }

        let mut followers = Vec::new();
        for _ in 0..3 {
            let coordinator = coordinator.clone();
            let calls = calls.clone();
            followers.push(tokio::spawn(async move {
                coordinator
                    .run(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok("should-not-run".to_string())
                    })
                    .await
            }));
        }

        wait_for_pending(&coordinator, 3).await;
        release.notify_one();

        assert_eq!(leader.await.unwrap().unwrap(), "fresh-token");
        for follower in followers {
            assert_eq!(follower.await.unwrap().unwrap(), "fresh-token");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!coordinator.is_refreshing());
        assert_eq!(coordinator.pending(), 0);
    }

    #[tokio::test]
    async fn test_waiters_are_drained_in_arrival_order() {
        let coordinator = RefreshCoordinator::new();
        let mut receivers = Vec::new();

        assert!(matches!(coordinator.join(), Role::Leader));
        for _ in 0..3 {
            match coordinator.join() {
                Role::Follower(receiver) => receivers.push(receiver),
                Role::Leader => panic!("second leader while refreshing"),
            }
        }

        coordinator.settle(Ok("t2".to_string()));

        for mut receiver in receivers {
            assert_eq!(receiver.try_recv().unwrap(), Ok("t2".to_string()));
        }
    }

    #[tokio::test]
    async fn test_failure_reaches_every_waiter() {
        let coordinator = Arc::new(RefreshCoordinator::new());
        let release = Arc::new(Notify::new());

        let leader = {
            let coordinator = coordinator.clone();
            let release = release.clone();
            tokio::spawn(async move {
                coordinator
                    .run(|| async move {
                        release.notified().await;
                        Err(ClientError::SessionExpired("refresh token revoked".into()))
                    })
                    .await
            })
        };

        while !coordinator.is_refreshing() {
            tokio::task::yield_now().await;
        }
        let follower = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.run(|| async { Ok(String::new()) }).await })
        };
        wait_for_pending(&coordinator, 1).await;
        release.notify_one();

        assert!(matches!(leader.await.unwrap(), Err(ClientError::SessionExpired(_))));
        match follower.await.unwrap() {
            Err(ClientError::SessionExpired(reason)) => assert_eq!(reason, "refresh token revoked"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dropped_leader_releases_waiters() {
        let coordinator = Arc::new(RefreshCoordinator::new());

        let leader = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                coordinator
                    .run(|| async {
                        futures::future::pending::<()>().await;
                        Ok(String::new())
                    })
                    .await
            })
        };
        while !coordinator.is_refreshing() {
            tokio::task::yield_now().await;
        }
        let follower = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.run(|| async { Ok(String::new()) }).await })
        };
        wait_for_pending(&coordinator, 1).await;

        leader.abort();
        assert!(matches!(follower.await.unwrap(), Err(ClientError::SessionExpired(_))));
        assert!(!coordinator.is_refreshing());
    }
}
