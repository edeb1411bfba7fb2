// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session state store.
//!
//! Holds the single live [`SessionState`] for this client. Snapshots arriving
//! from the push channel and from mutation responses go through the same
//! [`SessionStore::offer`] gate, which swaps the whole state when the commit
//! id is fresh and drops it otherwise.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use desk_core::{CommitId, Freshness, SessionState, Verdict};

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Shared session store; clones refer to the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    /// Commit id comparison policy.
    freshness: Freshness,
    /// The current snapshot, swapped wholesale.
    current: Mutex<Arc<SessionState>>,
    /// Registered change listeners.
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    /// Serializes apply+notify so listeners observe commits in apply order.
    delivery: Mutex<()>,
    next_subscription: AtomicU64,
}

impl SessionStore {
    /// Creates a store holding the default (closed, empty) state.
    pub fn new(freshness: Freshness) -> Self {
        SessionStore {
            inner: Arc::new(StoreInner {
                freshness,
                current: Mutex::new(Arc::new(SessionState::default())),
                listeners: Mutex::new(Vec::new()),
                delivery: Mutex::new(()),
                next_subscription: AtomicU64::new(1),
            }),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<SessionState> {
        Arc::clone(&self.inner.current.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn commit_id(&self) -> CommitId {
        self.current().commit_id.clone()
    }

    /// Offers a candidate snapshot.
    ///
    /// The candidate replaces the current state only when the freshness
    /// policy judges it [`Verdict::Fresh`]; listeners are then notified once.
    /// A snapshot of a different session is always fresh.
    /// Listeners must not offer snapshots themselves.
    pub fn offer(&self, candidate: SessionState) -> Verdict {
        let _delivery = self.inner.delivery.lock().unwrap_or_else(|e| e.into_inner());
        let applied = {
            let mut current = self.inner.current.lock().unwrap_or_else(|e| e.into_inner());
            let verdict = self.inner.freshness.judge_state(&current, &candidate);
            if verdict != Verdict::Fresh {
                tracing::debug!(
                    session = %candidate.id,
                    current = %current.commit_id,
                    candidate = %candidate.commit_id,
                    ?verdict,
                    "snapshot dropped"
                );
                return verdict;
            }
            tracing::info!(
                from = %current.commit_id,
                to = %candidate.commit_id,
                desk_status = %candidate.desk_status,
                "snapshot applied"
            );
            *current = Arc::new(candidate);
            Arc::clone(&current)
        };
        self.notify(&applied);
        Verdict::Fresh
    }

    /// Applies a candidate snapshot, returning whether it was applied.
    pub fn apply(&self, candidate: SessionState) -> bool {
        self.offer(candidate) == Verdict::Fresh
    }

    /// Registers a callback invoked after every applied change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Listeners run outside the state and listener locks so they may read
    /// the store or (un)subscribe.
    fn notify(&self, state: &SessionState) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(state);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("freshness", &self.inner.freshness)
            .field("commit_id", &self.commit_id())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
