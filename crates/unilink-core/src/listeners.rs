// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Script-side listener registry.
//
// Any number of listeners may subscribe. Each matched link is delivered to
// every listener registered at the time of delivery. Listeners stay
// registered until they unsubscribe. With no listeners an event is dropped:
// nothing is buffered or replayed later.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::types::{LinkEvent, ListenerId};

/// Callback invoked with each delivered event.
pub type Listener = Arc<dyn Fn(&LinkEvent) + Send + Sync>;

/// Registry of event listeners. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Arc<Mutex<Vec<(ListenerId, Listener)>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the listener list.
    ///
    /// Every critical section leaves the list consistent, so a lock poisoned
    /// by a panicking thread is recovered instead of losing registrations.
    fn lock(&self) -> MutexGuard<'_, Vec<(ListenerId, Listener)>> {
        self.listeners.lock().unwrap_or_else(|poisoned| {
            warn!("listener registry lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Register a listener. Returns the handle used to unsubscribe it.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&LinkEvent) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        let mut listeners = self.lock();
        listeners.push((id, Arc::new(listener)));
        debug!(listener = %id, total = listeners.len(), "listener subscribed");
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        before != listeners.len()
    }

    /// Deliver `event` to every registered listener, in registration order.
    ///
    /// Returns the number of listeners called. Listeners run outside the
    /// registry lock, so they may subscribe or unsubscribe while handling an
    /// event.
    pub fn notify(&self, event: &LinkEvent) -> usize {
        let snapshot: Vec<Listener> = self
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        if snapshot.is_empty() {
            debug!(event = %event.event, url = %event.data.url, "no listener registered, event dropped");
            return 0;
        }

        for listener in &snapshot {
            listener(event);
        }

        info!(
            event = %event.event,
            url = %event.data.url,
            listeners = snapshot.len(),
            "link event delivered"
        );
        snapshot.len()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
