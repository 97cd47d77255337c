//! Core service-graph abstractions: keyed stores, listeners, and connectors.
//!
//! A [`Service`] owns the latest value per key and fans out every upsert to its
//! registered [`ServiceListener`]s, synchronously, in registration order. A
//! [`Connector`] sits at the boundary of the graph: inbound connectors parse
//! bytes into typed values and push them into a service; outbound connectors
//! take a value and serialize it onward (socket or file).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::GraphError;

/// Reacts to updates on a downstream [`Service`]. Implementors must not mutate
/// the value they are handed — it is a borrowed snapshot of what was just
/// stored upstream, not a buffer to edit in place.
pub trait ServiceListener<V>: Send + Sync {
    fn process_add(&self, value: &V);

    fn process_remove(&self, _value: &V) {}

    fn process_update(&self, _value: &V) {}
}

/// Boundary adapter. `Publish` may fail silently per client (a disconnected
/// client is dropped, never propagated to the caller).
pub trait Connector<V>: Send + Sync {
    fn publish(&self, value: &V);
}

/// A keyed store of the latest value per `K`, with synchronous listener
/// fan-out on every upsert. The store itself is mutex-guarded so that writers
/// arriving on different threads serialize cleanly; the listener list is
/// populated once at bootstrap and never touched again, so reading it needs
/// no lock.
pub struct Service<K, V> {
    store: Mutex<HashMap<K, V>>,
    listeners: Mutex<Vec<Arc<dyn ServiceListener<V>>>>,
}

impl<K, V> Service<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Bootstrap-time wiring. The listener list is guarded only so that it
    /// can be populated through a shared `Arc<Service<_, _>>` handle once
    /// downstream nodes hold their own clone of it — it is not meant to be
    /// touched once connectors are reading.
    pub fn add_listener(&self, listener: Arc<dyn ServiceListener<V>>) {
        self.listeners.lock().push(listener);
    }

    pub fn listeners(&self) -> Vec<Arc<dyn ServiceListener<V>>> {
        self.listeners.lock().clone()
    }

    /// Upsert `value` under `key` and fan out `process_add` to every listener,
    /// in registration order, after the store has been updated. The store
    /// lock is released before fan-out begins, so cyclic cascades (a listener
    /// that eventually calls back into this same service through a different
    /// key) cannot deadlock.
    pub fn on_message(&self, key: K, value: V) {
        let broadcast = value.clone();
        {
            let mut store = self.store.lock();
            store.insert(key, value);
        }
        let listeners = self.listeners.lock().clone();
        for listener in &listeners {
            listener.process_add(&broadcast);
        }
    }

    pub fn get_data(&self, key: &K) -> Result<V, GraphError> {
        self.store
            .lock()
            .get(key)
            .cloned()
            .ok_or(GraphError::UnknownKey)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.store.lock().contains_key(key)
    }

    pub fn snapshot(&self) -> HashMap<K, V> {
        self.store.lock().clone()
    }
}

impl<K, V> Default for Service<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
