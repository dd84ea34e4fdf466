use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One mutual-exclusion lock per key, created lazily and evicted once
/// nobody holds or waits for it.
///
/// All work done while holding the guard for key K runs strictly serially
/// with respect to other holders of K; holders of any other key never wait
/// on K. Waiters for the same key are served in arrival order (tokio mutex
/// fairness), and acquisition has no built-in timeout.
pub struct KeyLockRegistry<K> {
    slots: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

/// Scoped acquisition of one key's lock. Dropping the guard releases the
/// lock and, if no other task holds or awaits the same key, removes the
/// key's entry from the registry.
pub struct KeyLockGuard<'a, K: Eq + Hash + Copy> {
    registry: &'a KeyLockRegistry<K>,
    key: K,
    inner: Option<OwnedMutexGuard<()>>,
}

impl<K: Eq + Hash + Copy> KeyLockRegistry<K> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Wait until no other task holds `key`'s lock, then take it.
    pub async fn acquire(&self, key: K) -> KeyLockGuard<'_, K> {
        // Cloning the slot under the registry mutex is what makes eviction
        // race-free: a waiter is visible through the Arc's strong count
        // before the registry mutex is released.
        let slot = self.slots.lock().entry(key).or_default().clone();
        let inner = slot.lock_owned().await;
        KeyLockGuard {
            registry: self,
            key,
            inner: Some(inner),
        }
    }

    /// Drop `key`'s entry if the registry holds the only reference to it,
    /// i.e. no task is holding the lock or queued on it. Checked under the
    /// registry mutex, so a concurrent `acquire` either already shows up
    /// in the strong count or has not cloned the slot yet and will simply
    /// create a fresh entry.
    fn evict_if_idle(&self, key: K) {
        let mut slots = self.slots.lock();
        if slots.get(&key).is_some_and(|slot| Arc::strong_count(slot) == 1) {
            slots.remove(&key);
        }
    }

    /// Number of live lock entries, for diagnostics.
    pub fn entry_count(&self) -> usize {
        self.slots.lock().len()
    }
}

impl<K: Eq + Hash + Copy> Default for KeyLockRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Copy> Drop for KeyLockGuard<'_, K> {
    fn drop(&mut self) {
        // Release the lock before the eviction check so the strong count
        // observed under the registry mutex reflects waiters only.
        self.inner.take();
        self.registry.evict_if_idle(self.key);
    }
}
