// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;

use tally::{BalanceStore, HistoryStore, KeyLockRegistry, PointService};

/// Fresh service with isolated stores and its own lock registry.
pub fn test_service() -> PointService {
    PointService::new(
        BalanceStore::new(),
        HistoryStore::new(),
        KeyLockRegistry::new(),
    )
}

/// Fresh service wrapped for sharing across spawned tasks.
pub fn shared_service() -> Arc<PointService> {
    Arc::new(test_service())
}
