use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{Points, UserId, UserPoint};

/// In-memory balance table keyed by user id.
///
/// Offers point lookup and point upsert, nothing more: it does not make
/// the read-compute-write cycle atomic. Serializing mutations per user
/// is the ledger service's job.
pub struct BalanceStore {
    rows: RwLock<HashMap<UserId, UserPoint>>,
}

impl BalanceStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Current balance record for `user_id`; a zero-balance record if the
    /// user has never been written.
    pub fn read(&self, user_id: UserId) -> UserPoint {
        self.rows
            .read()
            .get(&user_id)
            .copied()
            .unwrap_or_else(|| UserPoint::empty(user_id))
    }

    /// Upsert the user's balance, stamped with the current wall-clock time.
    pub fn write(&self, user_id: UserId, point: Points) -> UserPoint {
        let row = UserPoint::new(user_id, point, Utc::now().timestamp_millis());
        self.rows.write().insert(user_id, row);
        row
    }
}

impl Default for BalanceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_unseen_user_is_zero() {
        let store = BalanceStore::new();
        let row = store.read(1);
        assert_eq!(row.id, 1);
        assert_eq!(row.point, 0);
    }

    #[test]
    fn test_write_then_read() {
        let store = BalanceStore::new();
        let written = store.write(1, 1500);
        assert_eq!(written.point, 1500);
        assert_eq!(store.read(1), written);
    }

    #[test]
    fn test_write_overwrites() {
        let store = BalanceStore::new();
        store.write(1, 100);
        store.write(1, 250);
        assert_eq!(store.read(1).point, 250);
    }
}
