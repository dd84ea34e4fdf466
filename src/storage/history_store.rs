use parking_lot::RwLock;

use crate::domain::{PointHistory, Points, TransactionType, UserId};

/// In-memory append-only log of balance-changing events.
///
/// Entry ids are assigned monotonically at append time; per-user ordering
/// is insertion order. Entries are never updated or deleted.
pub struct HistoryStore {
    rows: RwLock<Vec<PointHistory>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Append one event and return the stored entry with its assigned id.
    pub fn append(
        &self,
        user_id: UserId,
        amount: Points,
        kind: TransactionType,
        at_millis: i64,
    ) -> PointHistory {
        let mut rows = self.rows.write();
        let entry = PointHistory {
            id: rows.len() as i64 + 1,
            user_id,
            amount,
            kind,
            updated_at_millis: at_millis,
        };
        rows.push(entry);
        entry
    }

    /// All entries for `user_id`, in insertion order.
    pub fn list_by_user(&self, user_id: UserId) -> Vec<PointHistory> {
        self.rows
            .read()
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .copied()
            .collect()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
