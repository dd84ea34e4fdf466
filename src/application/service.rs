use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::{PointHistory, Points, TransactionType, UserId, UserPoint};
use crate::storage::{BalanceStore, HistoryStore};
use crate::sync::KeyLockRegistry;

use super::PointError;

/// The sole entry point that mutates balances.
///
/// `charge` and `use_points` run their read-validate-append-write block
/// under the user's lock, so for one user these blocks are totally
/// ordered: no lost updates, no negative balances. Operations on
/// different users never wait on each other. Reads take no lock and see
/// the last committed balance.
pub struct PointService {
    balances: BalanceStore,
    history: HistoryStore,
    locks: KeyLockRegistry<UserId>,
}

impl PointService {
    /// Create a service over explicitly supplied collaborators, so tests
    /// can wire an isolated instance per run.
    pub fn new(
        balances: BalanceStore,
        history: HistoryStore,
        locks: KeyLockRegistry<UserId>,
    ) -> Self {
        Self {
            balances,
            history,
            locks,
        }
    }

    /// Current balance for a user. Lock-free; tolerates reading a value
    /// concurrently being mutated (last-committed-wins).
    pub fn balance(&self, user_id: UserId) -> Result<UserPoint, PointError> {
        validate_user(user_id)?;
        Ok(self.balances.read(user_id))
    }

    /// All history entries for a user, in insertion order. Lock-free.
    pub fn history(&self, user_id: UserId) -> Result<Vec<PointHistory>, PointError> {
        validate_user(user_id)?;
        Ok(self.history.list_by_user(user_id))
    }

    /// Increase the user's balance by `amount`, recording a CHARGE entry.
    pub async fn charge(&self, user_id: UserId, amount: Points) -> Result<UserPoint, PointError> {
        // Validation failures past this point release the lock through the
        // guard's drop, like every other exit path.
        let _lock = self.locks.acquire(user_id).await;

        validate_user(user_id)?;
        validate_amount(amount)?;

        let current = self.balances.read(user_id);
        let now = Utc::now().timestamp_millis();

        self.history
            .append(user_id, amount, TransactionType::Charge, now);
        let updated = self.balances.write(user_id, current.point + amount);

        debug!(user_id, amount, balance = updated.point, "charged points");
        Ok(updated)
    }

    /// Decrease the user's balance by `amount`, recording a USE entry.
    /// Fails with `InsufficientBalance` if the balance cannot cover it,
    /// leaving both stores untouched.
    pub async fn use_points(
        &self,
        user_id: UserId,
        amount: Points,
    ) -> Result<UserPoint, PointError> {
        let _lock = self.locks.acquire(user_id).await;

        validate_user(user_id)?;
        validate_amount(amount)?;

        let current = self.balances.read(user_id);
        if current.point < amount {
            warn!(
                user_id,
                balance = current.point,
                requested = amount,
                "use rejected, insufficient balance"
            );
            return Err(PointError::InsufficientBalance {
                balance: current.point,
                requested: amount,
            });
        }
        let now = Utc::now().timestamp_millis();

        self.history
            .append(user_id, amount, TransactionType::Use, now);
        let updated = self.balances.write(user_id, current.point - amount);

        debug!(user_id, amount, balance = updated.point, "used points");
        Ok(updated)
    }
}

fn validate_user(user_id: UserId) -> Result<(), PointError> {
    if user_id <= 0 {
        return Err(PointError::InvalidUser(user_id));
    }
    Ok(())
}

fn validate_amount(amount: Points) -> Result<(), PointError> {
    if amount <= 0 {
        return Err(PointError::InvalidAmount(amount));
    }
    Ok(())
}
