use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type Points = i64;

/// The two kinds of balance mutation the ledger records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Increases the balance.
    Charge,
    /// Decreases the balance, rejected if it would go negative.
    Use,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Charge => "CHARGE",
            TransactionType::Use => "USE",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's current balance. One logical instance per user id,
/// materialized lazily with a zero balance on first access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPoint {
    pub id: UserId,
    pub point: Points,
    pub updated_at_millis: i64,
}

impl UserPoint {
    pub fn new(id: UserId, point: Points, updated_at_millis: i64) -> Self {
        Self {
            id,
            point,
            updated_at_millis,
        }
    }

    /// The zero-balance record returned for a user the ledger has never seen.
    pub fn empty(id: UserId) -> Self {
        Self::new(id, 0, 0)
    }
}

/// An immutable record of one past charge or use.
/// `amount` is the magnitude of the change; `kind` gives its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointHistory {
    pub id: i64,
    pub user_id: UserId,
    pub amount: Points,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub updated_at_millis: i64,
}

impl PointHistory {
    /// The signed contribution of this entry to the user's balance.
    pub fn signed_amount(&self) -> Points {
        match self.kind {
            TransactionType::Charge => self.amount,
            TransactionType::Use => -self.amount,
        }
    }
}

/// Compute the net balance implied by a slice of history entries:
/// sum of charge amounts minus sum of use amounts.
pub fn net_balance(entries: &[PointHistory]) -> Points {
    entries.iter().map(PointHistory::signed_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, amount: Points, kind: TransactionType) -> PointHistory {
        PointHistory {
            id,
            user_id: 1,
            amount,
            kind,
            updated_at_millis: 0,
        }
    }

    #[test]
    fn test_net_balance_empty() {
        assert_eq!(net_balance(&[]), 0);
    }

    #[test]
    fn test_net_balance_mixed() {
        let entries = vec![
            entry(1, 5000, TransactionType::Charge),
            entry(2, 1500, TransactionType::Use),
            entry(3, 500, TransactionType::Use),
        ];
        assert_eq!(net_balance(&entries), 3000);
    }

    #[test]
    fn test_signed_amount_direction() {
        assert_eq!(entry(1, 700, TransactionType::Charge).signed_amount(), 700);
        assert_eq!(entry(2, 700, TransactionType::Use).signed_amount(), -700);
    }

    #[test]
    fn test_transaction_type_serializes_uppercase() {
        let json = serde_json::to_string(&TransactionType::Charge).unwrap();
        assert_eq!(json, "\"CHARGE\"");
        let json = serde_json::to_string(&TransactionType::Use).unwrap();
        assert_eq!(json, "\"USE\"");
    }

    #[test]
    fn test_empty_user_point_has_zero_balance() {
        let up = UserPoint::empty(42);
        assert_eq!(up.id, 42);
        assert_eq!(up.point, 0);
    }
}
