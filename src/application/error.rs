use thiserror::Error;

use crate::domain::{Points, UserId};

/// The closed set of business failures the ledger can report.
///
/// All of them are recoverable: the service remains fully usable after
/// any of these, and none is retried internally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointError {
    #[error("Invalid user id: {0}")]
    InvalidUser(UserId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Points),

    #[error("Insufficient balance: have {balance}, requested {requested}")]
    InsufficientBalance { balance: Points, requested: Points },
}
