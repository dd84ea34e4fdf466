pub mod api;
pub mod application;
pub mod domain;
pub mod storage;
pub mod sync;

pub use application::{PointError, PointService};
pub use domain::*;
pub use storage::{BalanceStore, HistoryStore};
pub use sync::KeyLockRegistry;
