mod balance_store;
mod history_store;

pub use balance_store::*;
pub use history_store::*;
