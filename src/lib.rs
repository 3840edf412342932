//! Spendwise personal expense tracker
//!
//! Records expenses against payment methods, splits credit-card purchases
//! into installments billed on the card's cycle, and reports spending per
//! month.

pub mod config;
pub mod core;
pub mod modules;
pub mod routes;
pub mod store;

// Re-export commonly used types
pub use modules::installments;
pub use modules::payment_methods;
pub use modules::reports;
pub use modules::transactions;
pub use store::{JsonFileStorage, MemoryStorage, StoreSettings, TransactionStore};
