pub mod storage;

pub use storage::{StateStorage, PAYMENT_METHODS_KEY, TRANSACTIONS_KEY};
