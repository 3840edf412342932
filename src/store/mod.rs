pub mod json_file;
pub mod memory;
pub mod shared;
pub mod transaction_store;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use shared::{lock_store, SharedStore};
pub use transaction_store::{StoreSettings, TransactionStore};
