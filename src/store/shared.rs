use std::sync::{Mutex, MutexGuard};

use crate::core::{AppError, Result};
use crate::store::TransactionStore;

/// The one store instance shared by all HTTP workers
pub type SharedStore = Mutex<TransactionStore>;

pub fn lock_store(store: &SharedStore) -> Result<MutexGuard<'_, TransactionStore>> {
    store
        .lock()
        .map_err(|_| AppError::internal("Transaction store lock poisoned"))
}
