use crate::core::Result;

/// Key under which the transaction collection is persisted
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Key under which the payment method collection is persisted
pub const PAYMENT_METHODS_KEY: &str = "paymentMethods";

/// Key-value persistence port for the store's collections
///
/// Values are serialized JSON documents. Implementations only need
/// last-write-wins semantics: a `save` replaces whatever was stored under
/// the key before.
pub trait StateStorage: Send {
    /// Read the value stored under `key`, `None` if nothing was ever saved
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}
