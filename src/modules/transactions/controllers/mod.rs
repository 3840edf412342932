pub mod transaction_controller;

pub use transaction_controller::{
    configure, create_transaction, delete_transaction, list_transactions, update_transaction,
    TransactionPayload,
};
