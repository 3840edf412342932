pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::{create_transaction, delete_transaction, list_transactions, update_transaction};
pub use models::{Category, SortDirection, SortKey, Transaction, TransactionQuery, TransactionRequest};
pub use services::TransactionMaterializer;
