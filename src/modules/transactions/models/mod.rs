pub mod transaction;

pub use transaction::{
    Category, SortDirection, SortKey, Transaction, TransactionQuery, TransactionRequest,
};
