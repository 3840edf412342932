pub mod health;
pub mod installments;
pub mod payment_methods;
pub mod reports;
pub mod transactions;
