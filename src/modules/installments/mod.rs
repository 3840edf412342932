pub mod models;
pub mod services;

pub use models::{BillingCycle, Installment};
pub use services::{resolve_statement_month, InstallmentCalculator};
