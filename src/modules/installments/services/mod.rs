pub mod billing_cycle;
pub mod installment_calculator;

pub use billing_cycle::{resolve_statement_month, statement_for_purchase};
pub use installment_calculator::{validate_count, InstallmentCalculator, MAX_INSTALLMENTS};
