pub mod installment;

pub use installment::{BillingCycle, Installment};
