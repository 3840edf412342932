pub mod controllers;
pub mod models;

pub use controllers::{create_payment_method, delete_payment_method, list_payment_methods};
pub use models::{default_payment_methods, NewPaymentMethod, PaymentMethod, PaymentMethodKind};
