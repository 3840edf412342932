pub mod payment_method;

pub use payment_method::{default_payment_methods, NewPaymentMethod, PaymentMethod, PaymentMethodKind};
