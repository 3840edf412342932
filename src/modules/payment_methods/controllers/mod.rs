pub mod payment_method_controller;

pub use payment_method_controller::{
    configure, create_payment_method, delete_payment_method, list_payment_methods,
};
