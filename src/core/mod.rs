pub mod currency;
pub mod error;
pub mod traits;
pub mod year_month;

pub use currency::{checked_sum, Currency, MAX_AMOUNT};
pub use error::{AppError, Result};
pub use year_month::YearMonth;
