use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::{AppError, Currency, Result};
use crate::modules::installments::models::{BillingCycle, Installment};
use crate::modules::installments::services::billing_cycle::resolve_statement_month;

/// Largest installment series a purchase can be split into
pub const MAX_INSTALLMENTS: u32 = 48;

/// Splits credit-card purchases into dated installments
pub struct InstallmentCalculator;

impl InstallmentCalculator {
    /// Split `amount` into `count` installments billed on consecutive statements
    ///
    /// Every installment gets `amount / count` rounded half-up to the minor
    /// unit; the first installment absorbs the rounding remainder (positive or
    /// negative) so the amounts add back to `amount` exactly.
    ///
    /// # Arguments
    /// * `amount` - Purchase amount, already at the currency's minor-unit precision
    /// * `count` - Number of installments (1..=MAX_INSTALLMENTS)
    /// * `currency` - Currency for precision handling
    /// * `purchase_date` - Date of the purchase
    /// * `cycle` - Card billing cycle used to resolve due dates
    pub fn split(
        amount: Decimal,
        count: u32,
        currency: Currency,
        purchase_date: NaiveDate,
        cycle: &BillingCycle,
    ) -> Result<Vec<Installment>> {
        validate_count(count)?;

        if currency.round(amount) != amount {
            return Err(AppError::validation(format!(
                "Amount {} has more than {} decimal places",
                amount,
                currency.scale()
            )));
        }

        let (first_amount, base) = Self::calculate_amounts(amount, count, currency);

        debug!(
            amount = %amount,
            count,
            base = %base,
            first = %first_amount,
            "Splitting purchase into installments"
        );

        let installments = (0..count)
            .map(|index| {
                let due_date = resolve_statement_month(purchase_date, cycle, index)?;
                let value = if index == 0 { first_amount } else { base };
                Ok(Installment::new(index + 1, value, due_date))
            })
            .collect::<Result<Vec<_>>>()?;

        let distributed: Decimal = installments.iter().filter_map(|i| i.amount).sum();
        if distributed != amount {
            warn!(
                "Installment amount mismatch: distributed {} vs purchase {}",
                distributed, amount
            );
            return Err(AppError::internal(format!(
                "Installment amounts ({}) do not sum to purchase amount ({})",
                distributed, amount
            )));
        }

        Ok(installments)
    }

    /// Returns `(first, base)`: the first installment's amount and every other one's
    fn calculate_amounts(amount: Decimal, count: u32, currency: Currency) -> (Decimal, Decimal) {
        let divisor = Decimal::from(count);
        let base = currency.round(amount / divisor);
        let remainder = currency.round(amount - base * divisor);

        (base + remainder, base)
    }
}

/// Reject installment counts outside 1..=MAX_INSTALLMENTS
pub fn validate_count(count: u32) -> Result<()> {
    if count < 1 {
        return Err(AppError::invalid_installment_count(format!(
            "must be at least 1, got {}",
            count
        )));
    }

    if count > MAX_INSTALLMENTS {
        return Err(AppError::invalid_installment_count(format!(
            "must be at most {}, got {}",
            MAX_INSTALLMENTS, count
        )));
    }

    Ok(())
}
